//! Momentum Scorer: weekly 0-100 composite from self-reported metrics.
//!
//! Components:
//! - deep work, normalized against 20h/week then weighted
//! - shipped output, normalized against 5 items/week then weighted
//! - sleep penalty below a threshold (the only negative component)
//! - exercise bonus, capped
//!
//! With no sleep entries the weekly average is reported as 0. Whether that average
//! is penalized is controlled by `MomentumConfig::penalize_missing_sleep`; off by
//! default, so a week with no sleep data scores as neutral on sleep.

use crate::metric::{Metric, MetricType};
use crate::time::week_bounds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEEP_WORK_REFERENCE_HOURS: f64 = 20.0;
pub const OUTPUT_REFERENCE_COUNT: f64 = 5.0;
pub const SESSION_POINTS: f64 = 3.0;

/// Scoring weights. Field names also accept the camelCase spelling used by the web
/// client (`deepWorkWeight`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Max contribution from deep-work hours.
    #[serde(alias = "deepWorkWeight")]
    pub deep_work_weight: f64,
    /// Max contribution from shipped output.
    #[serde(alias = "outputWeight")]
    pub output_weight: f64,
    /// Hours of sleep below which the penalty applies.
    #[serde(alias = "sleepPenaltyThreshold")]
    pub sleep_penalty_threshold: f64,
    /// Points lost per hour of sleep deficit.
    #[serde(alias = "sleepPenaltyWeight")]
    pub sleep_penalty_weight: f64,
    /// Cap on the exercise bonus.
    #[serde(alias = "exerciseBonus")]
    pub exercise_bonus: f64,
    /// Treat a week without sleep entries as 0h of sleep and apply the full penalty.
    #[serde(alias = "penalizeMissingSleep")]
    pub penalize_missing_sleep: bool,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            deep_work_weight: 30.0,
            output_weight: 25.0,
            sleep_penalty_threshold: 7.0,
            sleep_penalty_weight: 20.0,
            exercise_bonus: 15.0,
            penalize_missing_sleep: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumBreakdown {
    pub deep_work_score: i64,
    pub output_score: i64,
    pub sleep_score: i64,
    pub exercise_score: i64,
}

/// Raw weekly aggregates the components were computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumAggregates {
    pub deep_work_hours: f64,
    pub output_count: f64,
    pub sleep_average: f64,
    pub exercise_sessions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumScoreResult {
    /// Composite, always within 0..=100.
    pub score: i64,
    pub breakdown: MomentumBreakdown,
    pub metrics: MomentumAggregates,
}

/// Sum and count of one metric type over the week window.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: f64,
    count: usize,
}

impl Tally {
    fn add(self, value: f64) -> Self {
        Self {
            sum: self.sum + value,
            count: self.count + 1,
        }
    }

    fn mean(self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

pub fn calculate_momentum_default(metrics: &[Metric], now: DateTime<Utc>) -> MomentumScoreResult {
    calculate_momentum(metrics, now, &MomentumConfig::default())
}

pub fn calculate_momentum(
    metrics: &[Metric],
    now: DateTime<Utc>,
    config: &MomentumConfig,
) -> MomentumScoreResult {
    let week = fold_week(metrics, now);
    let aggregates = week.aggregates();

    let deep_work_score = (aggregates.deep_work_hours / DEEP_WORK_REFERENCE_HOURS * 100.0)
        .min(100.0)
        * (config.deep_work_weight / 100.0);

    let output_score = (aggregates.output_count / OUTPUT_REFERENCE_COUNT * 100.0).min(100.0)
        * (config.output_weight / 100.0);

    let no_sleep_data = week.sleep.count == 0 && !config.penalize_missing_sleep;
    let rested = aggregates.sleep_average >= config.sleep_penalty_threshold;
    let sleep_score = if no_sleep_data || rested {
        0.0
    } else {
        -(config.sleep_penalty_threshold - aggregates.sleep_average) * config.sleep_penalty_weight
    };

    let exercise_score =
        (aggregates.exercise_sessions * SESSION_POINTS).min(config.exercise_bonus);

    let total = deep_work_score + output_score + sleep_score + exercise_score;
    // NaN (from NaN inputs) collapses to the floor
    let composite = if total.is_nan() { 0.0 } else { total.clamp(0.0, 100.0) };

    tracing::debug!(
        composite,
        deep_work_score,
        output_score,
        sleep_score,
        exercise_score,
        "momentum computed"
    );

    MomentumScoreResult {
        score: round_score(composite),
        breakdown: MomentumBreakdown {
            deep_work_score: round_score(deep_work_score),
            output_score: round_score(output_score),
            sleep_score: round_score(sleep_score),
            exercise_score: round_score(exercise_score),
        },
        metrics: aggregates,
    }
}

/// Fold the metrics inside the current Monday-Sunday week into the four aggregates.
pub fn weekly_aggregates(metrics: &[Metric], now: DateTime<Utc>) -> MomentumAggregates {
    fold_week(metrics, now).aggregates()
}

#[derive(Debug, Clone, Copy, Default)]
struct WeekTally {
    deep_work: Tally,
    output: Tally,
    sleep: Tally,
    fitness: Tally,
}

impl WeekTally {
    fn aggregates(&self) -> MomentumAggregates {
        MomentumAggregates {
            deep_work_hours: self.deep_work.sum,
            output_count: self.output.sum,
            sleep_average: self.sleep.mean(),
            exercise_sessions: self.fitness.sum,
        }
    }
}

fn fold_week(metrics: &[Metric], now: DateTime<Utc>) -> WeekTally {
    let (week_start, week_end) = week_bounds(now);

    metrics
        .iter()
        .filter(|m| m.date >= week_start && m.date <= week_end)
        .fold(WeekTally::default(), |week, m| match m.metric_type {
            MetricType::DeepWorkHours => WeekTally {
                deep_work: week.deep_work.add(m.value),
                ..week
            },
            MetricType::OutputShipped => WeekTally {
                output: week.output.add(m.value),
                ..week
            },
            MetricType::SleepAverage => WeekTally {
                sleep: week.sleep.add(m.value),
                ..week
            },
            MetricType::FitnessSessions => WeekTally {
                fitness: week.fitness.add(m.value),
                ..week
            },
            MetricType::Other(_) => week,
        })
}

/// Round to the nearest integer with halves going up (-10.5 -> -10, 10.5 -> 11),
/// saturating at the i64 range. NaN becomes 0.
fn round_score(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
