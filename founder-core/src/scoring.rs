//! Task Scorer: additive priority score for a single task.
//!
//! Six independent factors, summed with no normalization and no ceiling:
//! - impact × 20 (dominant axis)
//! - priority × 10
//! - due proximity, bucketed by calendar day
//! - quick-win bonus for short estimates
//! - project linkage
//! - stagnation × 5, unbounded so neglected work eventually surfaces

use crate::task::Task;
use crate::time::days_until_due;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const IMPACT_WEIGHT: i64 = 20;
pub const PRIORITY_WEIGHT: i64 = 10;
pub const PROJECT_BONUS: i64 = 15;
pub const STAGNATION_PER_DAY: i64 = 5;

/// Per-factor contributions of a task's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub impact: i64,
    pub priority: i64,
    pub due: i64,
    pub quick_win: i64,
    pub project: i64,
    pub stagnation: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.impact + self.priority + self.due + self.quick_win + self.project + self.stagnation
    }
}

/// Score one task against `now`. Higher is more deserving of attention.
pub fn score_task(task: &Task, now: DateTime<Utc>) -> i64 {
    score_breakdown(task, now).total()
}

pub fn score_breakdown(task: &Task, now: DateTime<Utc>) -> ScoreBreakdown {
    ScoreBreakdown {
        impact: i64::from(task.impact) * IMPACT_WEIGHT,
        priority: i64::from(task.priority) * PRIORITY_WEIGHT,
        due: task
            .due_date
            .map(|due| due_bonus(days_until_due(due, now)))
            .unwrap_or(0),
        quick_win: task.estimated_minutes.map(quick_win_bonus).unwrap_or(0),
        project: if task.project_id.is_some() { PROJECT_BONUS } else { 0 },
        stagnation: i64::from(task.stagnation_days) * STAGNATION_PER_DAY,
    }
}

fn due_bonus(days: i64) -> i64 {
    match days {
        d if d < 0 => 100,
        0 => 80,
        1 => 60,
        d if d <= 3 => 40,
        d if d <= 7 => 20,
        _ => 0,
    }
}

fn quick_win_bonus(minutes: i32) -> i64 {
    match minutes {
        // zero or negative estimates count as unset
        m if m <= 0 => 0,
        m if m <= 15 => 15,
        m if m <= 30 => 10,
        m if m <= 60 => 5,
        _ => 0,
    }
}
