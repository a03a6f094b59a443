//! Alert Synthesizer: threshold rules over tasks, habit logs and metrics.
//!
//! Each rule emits at most one alert, and every matching rule fires. Alert ids are
//! per rule, not per occurrence, so a UI can diff successive results.

use crate::metric::{HabitLog, Metric, MetricType};
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const OVERDUE_ALERT_ID: &str = "overdue-tasks";
pub const STAGNATING_ALERT_ID: &str = "stagnating-tasks";
pub const SLEEP_DEBT_ALERT_ID: &str = "sleep-debt";

/// Tasks untouched for longer than this many days are flagged.
pub const STAGNATION_ALERT_DAYS: i32 = 7;
/// Most recent sleep entries considered.
pub const SLEEP_WINDOW: usize = 7;
/// Fewer entries than this is too sparse to judge.
pub const SLEEP_MIN_ENTRIES: usize = 3;
pub const SLEEP_DEBT_HOURS: f64 = 6.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Overdue,
    Stagnating,
    HabitRisk,
    SleepDebt,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

/// Run every rule and collect the alerts that fire, in rule order.
///
/// `habit_logs` is accepted for habit-risk rules; none consume it yet.
pub fn generate_alerts(
    tasks: &[Task],
    _habit_logs: &[HabitLog],
    metrics: &[Metric],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let alerts: Vec<Alert> = [
        overdue_alert(tasks, now),
        stagnating_alert(tasks),
        sleep_debt_alert(metrics),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(
        tasks = tasks.len(),
        metrics = metrics.len(),
        alerts = alerts.len(),
        "alerts generated"
    );
    alerts
}

fn overdue_alert(tasks: &[Task], now: DateTime<Utc>) -> Option<Alert> {
    let n = tasks
        .iter()
        .filter(|t| t.is_past_due(now) && !t.status.is_done())
        .count();
    if n == 0 {
        return None;
    }

    Some(Alert {
        id: OVERDUE_ALERT_ID.to_string(),
        alert_type: AlertType::Overdue,
        severity: Severity::High,
        title: format!("{n} overdue {}", plural_task(n)),
        description: format!("You have {n} {} past their due date", plural_task(n)),
        action_url: Some("/tasks?filter=overdue".to_string()),
    })
}

fn stagnating_alert(tasks: &[Task]) -> Option<Alert> {
    let n = tasks
        .iter()
        .filter(|t| t.stagnation_days > STAGNATION_ALERT_DAYS && t.status.is_actionable())
        .count();
    if n == 0 {
        return None;
    }

    Some(Alert {
        id: STAGNATING_ALERT_ID.to_string(),
        alert_type: AlertType::Stagnating,
        severity: Severity::Medium,
        title: format!("{n} stagnating {}", plural_task(n)),
        description: "Tasks untouched for over a week".to_string(),
        action_url: Some("/tasks".to_string()),
    })
}

/// Sleep entries are taken in caller order; the caller sorts them by date.
fn sleep_debt_alert(metrics: &[Metric]) -> Option<Alert> {
    let sleep: Vec<f64> = metrics
        .iter()
        .filter(|m| m.metric_type == MetricType::SleepAverage)
        .map(|m| m.value)
        .collect();

    let recent = &sleep[sleep.len().saturating_sub(SLEEP_WINDOW)..];
    if recent.len() < SLEEP_MIN_ENTRIES {
        return None;
    }

    let avg = recent.iter().sum::<f64>() / recent.len() as f64;
    // NaN entries make the average meaningless
    if avg.is_nan() || avg >= SLEEP_DEBT_HOURS {
        return None;
    }

    Some(Alert {
        id: SLEEP_DEBT_ALERT_ID.to_string(),
        alert_type: AlertType::SleepDebt,
        severity: Severity::High,
        title: "Sleep debt accumulating".to_string(),
        description: format!("Average {avg:.1}h/night - below healthy threshold"),
        action_url: Some("/habits".to_string()),
    })
}

fn plural_task(n: usize) -> &'static str {
    if n == 1 { "task" } else { "tasks" }
}
