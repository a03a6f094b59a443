//! Dashboard aggregate: one pass over a snapshot producing everything the
//! founder's home screen shows.

use crate::alerts::{generate_alerts, Alert};
use crate::metric::{HabitLog, Metric};
use crate::momentum::{calculate_momentum, MomentumConfig, MomentumScoreResult};
use crate::one_thing::get_one_thing;
use crate::prioritizer::{prioritize_tasks, PrioritizedTask};
use crate::task::Task;
use crate::time::days_until_due;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days after today still counted as "upcoming".
pub const UPCOMING_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub next_actions_limit: usize,
    pub momentum: MomentumConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            next_actions_limit: 10,
            momentum: MomentumConfig::default(),
        }
    }
}

/// Already-scoped snapshot for one user. Tasks should exclude DONE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardInput {
    pub tasks: Vec<Task>,
    pub habit_logs: Vec<HabitLog>,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub next_actions: Vec<PrioritizedTask>,
    pub one_thing: Option<PrioritizedTask>,
    pub alerts: Vec<Alert>,
    pub momentum_score: MomentumScoreResult,
    pub today_tasks: Vec<Task>,
    pub upcoming_tasks: Vec<Task>,
}

pub fn build_dashboard(
    input: &DashboardInput,
    now: DateTime<Utc>,
    config: &DashboardConfig,
) -> Dashboard {
    let ranked = prioritize_tasks(&input.tasks, now);
    let one_thing = get_one_thing(&ranked).cloned();
    let alerts = generate_alerts(&input.tasks, &input.habit_logs, &input.metrics, now);
    let momentum_score = calculate_momentum(&input.metrics, now, &config.momentum);

    let today_tasks = tasks_due_within(&input.tasks, now, 0..=0);
    let upcoming_tasks = tasks_due_within(&input.tasks, now, 1..=UPCOMING_DAYS);

    let next_actions = ranked
        .into_iter()
        .take(config.next_actions_limit)
        .collect();

    Dashboard {
        next_actions,
        one_thing,
        alerts,
        momentum_score,
        today_tasks,
        upcoming_tasks,
    }
}

fn tasks_due_within(
    tasks: &[Task],
    now: DateTime<Utc>,
    days: std::ops::RangeInclusive<i64>,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date
                .is_some_and(|due| days.contains(&days_until_due(due, now)))
        })
        .cloned()
        .collect()
}
