//! Task Prioritizer: score every task and rank by descending score.

use crate::scoring::score_task;
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A task decorated with its score. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedTask {
    #[serde(flatten)]
    pub task: Task,
    pub priority_score: i64,
}

impl Deref for PrioritizedTask {
    type Target = Task;

    fn deref(&self) -> &Task {
        &self.task
    }
}

/// Rank tasks by score, highest first.
///
/// The sort is stable: equal scores keep their input order. No status filtering
/// happens here; callers drop DONE tasks beforehand.
pub fn prioritize_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<PrioritizedTask> {
    let mut ranked: Vec<PrioritizedTask> = tasks
        .iter()
        .map(|task| PrioritizedTask {
            priority_score: score_task(task, now),
            task: task.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

    tracing::debug!(count = ranked.len(), "prioritized tasks");
    ranked
}
