//! Task model as handed to the engine by the persistence layer.
//!
//! Tasks are read-only snapshots. Priority and impact are meant to be 1-5, but that is
//! enforced upstream; the scorer tolerates anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Inbox,
    Todo,
    InProgress,
    Waiting,
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Not finished and not blocked on someone else.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, TaskStatus::Done | TaskStatus::Waiting)
    }
}

/// Core task type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    /// 1-5 user-declared urgency.
    pub priority: i32,

    /// 1-5 user-declared leverage.
    pub impact: i32,

    /// Minutes.
    #[serde(default)]
    pub estimated_minutes: Option<i32>,

    pub status: TaskStatus,

    /// Days since the last meaningful update, computed by the caller.
    #[serde(default)]
    pub stagnation_days: i32,

    #[serde(default)]
    pub project_id: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            priority: 3,
            impact: 3,
            estimated_minutes: None,
            status: TaskStatus::Todo,
            stagnation_days: 0,
            project_id: None,
        }
    }

    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_impact(mut self, impact: i32) -> Self {
        self.impact = impact;
        self
    }

    pub fn with_estimate(mut self, minutes: i32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_stagnation(mut self, days: i32) -> Self {
        self.stagnation_days = days;
        self
    }

    /// Due strictly before `now`. Status is not considered.
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }
}
