//! JSON export document: `{ exportDate, version, data: { tasks, habitLogs, metrics, ... } }`.
//!
//! Only the collections the engine consumes are typed. Projects, goals, habits and
//! reviews ride along in the export and are ignored here.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use founder_core::time::week_bounds;
use founder_core::{DashboardInput, HabitLog, Metric, Task};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Habit logs older than this are left out of a dashboard.
pub const HABIT_LOG_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: Option<String>,
    pub data: SnapshotData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapshotData {
    pub tasks: Vec<Task>,
    pub habit_logs: Vec<HabitLog>,
    pub metrics: Vec<Metric>,
}

impl Snapshot {
    /// Tasks that are not DONE, in export order.
    pub fn open_tasks(&self) -> Vec<Task> {
        self.data
            .tasks
            .iter()
            .filter(|t| !t.status.is_done())
            .cloned()
            .collect()
    }

    /// Metrics sorted by date, the order the alert pass expects.
    pub fn metrics_by_date(&self) -> Vec<Metric> {
        let mut metrics = self.data.metrics.clone();
        metrics.sort_by_key(|m| m.date);
        metrics
    }

    /// Scope the snapshot for a dashboard at `now`: open tasks, habit logs from the
    /// last 30 days, and metrics dated on or after this week's Monday, in date order.
    pub fn dashboard_input(&self, now: DateTime<Utc>) -> DashboardInput {
        let (week_start, _) = week_bounds(now);
        let habit_cutoff = now - Duration::days(HABIT_LOG_WINDOW_DAYS);

        DashboardInput {
            tasks: self.open_tasks(),
            habit_logs: self
                .data
                .habit_logs
                .iter()
                .filter(|h| h.date >= habit_cutoff)
                .cloned()
                .collect(),
            metrics: self
                .metrics_by_date()
                .into_iter()
                .filter(|m| m.date >= week_start)
                .collect(),
        }
    }

    /// Append extra metrics (e.g. from a CSV log).
    pub fn extend_metrics(&mut self, metrics: impl IntoIterator<Item = Metric>) {
        self.data.metrics.extend(metrics);
    }
}

pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(json).context("parse snapshot json")?;
    tracing::debug!(
        tasks = snapshot.data.tasks.len(),
        habit_logs = snapshot.data.habit_logs.len(),
        metrics = snapshot.data.metrics.len(),
        "snapshot parsed"
    );
    Ok(snapshot)
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_snapshot(&s).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use founder_core::{generate_alerts, MetricType, TaskStatus};

    const EXPORT: &str = r#"{
        "exportDate": "2026-03-04T10:00:00.000Z",
        "version": "1.0",
        "data": {
            "tasks": [
                {"id": "t1", "userId": "u1", "title": "Draft pitch", "notes": null,
                 "dueDate": "2026-03-05T00:00:00.000Z", "estimatedMinutes": 45,
                 "priority": 4, "impact": 5, "energyLevel": "HIGH", "context": "COMPUTER",
                 "status": "TODO", "projectId": "p1", "stagnationDays": 2},
                {"id": "t2", "userId": "u1", "title": "Old chore", "dueDate": null,
                 "estimatedMinutes": null, "priority": 1, "impact": 1,
                 "status": "DONE", "projectId": null, "stagnationDays": 0}
            ],
            "projects": [{"id": "p1", "name": "Fundraise"}],
            "habitLogs": [],
            "metrics": [
                {"id": "m2", "userId": "u1", "type": "SLEEP_AVERAGE", "value": 6.5,
                 "date": "2026-03-03T00:00:00.000Z"},
                {"id": "m1", "userId": "u1", "type": "DEEP_WORK_HOURS", "value": 4,
                 "date": "2026-03-02T00:00:00.000Z"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_export_document() {
        let snap = parse_snapshot(EXPORT).unwrap();
        assert_eq!(snap.version.as_deref(), Some("1.0"));
        assert_eq!(snap.data.tasks.len(), 2);
        assert_eq!(snap.data.tasks[0].estimated_minutes, Some(45));
        assert_eq!(snap.data.tasks[1].status, TaskStatus::Done);
        assert_eq!(snap.data.metrics[0].metric_type, MetricType::SleepAverage);
    }

    #[test]
    fn test_dashboard_input_scoping() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let input = parse_snapshot(EXPORT).unwrap().dashboard_input(now);
        assert_eq!(input.tasks.len(), 1);
        assert_eq!(input.tasks[0].id, "t1");
        let ids: Vec<&str> = input.metrics.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1", "m2"]);
    }

    #[test]
    fn test_last_week_metrics_do_not_reach_alerts() {
        let date = |d| Utc.with_ymd_and_hms(2026, 2, d, 22, 0, 0).unwrap();
        let mut snap = Snapshot::default();
        snap.extend_metrics([
            Metric::new("s1", MetricType::SleepAverage, 5.0, date(26)),
            Metric::new("s2", MetricType::SleepAverage, 5.0, date(27)),
            Metric::new("s3", MetricType::SleepAverage, 5.0, date(28)),
        ]);

        // Monday morning: last week's short nights are out of scope
        let monday = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let input = snap.dashboard_input(monday);
        assert!(input.metrics.is_empty());
        let alerts = generate_alerts(&input.tasks, &input.habit_logs, &input.metrics, monday);
        assert!(alerts.is_empty());

        // same entries seen from inside their own week still alert
        let saturday = date(28) + Duration::hours(1);
        let input = snap.dashboard_input(saturday);
        assert_eq!(input.metrics.len(), 3);
        let alerts = generate_alerts(&input.tasks, &input.habit_logs, &input.metrics, saturday);
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_habit_logs_limited_to_thirty_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let log = |id: &str, days_ago| HabitLog {
            id: id.to_string(),
            date: now - Duration::days(days_ago),
            value: Some(1.0),
            note: String::new(),
        };
        let snap = Snapshot {
            data: SnapshotData {
                habit_logs: vec![log("recent", 3), log("edge", 30), log("old", 31)],
                ..Default::default()
            },
            ..Default::default()
        };
        let ids: Vec<String> = snap
            .dashboard_input(now)
            .habit_logs
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, ["recent", "edge"]);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let snap = parse_snapshot(r#"{"data": {}}"#).unwrap();
        assert!(snap.data.tasks.is_empty());
        assert!(snap.export_date.is_none());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(parse_snapshot("{not json").is_err());
        assert!(parse_snapshot(r#"{"data": {"tasks": [{"id": 1}]}}"#).is_err());
    }
}
