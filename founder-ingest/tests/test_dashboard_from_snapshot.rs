use chrono::{DateTime, TimeZone, Utc};
use founder_core::{build_dashboard, AlertType, DashboardConfig};
use founder_ingest::{load_snapshot, parse_metrics_csv};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// Wednesday afternoon of the exported week
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 4, 15, 0, 0).unwrap()
}

/// Real-shaped export: ranking, one thing, alerts and momentum line up end to end.
#[test]
fn test_dashboard_from_export_fixture() {
    let snapshot = load_snapshot(fixture("snapshot.json")).unwrap();
    let input = snapshot.dashboard_input(now());
    assert_eq!(input.tasks.len(), 4, "DONE task must be dropped");
    // Saturday's sleep entry and Sunday's MRR belong to last week
    assert_eq!(input.metrics.len(), 6);

    let d = build_dashboard(&input, now(), &DashboardConfig::default());

    let ranking: Vec<(&str, i64)> = d
        .next_actions
        .iter()
        .map(|t| (t.id.as_str(), t.priority_score))
        .collect();
    assert_eq!(
        ranking,
        [
            ("t-investor-update", 280),
            ("t-pricing", 250),
            ("t-hiring", 245),
            ("t-bookmarks", 30),
        ]
    );

    assert_eq!(
        d.one_thing.as_ref().map(|t| t.id.as_str()),
        Some("t-investor-update")
    );

    // only two sleep entries this week: too sparse for a sleep-debt alert
    let kinds: Vec<AlertType> = d.alerts.iter().map(|a| a.alert_type).collect();
    assert_eq!(kinds, [AlertType::Overdue, AlertType::Stagnating]);
    assert_eq!(d.alerts[0].title, "1 overdue task");

    let m = d.momentum_score;
    assert_eq!(m.metrics.deep_work_hours, 10.0);
    assert_eq!(m.metrics.output_count, 2.0);
    assert_eq!(m.metrics.exercise_sessions, 2.0);
    assert_eq!(m.breakdown.deep_work_score, 15);
    assert_eq!(m.breakdown.output_score, 10);
    assert_eq!(m.breakdown.sleep_score, -18);
    assert_eq!(m.breakdown.exercise_score, 6);
    assert_eq!(m.score, 13);

    let today: Vec<&str> = d.today_tasks.iter().map(|t| t.id.as_str()).collect();
    let upcoming: Vec<&str> = d.upcoming_tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(today, ["t-hiring"]);
    assert_eq!(upcoming, ["t-pricing"]);
}

#[test]
fn test_csv_metrics_merge_into_snapshot() {
    let mut snapshot = load_snapshot(fixture("snapshot.json")).unwrap();
    let extra = parse_metrics_csv(fixture("metrics.csv")).unwrap();
    assert_eq!(extra.len(), 2);

    snapshot.extend_metrics(extra);
    let input = snapshot.dashboard_input(now());
    let d = build_dashboard(&input, now(), &DashboardConfig::default());

    assert_eq!(d.momentum_score.metrics.deep_work_hours, 20.0);
    assert_eq!(d.momentum_score.metrics.output_count, 5.0);
    assert_eq!(d.momentum_score.score, 43);
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_snapshot(fixture("nope.json")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}
