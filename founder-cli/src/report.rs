//! Plain-text rendering of engine results for the terminal.

use chrono::{DateTime, Utc};
use founder_core::{
    score_breakdown, Alert, Dashboard, MomentumScoreResult, PrioritizedTask, Severity, Task,
};
use std::fmt::Write;

pub fn render_dashboard(d: &Dashboard, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Dashboard ({})\n", now.format("%Y-%m-%d %H:%M UTC"));

    out.push_str("## The one thing\n\n");
    match &d.one_thing {
        Some(t) => {
            let _ = writeln!(out, "{}\n", task_line(t));
        }
        None => out.push_str("(no open tasks)\n\n"),
    }

    out.push_str("## Next actions\n\n");
    out.push_str(&render_ranking(&d.next_actions, None));
    out.push('\n');

    out.push_str("## Alerts\n\n");
    out.push_str(&render_alerts(&d.alerts));
    out.push('\n');

    out.push_str("## Momentum\n\n");
    out.push_str(&render_momentum(&d.momentum_score));
    out.push('\n');

    out.push_str("## Due today\n\n");
    out.push_str(&render_task_list(&d.today_tasks));
    out.push('\n');

    out.push_str("## Coming up\n\n");
    out.push_str(&render_task_list(&d.upcoming_tasks));
    out
}

/// With `explain`, each line is followed by its per-factor breakdown.
pub fn render_ranking(ranked: &[PrioritizedTask], explain: Option<DateTime<Utc>>) -> String {
    if ranked.is_empty() {
        return "(no tasks)\n".to_string();
    }

    let mut out = String::new();
    for (i, t) in ranked.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", i + 1, task_line(t));
        if let Some(now) = explain {
            let b = score_breakdown(&t.task, now);
            let _ = writeln!(
                out,
                "      impact={} priority={} due={} quick_win={} project={} stagnation={}",
                b.impact, b.priority, b.due, b.quick_win, b.project, b.stagnation
            );
        }
    }
    out
}

pub fn render_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "(all clear)\n".to_string();
    }

    let mut out = String::new();
    for a in alerts {
        let _ = writeln!(out, "- [{}] {}: {}", severity_label(a.severity), a.title, a.description);
    }
    out
}

pub fn render_momentum(m: &MomentumScoreResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Score: {}/100", m.score);
    let _ = writeln!(
        out,
        "- deep work: {:+} ({:.1}h)",
        m.breakdown.deep_work_score, m.metrics.deep_work_hours
    );
    let _ = writeln!(
        out,
        "- output:    {:+} ({} shipped)",
        m.breakdown.output_score, m.metrics.output_count
    );
    let _ = writeln!(
        out,
        "- sleep:     {:+} ({:.1}h avg)",
        m.breakdown.sleep_score, m.metrics.sleep_average
    );
    let _ = writeln!(
        out,
        "- exercise:  {:+} ({} sessions)",
        m.breakdown.exercise_score, m.metrics.exercise_sessions
    );
    out
}

fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "(none)\n".to_string();
    }

    let mut out = String::new();
    for t in tasks {
        let due = t
            .due_date
            .map(|d| d.format("%a %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "- {} ({due})", t.title);
    }
    out
}

fn task_line(t: &PrioritizedTask) -> String {
    format!(
        "[{:>4}] {} (impact {}, priority {}, {:?})",
        t.priority_score, t.title, t.impact, t.priority, t.status
    )
}

fn severity_label(s: Severity) -> &'static str {
    match s {
        Severity::Low => "low",
        Severity::Medium => "MED",
        Severity::High => "HIGH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use founder_core::{
        build_dashboard, generate_alerts, prioritize_tasks, DashboardConfig, DashboardInput,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_ranking_lines_and_explain() {
        let tasks = vec![
            Task::new("a", "Call lawyer").with_impact(5),
            Task::new("b", "Inbox zero").with_impact(1),
        ];
        let ranked = prioritize_tasks(&tasks, now());

        let plain = render_ranking(&ranked, None);
        assert_eq!(plain.lines().count(), 2);
        assert!(plain.starts_with(" 1. [ 130] Call lawyer"));

        let explained = render_ranking(&ranked, Some(now()));
        assert_eq!(explained.lines().count(), 4);
        assert!(explained.contains("impact=100 priority=30 due=0"));
    }

    #[test]
    fn test_alert_lines() {
        let tasks = vec![Task::new("a", "late").with_due(now() - Duration::days(2))];
        let text = render_alerts(&generate_alerts(&tasks, &[], &[], now()));
        assert_eq!(text, "- [HIGH] 1 overdue task: You have 1 task past their due date\n");
        assert_eq!(render_alerts(&[]), "(all clear)\n");
    }

    #[test]
    fn test_empty_dashboard_renders_every_section() {
        let d = build_dashboard(&DashboardInput::default(), now(), &DashboardConfig::default());
        let text = render_dashboard(&d, now());
        let headings = [
            "The one thing",
            "Next actions",
            "Alerts",
            "Momentum",
            "Due today",
            "Coming up",
        ];
        for heading in headings {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Score: 0/100"));
    }
}
