//! founder-core: productivity scoring and prioritization engine.
//!
//! Every entry point is a pure function of the snapshot it is given and an explicit
//! `now`. Nothing here reads the clock, touches storage, or filters by user.

pub mod alerts;
pub mod dashboard;
pub mod metric;
pub mod momentum;
pub mod one_thing;
pub mod prioritizer;
pub mod scoring;
pub mod task;
pub mod time;

pub use alerts::{generate_alerts, Alert, AlertType, Severity};
pub use dashboard::{build_dashboard, Dashboard, DashboardConfig, DashboardInput};
pub use metric::{HabitLog, Metric, MetricType};
pub use momentum::{
    calculate_momentum, calculate_momentum_default, MomentumAggregates, MomentumBreakdown,
    MomentumConfig, MomentumScoreResult,
};
pub use one_thing::get_one_thing;
pub use prioritizer::{prioritize_tasks, PrioritizedTask};
pub use scoring::{score_breakdown, score_task, ScoreBreakdown};
pub use task::{Task, TaskStatus};
