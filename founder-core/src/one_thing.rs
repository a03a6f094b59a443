//! One-Thing Selector: the single recommended next action.

use crate::prioritizer::PrioritizedTask;

/// Minimum impact for a task to qualify as "the one thing" ahead of the ranking.
pub const ONE_THING_MIN_IMPACT: i32 = 4;

/// Pick from an already-ranked list: the best high-impact actionable task, else the
/// top of the ranking, else `None`.
pub fn get_one_thing(ranked: &[PrioritizedTask]) -> Option<&PrioritizedTask> {
    ranked
        .iter()
        .find(|t| t.impact >= ONE_THING_MIN_IMPACT && t.status.is_actionable())
        .or_else(|| ranked.first())
}
