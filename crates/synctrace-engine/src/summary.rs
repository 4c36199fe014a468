use serde::{Deserialize, Serialize};

use synctrace_types::{LogAnalysis, PolicyStatus};

/// Policy execution counts by derived status.
///
/// A pure function of the analysis; callers re-derive it on demand
/// instead of storing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub failed: usize,
    pub warning: usize,
    pub running: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.completed + self.failed + self.warning + self.running
    }
}

/// Count policy executions by status across all events.
pub fn status_counts(analysis: &LogAnalysis) -> StatusCounts {
    let mut counts = StatusCounts::default();

    for event in &analysis.events {
        for policy in &event.policies {
            match policy.status {
                PolicyStatus::Completed => counts.completed += 1,
                PolicyStatus::Failed => counts.failed += 1,
                PolicyStatus::Warning => counts.warning += 1,
                PolicyStatus::Running => counts.running += 1,
            }
        }
    }

    counts
}
