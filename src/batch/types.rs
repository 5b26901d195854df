use crate::job::{JobRecord, JobState};
use serde::{Deserialize, Serialize};

/// Default number of conversions allowed to run at once.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 3;

/// Counts over every job a coordinator has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub pending: usize,
    pub running: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a JobRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            match record.status.state {
                JobState::Pending => summary.pending += 1,
                JobState::Running => summary.running += 1,
                JobState::Succeeded => summary.succeeded += 1,
                JobState::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn is_idle(&self) -> bool {
        self.pending == 0 && self.running == 0
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Outcomes of the jobs finished since the coordinator was last idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BatchTally {
    pub succeeded: usize,
    pub failed: usize,
}
