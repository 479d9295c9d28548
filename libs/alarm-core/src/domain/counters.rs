use serde::Serialize;

use super::classification::is_problematic;
use super::record::{AlarmRecord, AlarmState};

/// Problem counts over a list of records
///
/// Always recomputed from the list it is given, raw or filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProblemCounters {
    pub problematic: usize,
    pub in_alarm: usize,
    pub insufficient_data: usize,
    pub actions_disabled: usize,
    pub no_actions: usize,
}

impl ProblemCounters {
    /// Count problem types in a single pass
    pub fn count(records: &[AlarmRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            if is_problematic(record) {
                counts.problematic += 1;
            }
            match record.state {
                AlarmState::Alarm => counts.in_alarm += 1,
                AlarmState::InsufficientData => counts.insufficient_data += 1,
                _ => {},
            }
            if !record.actions_enabled {
                counts.actions_disabled += 1;
            }
            if record.has_no_actions() {
                counts.no_actions += 1;
            }
        }
        counts
    }
}
