//! Record builders shared by the domain unit tests

use super::record::{AlarmRecord, AlarmState};

/// Build a record with `[alarm, ok, insufficient]` action counts
pub fn record(
    region: &str,
    name: &str,
    state: AlarmState,
    actions_enabled: bool,
    counts: [usize; 3],
) -> AlarmRecord {
    AlarmRecord {
        region: region.to_string(),
        name: name.to_string(),
        state,
        actions_enabled,
        alarm_action_count: counts[0],
        ok_action_count: counts[1],
        insufficient_action_count: counts[2],
        last_state_change: None,
    }
}

/// OK state, actions enabled, one alarm action
pub fn healthy(region: &str, name: &str) -> AlarmRecord {
    record(region, name, AlarmState::Ok, true, [1, 0, 0])
}
