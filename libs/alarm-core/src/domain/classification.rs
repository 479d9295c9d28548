//! Fixed problematic-alarm policy and report ordering

use super::record::{AlarmRecord, AlarmState};

/// Check if an alarm is problematic
///
/// The policy is fixed and not configurable. An alarm is problematic if ANY of:
/// 1. its state is ALARM or INSUFFICIENT_DATA
/// 2. its actions are disabled
/// 3. it has no actions configured at all
///
/// Disabled actions and missing actions weigh the same as an alarm firing.
pub fn is_problematic(record: &AlarmRecord) -> bool {
    matches!(
        record.state,
        AlarmState::Alarm | AlarmState::InsufficientData
    ) || !record.actions_enabled
        || record.has_no_actions()
}

/// Sort rows: problematic first, then by region, then by name
///
/// Problematic rows form one partition and are not ranked by severity.
/// `(region, name)` is unique within a run, so the order is total.
pub fn sort_records(records: &mut [AlarmRecord]) {
    records.sort_by(|a, b| {
        is_problematic(b)
            .cmp(&is_problematic(a))
            .then_with(|| a.region.cmp(&b.region))
            .then_with(|| a.name.cmp(&b.name))
    });
}
