//! User filter criteria and their conjunctive application

use chrono::{DateTime, Duration, Utc};

use super::classification::is_problematic;
use super::record::{AlarmRecord, AlarmState};

/// Snapshot of the user's selection options
///
/// Every criterion is independent; all active criteria must pass (logical AND).
/// The default value filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep only problematic alarms
    pub only_problematic: bool,
    /// Keep only alarms in exactly this state
    pub state_equals: Option<AlarmState>,
    /// Keep only alarms with no actions configured
    pub require_no_actions: bool,
    /// Keep only alarms whose actions are disabled
    pub require_actions_disabled: bool,
    /// Keep only alarms unchanged for at least this long; zero means inactive
    pub stale_threshold: Option<Duration>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only_problematic(mut self, enabled: bool) -> Self {
        self.only_problematic = enabled;
        self
    }

    pub fn state_equals(mut self, state: Option<AlarmState>) -> Self {
        self.state_equals = state;
        self
    }

    pub fn require_no_actions(mut self, enabled: bool) -> Self {
        self.require_no_actions = enabled;
        self
    }

    pub fn require_actions_disabled(mut self, enabled: bool) -> Self {
        self.require_actions_disabled = enabled;
        self
    }

    pub fn stale_threshold(mut self, threshold: Option<Duration>) -> Self {
        self.stale_threshold = threshold;
        self
    }

    /// Stale threshold, if the criterion is active
    pub fn active_stale_threshold(&self) -> Option<Duration> {
        self.stale_threshold.filter(|d| *d > Duration::zero())
    }

    /// Whether a single record passes every active criterion
    pub fn matches(&self, record: &AlarmRecord, now: DateTime<Utc>) -> bool {
        if self.only_problematic && !is_problematic(record) {
            return false;
        }

        if let Some(state) = &self.state_equals {
            if record.state != *state {
                return false;
            }
        }

        if self.require_no_actions && !record.has_no_actions() {
            return false;
        }

        if self.require_actions_disabled && record.actions_enabled {
            return false;
        }

        if let Some(threshold) = self.active_stale_threshold() {
            // Unknown last change never counts as stale
            match record.last_state_change {
                Some(changed) if now - changed >= threshold => {},
                _ => return false,
            }
        }

        true
    }

    /// Flag-style descriptions of the active criteria, in a fixed order
    pub fn describe(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if self.only_problematic {
            reasons.push("--only-broken".to_string());
        }
        if let Some(state) = &self.state_equals {
            reasons.push(format!("--state={}", state));
        }
        if self.require_no_actions {
            reasons.push("--no-actions".to_string());
        }
        if self.require_actions_disabled {
            reasons.push("--actions-disabled".to_string());
        }
        if let Some(threshold) = self.active_stale_threshold() {
            let std = threshold.to_std().unwrap_or_default();
            reasons.push(format!("--stale={}", humantime::format_duration(std)));
        }
        reasons
    }
}

/// Apply all filters, preserving input order
pub fn apply_filters(
    records: &[AlarmRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<AlarmRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r, now))
        .cloned()
        .collect()
}
