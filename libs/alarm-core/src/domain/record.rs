use chrono::{DateTime, Utc};
use errors::ScanError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::directory::RemoteAlarm;

/// Alarm state as reported by the monitoring service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlarmState {
    /// Metric within threshold
    Ok,
    /// Metric breached threshold
    Alarm,
    /// Not enough data to evaluate
    InsufficientData,
    /// Any other value the service may return
    Unknown(String),
}

impl AlarmState {
    /// States accepted by [`AlarmState::from_str`]
    pub const VALID: [&'static str; 3] = ["OK", "ALARM", "INSUFFICIENT_DATA"];

    /// Map a raw service value; never fails
    pub fn from_remote(value: &str) -> Self {
        match value {
            "OK" => Self::Ok,
            "ALARM" => Self::Alarm,
            "INSUFFICIENT_DATA" => Self::InsufficientData,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Alarm => "ALARM",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user-supplied filter values (case-sensitive)
impl FromStr for AlarmState {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_remote(s) {
            Self::Unknown(_) => Err(ScanError::validation(
                "state",
                s,
                format!("Must be one of: {}", Self::VALID.join(", ")),
            )),
            state => Ok(state),
        }
    }
}

impl Serialize for AlarmState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One alarm definition observed in one region
///
/// Only action counts are kept, never the action targets themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub region: String,
    pub name: String,
    pub state: AlarmState,
    pub actions_enabled: bool,
    pub alarm_action_count: usize,
    pub ok_action_count: usize,
    pub insufficient_action_count: usize,
    /// `None` when the service never reported a state change
    pub last_state_change: Option<DateTime<Utc>>,
}

impl AlarmRecord {
    /// Map a remote alarm into a record tagged with its region
    pub fn from_remote(region: &str, remote: RemoteAlarm) -> Self {
        Self {
            region: region.to_string(),
            name: remote.name.unwrap_or_default(),
            state: remote
                .state
                .as_deref()
                .map(AlarmState::from_remote)
                .unwrap_or_else(|| AlarmState::Unknown(String::new())),
            actions_enabled: remote.actions_enabled.unwrap_or(false),
            alarm_action_count: remote.alarm_actions,
            ok_action_count: remote.ok_actions,
            insufficient_action_count: remote.insufficient_data_actions,
            last_state_change: remote.state_updated,
        }
    }

    /// True when no action of any kind is configured
    pub fn has_no_actions(&self) -> bool {
        self.alarm_action_count == 0
            && self.ok_action_count == 0
            && self.insufficient_action_count == 0
    }
}
