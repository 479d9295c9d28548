//! Trait definitions for the remote directories
//!
//! Implementations:
//! - AWS adapters in the `alarmscan` tool (EC2 regions, CloudWatch alarms)
//! - [`crate::memory`]: in-memory directories for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use errors::RemoteError;

/// Per-region account enablement as reported by the region directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptInStatus {
    OptedIn,
    OptInNotRequired,
    NotOptedIn,
    Other(String),
}

impl OptInStatus {
    pub fn from_remote(value: &str) -> Self {
        match value {
            "opted-in" => Self::OptedIn,
            "opt-in-not-required" => Self::OptInNotRequired,
            "not-opted-in" => Self::NotOptedIn,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the account can use a region with this status
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::OptedIn | Self::OptInNotRequired)
    }
}

/// One entry returned by the region directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEntry {
    pub name: String,
    /// `None` when the directory does not report a status
    pub opt_in_status: Option<OptInStatus>,
}

impl RegionEntry {
    pub fn new(name: impl Into<String>, opt_in_status: Option<OptInStatus>) -> Self {
        Self {
            name: name.into(),
            opt_in_status,
        }
    }
}

/// A single page request against the alarm directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeAlarmsRequest {
    pub name_prefix: Option<String>,
    pub page_size: i32,
    /// Absent on the first request
    pub next_token: Option<String>,
}

/// Remote alarm as returned by the alarm directory, before mapping
///
/// Action lists are reduced to their lengths at the adapter boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAlarm {
    pub name: Option<String>,
    pub state: Option<String>,
    pub actions_enabled: Option<bool>,
    pub alarm_actions: usize,
    pub ok_actions: usize,
    pub insufficient_data_actions: usize,
    pub state_updated: Option<DateTime<Utc>>,
}

/// One page of alarms plus the continuation token, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmPage {
    pub alarms: Vec<RemoteAlarm>,
    pub next_token: Option<String>,
}

/// Region directory (e.g. EC2 DescribeRegions)
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    /// List regions known to the directory
    async fn list_regions(&self, include_all: bool) -> Result<Vec<RegionEntry>, RemoteError>;
}

/// Alarm directory (e.g. CloudWatch DescribeAlarms)
///
/// Implementations derive a region-specific client from their shared
/// configuration on each call.
#[async_trait]
pub trait AlarmDirectory: Send + Sync {
    /// Fetch one page of alarms from `region`
    async fn describe_alarms(
        &self,
        region: &str,
        request: &DescribeAlarmsRequest,
    ) -> Result<AlarmPage, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_in_status_usable() {
        assert!(OptInStatus::from_remote("opted-in").is_usable());
        assert!(OptInStatus::from_remote("opt-in-not-required").is_usable());
        assert!(!OptInStatus::from_remote("not-opted-in").is_usable());
        assert_eq!(
            OptInStatus::from_remote("pending"),
            OptInStatus::Other("pending".to_string())
        );
        assert!(!OptInStatus::from_remote("pending").is_usable());
    }
}
