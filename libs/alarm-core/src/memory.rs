//! In-memory directory implementations
//!
//! Scriptable stand-ins for the remote services. Each region can serve a
//! fixed sequence of pages, fail on a given page, or never answer. Every
//! request is recorded so tests can assert on call counts and parameters.

use async_trait::async_trait;
use errors::RemoteError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::directory::{
    AlarmDirectory, AlarmPage, DescribeAlarmsRequest, RegionDirectory, RegionEntry, RemoteAlarm,
};

/// In-memory region directory
pub struct MemoryRegionDirectory {
    entries: Vec<RegionEntry>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MemoryRegionDirectory {
    pub fn new(entries: Vec<RegionEntry>) -> Self {
        Self {
            entries,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Directory whose every query fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `list_regions` calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegionDirectory for MemoryRegionDirectory {
    async fn list_regions(&self, _include_all: bool) -> Result<Vec<RegionEntry>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(RemoteError::service("region-directory", message.clone())),
            None => Ok(self.entries.clone()),
        }
    }
}

/// Scripted behaviour of one region
#[derive(Debug, Clone)]
enum RegionScript {
    /// Serve these pages in order; failure (if any) replaces page `at`
    Pages {
        pages: Vec<Vec<RemoteAlarm>>,
        fail_at: Option<(usize, String)>,
    },
    /// Never answer
    Hang,
}

/// In-memory alarm directory with token-based pagination
///
/// Continuation tokens are `"page-<n>"`; the last page carries no token.
/// Regions without a script answer with a single empty page.
#[derive(Default)]
pub struct MemoryAlarmDirectory {
    regions: HashMap<String, RegionScript>,
    requests: Mutex<Vec<(String, DescribeAlarmsRequest)>>,
}

impl MemoryAlarmDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` for `region`
    pub fn with_pages(mut self, region: &str, pages: Vec<Vec<RemoteAlarm>>) -> Self {
        self.regions.insert(
            region.to_string(),
            RegionScript::Pages {
                pages,
                fail_at: None,
            },
        );
        self
    }

    /// Serve all alarms for `region` split into pages of `page_size`
    pub fn with_alarms(self, region: &str, alarms: Vec<RemoteAlarm>, page_size: usize) -> Self {
        let pages = alarms
            .chunks(page_size.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        self.with_pages(region, pages)
    }

    /// Serve `pages` but fail the request for page index `at`
    pub fn with_failure_at(
        mut self,
        region: &str,
        pages: Vec<Vec<RemoteAlarm>>,
        at: usize,
        message: impl Into<String>,
    ) -> Self {
        self.regions.insert(
            region.to_string(),
            RegionScript::Pages {
                pages,
                fail_at: Some((at, message.into())),
            },
        );
        self
    }

    /// Fail the first request for `region`
    pub fn with_failure(self, region: &str, message: impl Into<String>) -> Self {
        self.with_failure_at(region, Vec::new(), 0, message)
    }

    /// Never answer requests for `region`
    pub fn with_hang(mut self, region: &str) -> Self {
        self.regions.insert(region.to_string(), RegionScript::Hang);
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<(String, DescribeAlarmsRequest)> {
        self.requests.lock().clone()
    }

    /// Number of requests received for `region`
    pub fn request_count(&self, region: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|(r, _)| r == region)
            .count()
    }

    fn page_index(region: &str, token: Option<&str>) -> Result<usize, RemoteError> {
        match token {
            None => Ok(0),
            Some(t) => t
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| {
                    RemoteError::service(region, format!("invalid continuation token: {}", t))
                }),
        }
    }
}

#[async_trait]
impl AlarmDirectory for MemoryAlarmDirectory {
    async fn describe_alarms(
        &self,
        region: &str,
        request: &DescribeAlarmsRequest,
    ) -> Result<AlarmPage, RemoteError> {
        self.requests
            .lock()
            .push((region.to_string(), request.clone()));

        let (pages, fail_at) = match self.regions.get(region) {
            None => return Ok(AlarmPage::default()),
            Some(RegionScript::Hang) => return std::future::pending().await,
            Some(RegionScript::Pages { pages, fail_at }) => (pages, fail_at),
        };

        let index = Self::page_index(region, request.next_token.as_deref())?;
        if let Some((at, message)) = fail_at {
            if *at == index {
                return Err(RemoteError::service(region, message.clone()));
            }
        }

        let alarms: Vec<RemoteAlarm> = pages
            .get(index)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|a| match &request.name_prefix {
                Some(prefix) => a.name.as_deref().unwrap_or("").starts_with(prefix.as_str()),
                None => true,
            })
            .collect();

        let next_token = if index + 1 < pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };

        Ok(AlarmPage { alarms, next_token })
    }
}

/// Remote alarm with a name, a state, enabled actions and one alarm action
pub fn remote_alarm(name: &str, state: &str) -> RemoteAlarm {
    RemoteAlarm {
        name: Some(name.to_string()),
        state: Some(state.to_string()),
        actions_enabled: Some(true),
        alarm_actions: 1,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_and_tokens() {
        let directory = MemoryAlarmDirectory::new().with_pages(
            "us-east-1",
            vec![
                vec![remote_alarm("a", "OK")],
                vec![remote_alarm("b", "OK")],
            ],
        );
        let mut request = DescribeAlarmsRequest {
            page_size: 100,
            ..Default::default()
        };

        let first = directory.describe_alarms("us-east-1", &request).await.unwrap();
        assert_eq!(first.next_token.as_deref(), Some("page-1"));

        request.next_token = first.next_token;
        let second = directory.describe_alarms("us-east-1", &request).await.unwrap();
        assert_eq!(second.alarms[0].name.as_deref(), Some("b"));
        assert_eq!(second.next_token, None);
        assert_eq!(directory.request_count("us-east-1"), 2);
    }

    #[tokio::test]
    async fn test_unknown_region_is_empty() {
        let directory = MemoryAlarmDirectory::new();
        let page = directory
            .describe_alarms("eu-north-1", &DescribeAlarmsRequest::default())
            .await
            .unwrap();
        assert_eq!(page, AlarmPage::default());
    }

    #[tokio::test]
    async fn test_failing_region_directory() {
        let directory = MemoryRegionDirectory::failing("UnauthorizedOperation");
        let err = directory.list_regions(true).await.unwrap_err();
        assert!(!err.is_timeout());
        assert_eq!(directory.call_count(), 1);
    }
}
