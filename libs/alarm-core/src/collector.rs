//! Paginated alarm collection for a single region

use errors::{RemoteError, ScanError, ScanResult};
use std::time::Duration;
use tracing::debug;

use crate::directory::{AlarmDirectory, DescribeAlarmsRequest};
use crate::domain::AlarmRecord;

/// Page size cap sent with every request
pub const DEFAULT_PAGE_SIZE: i32 = 100;

/// Default budget for one region's whole request sequence
pub const DEFAULT_REGION_TIMEOUT: Duration = Duration::from_secs(20);

/// Parameters shared by every region's collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    pub name_prefix: Option<String>,
    pub page_size: i32,
    /// Budget for the whole pagination sequence of one region
    pub timeout: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            name_prefix: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_REGION_TIMEOUT,
        }
    }
}

/// Collect every alarm in `region`, following continuation tokens
///
/// The first failed request aborts the region (no retry). The timeout covers
/// the whole sequence; when it fires only this region's in-flight pagination
/// is dropped.
pub async fn collect_region(
    directory: &dyn AlarmDirectory,
    region: &str,
    options: &CollectOptions,
) -> ScanResult<Vec<AlarmRecord>> {
    match tokio::time::timeout(options.timeout, paginate(directory, region, options)).await {
        Ok(result) => result,
        Err(_) => Err(ScanError::timeout(region, options.timeout)),
    }
}

async fn paginate(
    directory: &dyn AlarmDirectory,
    region: &str,
    options: &CollectOptions,
) -> ScanResult<Vec<AlarmRecord>> {
    let name_prefix = options.name_prefix.clone().filter(|p| !p.is_empty());
    let mut out = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = DescribeAlarmsRequest {
            name_prefix: name_prefix.clone(),
            page_size: options.page_size,
            next_token: next_token.take(),
        };

        let page = directory
            .describe_alarms(region, &request)
            .await
            .map_err(|e| retarget(e, region))?;
        pages += 1;
        debug!("{}: page {} returned {} alarms", region, pages, page.alarms.len());

        out.extend(
            page.alarms
                .into_iter()
                .map(|alarm| AlarmRecord::from_remote(region, alarm)),
        );

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    Ok(out)
}

/// Make sure the error names the region being scanned
fn retarget(mut error: RemoteError, region: &str) -> ScanError {
    if error.target != region {
        error.target = region.to_string();
    }
    ScanError::Remote(error)
}
