//! Sequential multi-region scan
//!
//! Regions are collected one at a time in the order given (callers pass the
//! sorted output of region resolution). A failed or timed-out region is
//! recorded and skipped; the run itself never aborts.

use errors::ScanError;
use tracing::{info, warn};

use crate::collector::{collect_region, CollectOptions};
use crate::directory::AlarmDirectory;
use crate::domain::AlarmRecord;

/// A region whose collection failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFailure {
    pub region: String,
    pub error: ScanError,
}

/// Combined result of a multi-region scan
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Records from every successful region, in scan order
    pub records: Vec<AlarmRecord>,
    /// Failed regions, in scan order
    pub failures: Vec<RegionFailure>,
    /// Regions that contributed records (possibly zero of them)
    pub succeeded: Vec<String>,
}

impl ScanOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Scan `regions` one after another
pub async fn scan_regions(
    directory: &dyn AlarmDirectory,
    regions: &[String],
    options: &CollectOptions,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for region in regions {
        match collect_region(directory, region, options).await {
            Ok(records) => {
                info!("{}: {} alarms", region, records.len());
                outcome.records.extend(records);
                outcome.succeeded.push(region.clone());
            },
            Err(error) => {
                // Don't fail the entire run; just record the region error
                warn!("region {} skipped: {} ({})", region, error, error.error_code());
                outcome.failures.push(RegionFailure {
                    region: region.clone(),
                    error,
                });
            },
        }
    }

    outcome
}
