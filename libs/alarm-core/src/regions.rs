//! Region resolution
//!
//! Regions come either from an explicit comma-separated list or from the
//! region directory, filtered to the ones the account can use. The result
//! is always sorted so scan order and error ordering are reproducible.

use errors::{ScanError, ScanResult};
use tracing::{debug, info};

use crate::directory::RegionDirectory;

/// Region used to query the region directory when none is configured
pub const DEFAULT_HOME_REGION: &str = "us-east-1";

/// Region to send the directory query to
pub fn home_region(configured: Option<&str>) -> &str {
    match configured.map(str::trim) {
        Some(region) if !region.is_empty() => region,
        _ => DEFAULT_HOME_REGION,
    }
}

/// Parse a comma-separated region list
///
/// Entries are trimmed and empty entries dropped; order is preserved and
/// duplicates are kept.
pub fn parse_region_list(csv: &str) -> ScanResult<Vec<String>> {
    let regions: Vec<String> = csv
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    if regions.is_empty() {
        return Err(ScanError::config("no valid regions in --regions"));
    }
    Ok(regions)
}

/// Resolve the set of regions to scan, sorted lexicographically
///
/// A non-blank `explicit` list wins; otherwise the directory is queried once.
/// Directory entries with an empty name or an unusable opt-in status are
/// skipped. Entries without any status are kept.
pub async fn resolve_regions(
    explicit: Option<&str>,
    directory: &dyn RegionDirectory,
) -> ScanResult<Vec<String>> {
    let mut regions = match explicit {
        Some(csv) if !csv.trim().is_empty() => parse_region_list(csv)?,
        _ => {
            let entries = directory.list_regions(true).await?;
            debug!("Region directory returned {} entries", entries.len());

            let usable: Vec<String> = entries
                .into_iter()
                .filter(|e| !e.name.is_empty())
                .filter(|e| e.opt_in_status.as_ref().map_or(true, |s| s.is_usable()))
                .map(|e| e.name)
                .collect();

            if usable.is_empty() {
                return Err(ScanError::config("region directory returned 0 usable regions"));
            }
            usable
        },
    };

    regions.sort();
    info!("Resolved {} regions", regions.len());
    Ok(regions)
}
