//! Scan settings
//!
//! Loaded from defaults, an optional config file and `ALARMSCAN_*`
//! environment variables; command-line flags are applied last.

use alarm_core::{CollectOptions, DEFAULT_PAGE_SIZE, DEFAULT_REGION_TIMEOUT};
use errors::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "ALARMSCAN_";

/// Largest page the alarm directory accepts
pub const MAX_PAGE_SIZE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Named credentials profile
    pub profile: Option<String>,
    /// Comma-separated regions; all usable regions when unset
    pub regions: Option<String>,
    /// Region used for the region directory query
    pub home_region: Option<String>,
    /// Budget for each region's collection
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub page_size: i32,
    pub name_prefix: Option<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            profile: None,
            regions: None,
            home_region: None,
            timeout: DEFAULT_REGION_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            name_prefix: None,
        }
    }
}

impl ScanSettings {
    /// Load settings from an optional file plus the environment
    pub fn load(file: Option<&Path>) -> ScanResult<Self> {
        let settings: Self = common::load_layered(file, ENV_PREFIX)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ScanResult<()> {
        if self.timeout.is_zero() {
            return Err(ScanError::config("timeout must be greater than zero"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ScanError::config(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        Ok(())
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            name_prefix: self.name_prefix.clone(),
            page_size: self.page_size,
            timeout: self.timeout,
        }
    }
}
