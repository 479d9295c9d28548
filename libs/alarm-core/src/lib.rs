//! Alarm inventory engine
//!
//! Collects monitoring-alarm definitions from a set of regions, classifies
//! each alarm as healthy or problematic, and produces the filtered, sorted,
//! counted [`Report`] that the renderers consume.
//!
//! Data flow:
//! region resolution → per-region paginated collection (sequential) →
//! classification / filter / sort / count → report.
//!
//! Remote services are reached through the [`RegionDirectory`] and
//! [`AlarmDirectory`] traits. Production adapters live in the CLI;
//! [`memory`] provides in-memory directories for tests.

pub mod collector;
pub mod directory;
pub mod domain;
pub mod memory;
pub mod regions;
pub mod report;
pub mod scan;

pub use collector::{collect_region, CollectOptions, DEFAULT_PAGE_SIZE, DEFAULT_REGION_TIMEOUT};
pub use directory::{
    AlarmDirectory, AlarmPage, DescribeAlarmsRequest, OptInStatus, RegionDirectory, RegionEntry,
    RemoteAlarm,
};
pub use domain::{
    apply_filters, is_problematic, sort_records, AlarmRecord, AlarmState, FilterCriteria,
    ProblemCounters,
};
pub use errors::{RemoteError, ScanError, ScanResult};
pub use regions::{home_region, parse_region_list, resolve_regions, DEFAULT_HOME_REGION};
pub use report::Report;
pub use scan::{scan_regions, RegionFailure, ScanOutcome};
