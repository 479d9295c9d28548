//! Alarm domain model and the pure classification/filter engine

pub mod classification;
pub mod counters;
pub mod filter;
pub mod record;

#[cfg(test)]
mod fixtures;

pub use classification::{is_problematic, sort_records};
pub use counters::ProblemCounters;
pub use filter::{apply_filters, FilterCriteria};
pub use record::{AlarmRecord, AlarmState};
