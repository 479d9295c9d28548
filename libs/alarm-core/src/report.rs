//! Report model handed to the renderers

use chrono::{DateTime, Utc};

use crate::domain::{apply_filters, sort_records, AlarmRecord, FilterCriteria, ProblemCounters};

/// Filtered, sorted and counted result of a run
///
/// Renderers only format this; every decision is made here.
#[derive(Debug, Clone)]
pub struct Report {
    /// Rows that passed the filters, problematic first
    pub rows: Vec<AlarmRecord>,
    /// Number of records collected before filtering
    pub total_alarms: usize,
    /// Counters over `rows` (the post-filter list)
    pub counters: ProblemCounters,
    /// Flag-style descriptions of the active filters
    pub active_filters: Vec<String>,
    /// Criteria the report was built with
    pub criteria: FilterCriteria,
    /// Reference time used for staleness and "last changed" strings
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Filter, sort and count `records` as of `now`
    pub fn build(records: &[AlarmRecord], criteria: &FilterCriteria, now: DateTime<Utc>) -> Self {
        let mut rows = apply_filters(records, criteria, now);
        sort_records(&mut rows);
        let counters = ProblemCounters::count(&rows);

        Self {
            rows,
            total_alarms: records.len(),
            counters,
            active_filters: criteria.describe(),
            criteria: criteria.clone(),
            generated_at: now,
        }
    }

    pub fn shown(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The problematic count is redundant when only problematic rows are shown
    pub fn shows_problematic_count(&self) -> bool {
        !self.criteria.only_problematic
    }
}
