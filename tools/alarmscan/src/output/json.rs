//! Structured (JSON) rendering of a report

use alarm_core::{AlarmRecord, Report};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::duration::format_last_changed;

#[derive(Debug, Serialize)]
pub struct AlarmJson {
    pub region: String,
    pub name: String,
    pub state: String,
    pub enabled: bool,
    pub alarm_actions: usize,
    pub ok_actions: usize,
    pub insufficient_actions: usize,
    pub last_changed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed_iso: Option<String>,
}

impl AlarmJson {
    fn from_record(record: &AlarmRecord, now: DateTime<Utc>) -> Self {
        Self {
            region: record.region.clone(),
            name: record.name.clone(),
            state: record.state.to_string(),
            enabled: record.actions_enabled,
            alarm_actions: record.alarm_action_count,
            ok_actions: record.ok_action_count,
            insufficient_actions: record.insufficient_action_count,
            last_changed: format_last_changed(record.last_state_change, now),
            last_changed_iso: record
                .last_state_change
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryJson {
    pub total_alarms: usize,
    pub alarms_shown: usize,
    /// Omitted when only problematic alarms are shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problematic_alarms: Option<usize>,
    pub in_alarm_state: usize,
    pub insufficient_data_state: usize,
    pub actions_disabled: usize,
    pub no_actions_configured: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub alarms: Vec<AlarmJson>,
    pub summary: SummaryJson,
}

impl From<&Report> for JsonReport {
    fn from(report: &Report) -> Self {
        let counters = &report.counters;
        Self {
            alarms: report
                .rows
                .iter()
                .map(|r| AlarmJson::from_record(r, report.generated_at))
                .collect(),
            summary: SummaryJson {
                total_alarms: report.total_alarms,
                alarms_shown: report.shown(),
                problematic_alarms: report
                    .shows_problematic_count()
                    .then_some(counters.problematic),
                in_alarm_state: counters.in_alarm,
                insufficient_data_state: counters.insufficient_data,
                actions_disabled: counters.actions_disabled,
                no_actions_configured: counters.no_actions,
            },
        }
    }
}

/// Pretty-printed JSON document for `report`
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(report))
}
