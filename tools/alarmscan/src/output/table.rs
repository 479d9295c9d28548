use alarm_core::{AlarmRecord, AlarmState, Report};
use chrono::Duration;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use std::fmt::Write;

use super::format::truncate;
use crate::duration::format_last_changed;

const HEADERS: [&str; 8] = [
    "REGION",
    "ALARM_NAME",
    "STATE",
    "ENABLED",
    "ALARM ACTIONS",
    "OK ACTIONS",
    "INSUFFICIENT ACTIONS",
    "LAST CHANGED",
];

/// Age after which "last changed" is highlighted even without `--stale`
const AGING_AFTER_DAYS: i64 = 7;

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub max_name_width: Option<usize>,
    pub no_color: bool,
}

fn build_table(no_color: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    // Alarm names stay on one line so they can be copied
    table.set_content_arrangement(ContentArrangement::Disabled);
    if no_color {
        table.force_no_tty();
    }
    let cells: Vec<Cell> = HEADERS
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(cells);
    table
}

fn state_cell(state: &AlarmState) -> Cell {
    let cell = Cell::new(state);
    match state {
        AlarmState::Alarm => cell.fg(Color::Red),
        AlarmState::InsufficientData => cell.fg(Color::Yellow),
        _ => cell,
    }
}

fn row(record: &AlarmRecord, report: &Report, options: &TableOptions) -> Vec<Cell> {
    let name = match options.max_name_width {
        Some(max) => truncate(&record.name, max),
        None => record.name.clone(),
    };

    let enabled = if record.actions_enabled {
        Cell::new("YES")
    } else {
        Cell::new("NO").fg(Color::Red)
    };

    let mut alarm_actions = Cell::new(record.alarm_action_count);
    if record.alarm_action_count == 0 && record.state == AlarmState::Alarm {
        alarm_actions = alarm_actions.fg(Color::Red);
    }

    let mut last_changed = Cell::new(format_last_changed(
        record.last_state_change,
        report.generated_at,
    ));
    if let Some(changed) = record.last_state_change {
        let age = report.generated_at - changed;
        let stale = report
            .criteria
            .active_stale_threshold()
            .is_some_and(|threshold| age >= threshold);
        if stale {
            last_changed = last_changed.fg(Color::Red);
        } else if age >= Duration::days(AGING_AFTER_DAYS) {
            last_changed = last_changed.fg(Color::Yellow);
        }
    }

    vec![
        Cell::new(&record.region),
        Cell::new(name),
        state_cell(&record.state),
        enabled,
        alarm_actions,
        Cell::new(record.ok_action_count),
        Cell::new(record.insufficient_action_count),
        last_changed,
    ]
}

fn summary(report: &Report) -> String {
    let counters = &report.counters;
    let mut out = String::from("Summary:\n");
    let _ = writeln!(out, "  Total alarms: {}", report.total_alarms);
    let _ = writeln!(out, "  Alarms shown (after filters): {}", report.shown());
    if report.shows_problematic_count() {
        let _ = writeln!(out, "  Problematic alarms: {}", counters.problematic);
    }
    let _ = writeln!(out, "  In ALARM state: {}", counters.in_alarm);
    let _ = writeln!(out, "  INSUFFICIENT_DATA state: {}", counters.insufficient_data);
    let _ = writeln!(out, "  Actions disabled: {}", counters.actions_disabled);
    let _ = writeln!(out, "  No actions configured: {}", counters.no_actions);
    out
}

/// Render the report as a table followed by the summary block
pub fn render_table(report: &Report, options: &TableOptions) -> String {
    if report.is_empty() {
        return if report.active_filters.is_empty() {
            "No alarms found\n".to_string()
        } else {
            format!(
                "No alarms found matching filters: {}\n",
                report.active_filters.join(", ")
            )
        };
    }

    let mut table = build_table(options.no_color);
    for record in &report.rows {
        table.add_row(row(record, report, options));
    }

    format!("{}\n\n{}", table, summary(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarm_core::FilterCriteria;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn record(name: &str, state: AlarmState, enabled: bool, alarm_actions: usize) -> AlarmRecord {
        AlarmRecord {
            region: "eu-west-1".to_string(),
            name: name.to_string(),
            state,
            actions_enabled: enabled,
            alarm_action_count: alarm_actions,
            ok_action_count: 0,
            insufficient_action_count: 0,
            last_state_change: Some(now() - Duration::days(10)),
        }
    }

    fn plain() -> TableOptions {
        TableOptions {
            max_name_width: None,
            no_color: true,
        }
    }

    #[test]
    fn test_render_rows_and_summary() {
        let records = vec![
            record("api-latency", AlarmState::Ok, true, 1),
            record("disk-full", AlarmState::Alarm, false, 0),
        ];
        let report = Report::build(&records, &FilterCriteria::new(), now());
        let out = render_table(&report, &plain());

        for header in HEADERS {
            assert!(out.contains(header), "missing {}", header);
        }
        assert!(out.contains("disk-full"));
        assert!(out.contains("10d ago"));
        assert!(out.contains("Summary:"));
        assert!(out.contains("  Total alarms: 2"));
        assert!(out.contains("  Alarms shown (after filters): 2"));
        assert!(out.contains("  Problematic alarms: 1"));
        assert!(out.contains("  In ALARM state: 1"));
        assert!(out.contains("  Actions disabled: 1"));
        assert!(out.contains("  No actions configured: 1"));

        // problematic rows are listed first
        let broken = out.find("disk-full").unwrap();
        let healthy = out.find("api-latency").unwrap();
        assert!(broken < healthy);
    }

    #[test]
    fn test_problematic_line_hidden_with_only_broken() {
        let records = vec![record("disk-full", AlarmState::Alarm, true, 1)];
        let criteria = FilterCriteria::new().only_problematic(true);
        let out = render_table(&Report::build(&records, &criteria, now()), &plain());

        assert!(!out.contains("Problematic alarms"));
        assert!(out.contains("  In ALARM state: 1"));
    }

    #[test]
    fn test_truncates_names() {
        let records = vec![record("a-very-long-alarm-name", AlarmState::Ok, true, 1)];
        let report = Report::build(&records, &FilterCriteria::new(), now());
        let options = TableOptions {
            max_name_width: Some(10),
            no_color: true,
        };
        let out = render_table(&report, &options);

        assert!(out.contains("a-very-..."));
        assert!(!out.contains("a-very-long-alarm-name"));
    }

    #[test]
    fn test_empty_report_messages() {
        let report = Report::build(&[], &FilterCriteria::new(), now());
        assert_eq!(render_table(&report, &plain()), "No alarms found\n");

        let criteria = FilterCriteria::new()
            .only_problematic(true)
            .require_no_actions(true);
        let report = Report::build(&[], &criteria, now());
        assert_eq!(
            render_table(&report, &plain()),
            "No alarms found matching filters: --only-broken, --no-actions\n"
        );
    }
}
