//! End-to-end tests: region resolution → sequential scan → report
//!
//! Uses the in-memory directories in place of the remote services.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use alarm_core::memory::{remote_alarm, MemoryAlarmDirectory, MemoryRegionDirectory};
use alarm_core::{
    resolve_regions, scan_regions, AlarmState, CollectOptions, FilterCriteria, OptInStatus,
    RegionEntry, RemoteAlarm, Report,
};
use chrono::{Duration, TimeZone, Utc};

fn broken_alarm(name: &str) -> RemoteAlarm {
    RemoteAlarm {
        name: Some(name.to_string()),
        state: Some("ALARM".to_string()),
        actions_enabled: Some(false),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_failed_region_is_reported_separately() {
    let regions = MemoryRegionDirectory::new(vec![
        RegionEntry::new("region-b", Some(OptInStatus::OptedIn)),
        RegionEntry::new("region-a", Some(OptInStatus::OptInNotRequired)),
    ]);
    let alarms = MemoryAlarmDirectory::new()
        .with_pages("region-a", vec![vec![broken_alarm("disk-full")]])
        .with_hang("region-b");
    let options = CollectOptions {
        timeout: std::time::Duration::from_millis(50),
        ..Default::default()
    };

    let targets = resolve_regions(None, &regions).await.unwrap();
    assert_eq!(targets, vec!["region-a", "region-b"]);

    let outcome = scan_regions(&alarms, &targets, &options).await;
    let report = Report::build(&outcome.records, &FilterCriteria::new(), Utc::now());

    assert_eq!(report.total_alarms, 1);
    assert_eq!(report.counters.problematic, 1);
    assert_eq!(report.counters.in_alarm, 1);
    assert_eq!(report.counters.actions_disabled, 1);
    assert_eq!(report.counters.no_actions, 1);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].region, "region-b");
    assert!(outcome.failures[0].error.is_timeout());
}

#[tokio::test]
async fn test_paginated_regions_merge_and_sort() {
    let us: Vec<RemoteAlarm> = (0..150)
        .map(|i| remote_alarm(&format!("api-{:03}", i), "OK"))
        .collect();
    let alarms = MemoryAlarmDirectory::new()
        .with_alarms("us-east-1", us, 100)
        .with_pages(
            "eu-west-1",
            vec![vec![
                remote_alarm("queue-depth", "INSUFFICIENT_DATA"),
                remote_alarm("latency", "OK"),
            ]],
        );
    let regions = MemoryRegionDirectory::new(Vec::new());

    let targets = resolve_regions(Some("us-east-1,eu-west-1"), &regions)
        .await
        .unwrap();
    let outcome = scan_regions(&alarms, &targets, &CollectOptions::default()).await;
    assert_eq!(outcome.records.len(), 152);
    assert_eq!(alarms.request_count("us-east-1"), 2);
    assert_eq!(alarms.request_count("eu-west-1"), 1);

    let report = Report::build(&outcome.records, &FilterCriteria::new(), Utc::now());
    assert_eq!(report.rows[0].name, "queue-depth");
    assert_eq!(report.rows[1].region, "eu-west-1");
    assert_eq!(report.rows[1].name, "latency");
    assert_eq!(report.rows[2].name, "api-000");
    assert_eq!(report.counters.problematic, 1);
}

#[tokio::test]
async fn test_stale_and_state_filters_over_scan() {
    let now = Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap();
    let mut old = remote_alarm("old", "OK");
    old.state_updated = Some(now - Duration::days(10));
    let mut recent = remote_alarm("recent", "OK");
    recent.state_updated = Some(now - Duration::days(1));
    let never = remote_alarm("never", "OK");

    let alarms = MemoryAlarmDirectory::new().with_pages("us-east-1", vec![vec![old, recent, never]]);
    let outcome = scan_regions(
        &alarms,
        &["us-east-1".to_string()],
        &CollectOptions::default(),
    )
    .await;

    let criteria = FilterCriteria::new()
        .stale_threshold(Some(Duration::days(7)))
        .state_equals(Some(AlarmState::Ok));
    let report = Report::build(&outcome.records, &criteria, now);

    let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["old"]);
    assert_eq!(report.total_alarms, 3);
    assert_eq!(report.active_filters, vec!["--state=OK", "--stale=7days"]);
}

#[tokio::test]
async fn test_directory_failure_is_fatal_before_scanning() {
    let regions = MemoryRegionDirectory::failing("RequestExpired");
    let err = resolve_regions(None, &regions).await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.exit_code(), 1);
}
