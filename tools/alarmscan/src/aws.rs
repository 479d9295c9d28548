//! AWS adapters for the region and alarm directories
//!
//! EC2 `DescribeRegions` backs the region directory and CloudWatch
//! `DescribeAlarms` backs the alarm directory. Both derive their clients from
//! one shared `SdkConfig`, overriding only the region.

use alarm_core::{
    AlarmDirectory, AlarmPage, DescribeAlarmsRequest, OptInStatus, RegionDirectory, RegionEntry,
    RemoteAlarm, RemoteError,
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Load the shared AWS configuration, optionally for a named profile
pub async fn load_sdk_config(profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = profile.filter(|p| !p.is_empty()) {
        debug!("Using AWS profile {}", profile);
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// Region configured by the profile or environment, if any
pub fn configured_region(sdk: &SdkConfig) -> Option<&str> {
    sdk.region().map(|r| r.as_ref())
}

/// Region directory backed by EC2 `DescribeRegions`
pub struct Ec2RegionDirectory {
    client: aws_sdk_ec2::Client,
    home_region: String,
}

impl Ec2RegionDirectory {
    pub fn new(sdk: &SdkConfig, home_region: &str) -> Self {
        let config = aws_sdk_ec2::config::Builder::from(sdk)
            .region(Region::new(home_region.to_string()))
            .build();
        Self {
            client: aws_sdk_ec2::Client::from_conf(config),
            home_region: home_region.to_string(),
        }
    }
}

#[async_trait]
impl RegionDirectory for Ec2RegionDirectory {
    async fn list_regions(&self, include_all: bool) -> Result<Vec<RegionEntry>, RemoteError> {
        let response = self
            .client
            .describe_regions()
            .all_regions(include_all)
            .send()
            .await
            .map_err(|e| {
                RemoteError::service(
                    &self.home_region,
                    aws_sdk_ec2::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        Ok(response
            .regions()
            .iter()
            .map(|r| {
                RegionEntry::new(
                    r.region_name().unwrap_or_default(),
                    r.opt_in_status().map(OptInStatus::from_remote),
                )
            })
            .collect())
    }
}

/// Alarm directory backed by CloudWatch `DescribeAlarms`
///
/// Keeps one client per region so paginated calls reuse connections.
pub struct CloudWatchAlarmDirectory {
    sdk: SdkConfig,
    clients: Mutex<HashMap<String, aws_sdk_cloudwatch::Client>>,
}

impl CloudWatchAlarmDirectory {
    pub fn new(sdk: SdkConfig) -> Self {
        Self {
            sdk,
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn client(&self, region: &str) -> aws_sdk_cloudwatch::Client {
        self.clients
            .lock()
            .entry(region.to_string())
            .or_insert_with(|| {
                let config = aws_sdk_cloudwatch::config::Builder::from(&self.sdk)
                    .region(Region::new(region.to_string()))
                    .build();
                aws_sdk_cloudwatch::Client::from_conf(config)
            })
            .clone()
    }
}

#[async_trait]
impl AlarmDirectory for CloudWatchAlarmDirectory {
    async fn describe_alarms(
        &self,
        region: &str,
        request: &DescribeAlarmsRequest,
    ) -> Result<AlarmPage, RemoteError> {
        let response = self
            .client(region)
            .describe_alarms()
            .set_alarm_name_prefix(request.name_prefix.clone())
            .max_records(request.page_size)
            .set_next_token(request.next_token.clone())
            .send()
            .await
            .map_err(|e| {
                RemoteError::service(
                    region,
                    aws_sdk_cloudwatch::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        let alarms = response
            .metric_alarms()
            .iter()
            .map(|a| RemoteAlarm {
                name: a.alarm_name().map(str::to_string),
                state: a.state_value().map(|s| s.as_str().to_string()),
                actions_enabled: a.actions_enabled(),
                alarm_actions: a.alarm_actions().len(),
                ok_actions: a.ok_actions().len(),
                insufficient_data_actions: a.insufficient_data_actions().len(),
                state_updated: a.state_updated_timestamp().and_then(to_chrono),
            })
            .collect();

        Ok(AlarmPage {
            alarms,
            next_token: response.next_token().map(str::to_string),
        })
    }
}

fn to_chrono(ts: &aws_sdk_cloudwatch::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}
