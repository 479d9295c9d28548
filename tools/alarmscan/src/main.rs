//! alarmscan - CloudWatch alarm inventory across regions
//!
//! Resolves the regions to scan, collects every alarm definition region by
//! region, and prints a filtered report with the problematic alarms first.
//! Failed regions are reported on stderr without aborting the run.

mod aws;
mod config;
mod duration;
mod output;

use alarm_core::{resolve_regions, scan_regions, AlarmState, FilterCriteria, Report, ScanError};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::aws::{CloudWatchAlarmDirectory, Ec2RegionDirectory};
use crate::config::ScanSettings;
use crate::output::{OutputMode, TableOptions};

#[derive(Parser, Debug)]
#[command(name = "alarmscan")]
#[command(about = "Inventory CloudWatch alarms across regions and highlight the broken ones")]
#[command(version)]
struct Cli {
    /// AWS profile to use
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Comma-separated regions (default: all enabled regions)
    #[arg(long)]
    regions: Option<String>,

    /// Per-region timeout, e.g. 20s or 1m
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Only alarms whose name starts with this prefix
    #[arg(long = "name-prefix")]
    name_prefix: Option<String>,

    /// Show only problematic alarms
    #[arg(long = "only-broken")]
    only_broken: bool,

    /// Show only alarms in this state (OK, ALARM, INSUFFICIENT_DATA)
    #[arg(long)]
    state: Option<String>,

    /// Show only alarms with no actions configured
    #[arg(long = "no-actions")]
    no_actions: bool,

    /// Show only alarms with actions disabled
    #[arg(long = "actions-disabled")]
    actions_disabled: bool,

    /// Show only alarms whose state has not changed for this long, e.g. 8h or 7d
    #[arg(long)]
    stale: Option<String>,

    /// Emit a JSON document instead of a table
    #[arg(long)]
    json: bool,

    /// Settings file (toml, yaml or json)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Truncate alarm names in the table to this many characters
    #[arg(long = "max-name-width")]
    max_name_width: Option<usize>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded settings
    fn apply_overrides(&self, settings: &mut ScanSettings) {
        if let Some(profile) = &self.profile {
            settings.profile = Some(profile.clone());
        }
        if let Some(regions) = &self.regions {
            settings.regions = Some(regions.clone());
        }
        if let Some(timeout) = self.timeout {
            settings.timeout = timeout;
        }
        if let Some(prefix) = &self.name_prefix {
            settings.name_prefix = Some(prefix.clone());
        }
    }

    /// Validate the filter flags into criteria
    fn criteria(&self) -> Result<FilterCriteria, ScanError> {
        let state = self
            .state
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<AlarmState>)
            .transpose()?;
        let stale = match self.stale.as_deref() {
            Some(value) => duration::parse_stale(value)?,
            None => None,
        };

        Ok(FilterCriteria::new()
            .only_problematic(self.only_broken)
            .state_equals(state)
            .require_no_actions(self.no_actions)
            .require_actions_disabled(self.actions_disabled)
            .stale_threshold(stale))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    common::init_cli_logging(cli.verbose, cli.no_color);

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        let code = e
            .downcast_ref::<ScanError>()
            .map(ScanError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = ScanSettings::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings);
    settings.validate()?;
    debug!("Settings: {:?}", settings);

    // Reject bad filter flags before any remote call
    let criteria = cli.criteria()?;

    let sdk = aws::load_sdk_config(settings.profile.as_deref()).await;
    let home = alarm_core::home_region(
        settings
            .home_region
            .as_deref()
            .or_else(|| aws::configured_region(&sdk)),
    )
    .to_string();

    let region_directory = Ec2RegionDirectory::new(&sdk, &home);
    let regions = resolve_regions(settings.regions.as_deref(), &region_directory)
        .await
        .context("failed to resolve regions")?;

    let alarm_directory = CloudWatchAlarmDirectory::new(sdk);
    let outcome = scan_regions(&alarm_directory, &regions, &settings.collect_options()).await;
    output::print_region_failures(&outcome.failures);

    let report = Report::build(&outcome.records, &criteria, Utc::now());
    match OutputMode::from_json_flag(cli.json) {
        OutputMode::Json => println!("{}", output::render_json(&report)?),
        OutputMode::Table => {
            let options = TableOptions {
                max_name_width: cli.max_name_width,
                no_color: cli.no_color,
            };
            print!("{}", output::render_table(&report, &options));
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["alarmscan"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_build_criteria() {
        let cli = parse(&["--only-broken", "--state", "ALARM", "--stale", "7d", "--no-actions"]);
        let criteria = cli.criteria().unwrap();

        assert!(criteria.only_problematic);
        assert_eq!(criteria.state_equals, Some(AlarmState::Alarm));
        assert!(criteria.require_no_actions);
        assert!(!criteria.require_actions_disabled);
        assert_eq!(criteria.stale_threshold, Some(chrono::Duration::days(7)));
    }

    #[test]
    fn test_invalid_state_rejected() {
        let cli = parse(&["--state", "alarm"]);
        let err = cli.criteria().unwrap_err();
        assert!(matches!(err, ScanError::Validation { .. }));
        assert!(err.to_string().contains("OK, ALARM, INSUFFICIENT_DATA"));
    }

    #[test]
    fn test_invalid_stale_rejected() {
        let cli = parse(&["--stale", "soon"]);
        assert!(matches!(
            cli.criteria().unwrap_err(),
            ScanError::Validation { .. }
        ));
    }

    #[test]
    fn test_overrides_win_over_settings() {
        let cli = parse(&["--regions", "eu-west-1", "--timeout", "5s", "--name-prefix", "prod-"]);
        let mut settings = ScanSettings::default();
        cli.apply_overrides(&mut settings);

        assert_eq!(settings.regions.as_deref(), Some("eu-west-1"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.name_prefix.as_deref(), Some("prod-"));
        assert_eq!(settings.page_size, 100);
    }
}
