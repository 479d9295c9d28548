//! Duration parsing and "time since" formatting

use chrono::{DateTime, Duration, Utc};
use errors::{ScanError, ScanResult};

const STALE_HINT: &str = "Use format like 8h, 1d, 7d, or 24h";

/// Parse a `--stale` value, supporting a `d` suffix for days
///
/// `<n>d` is converted to whole hours (fractional hours are dropped), anything
/// else goes through humantime (`8h`, `30m`, `1h 30m`). Empty, zero or
/// negative values mean "no stale filter".
pub fn parse_stale(value: &str) -> ScanResult<Option<Duration>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let invalid = || ScanError::validation("--stale value", value, STALE_HINT);

    let threshold = if let Some(days) = value.strip_suffix('d') {
        let days: f64 = days.trim().parse().map_err(|_| invalid())?;
        if !days.is_finite() {
            return Err(invalid());
        }
        Duration::try_hours((days * 24.0) as i64).ok_or_else(invalid)?
    } else {
        let std = humantime::parse_duration(value).map_err(|_| invalid())?;
        Duration::from_std(std).map_err(|_| invalid())?
    };

    Ok((threshold > Duration::zero()).then_some(threshold))
}

/// Human-readable time since the last state change
pub fn format_last_changed(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(changed) = timestamp else {
        return "N/A".to_string();
    };

    let since = (now - changed).max(Duration::zero());
    let minutes = since.num_milliseconds() as f64 / 60_000.0;

    if since < Duration::hours(1) {
        format!("{:.0}m ago", minutes)
    } else if since < Duration::hours(24) {
        format!("{:.1}h ago", minutes / 60.0)
    } else {
        format!("{}d ago", since.num_days())
    }
}
