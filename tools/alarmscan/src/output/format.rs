use alarm_core::{RegionFailure, ScanError};
use colored::Colorize;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// One stderr line per failed region: `region <id>: <reason>`
pub fn print_region_failures(failures: &[RegionFailure]) {
    for failure in failures {
        eprintln!(
            "{} {}",
            format!("region {}:", failure.region).yellow(),
            failure_reason(&failure.error)
        );
    }
}

/// Reason without the region prefix the remote error already carries
fn failure_reason(error: &ScanError) -> String {
    match error.as_remote() {
        Some(remote) => remote.kind.to_string(),
        None => error.to_string(),
    }
}

/// Truncate to `max` characters, ending with `...` when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}
