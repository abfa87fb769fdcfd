//! Lockout countdown arithmetic and formatting

use chrono::{DateTime, Utc};

/// Whole seconds left until `expires_at`, rounded up
///
/// Any instant strictly before expiry reports at least one second, so a
/// locked pad never shows `00:00`.
pub fn remaining_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = expires_at.signed_duration_since(now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis as u64).div_ceil(1000)
    }
}

/// Format seconds as `MM:SS`
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the lockout still to run, in `[0.0, 1.0]`
pub fn lockout_progress(remaining_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (remaining_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

/// Human-readable duration ("5 minutes", "1 hour")
pub fn describe_lockout(secs: u64) -> String {
    let plural = |n: u64, unit: &str| {
        format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" })
    };

    if secs < 60 {
        plural(secs, "second")
    } else if secs < 3600 {
        plural(secs / 60, "minute")
    } else {
        plural(secs / 3600, "hour")
    }
}
