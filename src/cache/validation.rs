//! Snapshot freshness rules and TTL helpers.

use anyhow::{bail, Result};

use super::Snapshot;

/// Outcome of checking a snapshot against a TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// Younger than the TTL.
    Fresh,
    /// At or past the TTL.
    Expired,
    /// TTL is zero; nothing is ever fresh.
    Disabled,
    /// Created after `now`. Treated as expired.
    FromFuture,
}

impl ValidationResult {
    /// Whether the snapshot may be served.
    pub fn is_fresh(self) -> bool {
        self == ValidationResult::Fresh
    }
}

/// Classify `snapshot` at time `now`.
///
/// Fresh iff `0 <= now - created_at < ttl_seconds`. A snapshot exactly
/// `ttl_seconds` old is expired.
pub fn validate(snapshot: &Snapshot, ttl_seconds: u64, now: i64) -> ValidationResult {
    if ttl_seconds == 0 {
        return ValidationResult::Disabled;
    }

    let age = snapshot.age(now);
    if age < 0 {
        ValidationResult::FromFuture
    } else if (age as u64) < ttl_seconds {
        ValidationResult::Fresh
    } else {
        ValidationResult::Expired
    }
}

/// Parse a TTL string like "2h", "30m", "90s" or "3600" into seconds.
pub fn parse_ttl(ttl: &str) -> Result<u64> {
    let ttl = ttl.trim().to_lowercase();

    let (number, multiplier) = if let Some(days) = ttl.strip_suffix('d') {
        (days, 86_400)
    } else if let Some(hours) = ttl.strip_suffix('h') {
        (hours, 3_600)
    } else if let Some(mins) = ttl.strip_suffix('m') {
        (mins, 60)
    } else if let Some(secs) = ttl.strip_suffix('s') {
        (secs, 1)
    } else {
        (ttl.as_str(), 1)
    };

    let n: u64 = match number.trim().parse() {
        Ok(n) => n,
        Err(_) => bail!("invalid TTL '{}'", ttl),
    };
    match n.checked_mul(multiplier) {
        Some(secs) => Ok(secs),
        None => bail!("TTL '{}' is too large", ttl),
    }
}

/// Format a number of seconds for display.
pub fn format_duration(secs: i64) -> String {
    if secs >= 86400 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
