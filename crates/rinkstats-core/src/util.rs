use chrono::{NaiveDateTime, TimeDelta};
use sha2::{Digest, Sha256};

/// Shift an Eastern wall-clock timestamp to UTC using the fixed EST offset
/// (UTC-5). The league prints every start time in Eastern time regardless of
/// venue, and the published listings carry no DST marker, so a fixed offset
/// is applied for every date.
pub fn eastern_to_utc(local: NaiveDateTime) -> NaiveDateTime {
    local + TimeDelta::hours(5)
}

/// Compute a SHA-256 hash of a string, returned as 64-char hex.
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
