// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ISO-8601 UTC timestamp formatting and parsing

use chrono::{DateTime, SecondsFormat, Utc};

/// Format epoch milliseconds as an ISO-8601 UTC timestamp (second precision).
pub fn iso_from_epoch_ms(ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms as i64)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an ISO-8601 timestamp back to epoch milliseconds.
///
/// Returns `None` for anything unparseable; callers treat that the same
/// as a missing timestamp.
pub fn parse_iso_ms(s: &str) -> Option<u64> {
    let parsed = DateTime::parse_from_rfc3339(s).ok()?;
    let ms = parsed.timestamp_millis();
    if ms < 0 {
        return None;
    }
    Some(ms as u64)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
