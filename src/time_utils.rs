// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;

/// Refresh this long before an ID token expires.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
/// Shortest wait between refreshes.
pub const MIN_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a provider `expiresIn` value (decimal seconds as a string).
pub fn parse_expires_in(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// How long to wait before refreshing a token valid for `expires_in`.
///
/// Short-lived tokens are refreshed halfway through their lifetime, and never
/// sooner than `MIN_REFRESH_DELAY`.
pub fn refresh_delay(expires_in: Duration) -> Duration {
    let floor = (expires_in / 2).max(MIN_REFRESH_DELAY);
    expires_in.saturating_sub(TOKEN_REFRESH_MARGIN).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_z_suffix() {
        let date = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2026-03-14T09:26:53Z");
    }

    #[test]
    fn parses_expires_in() {
        assert_eq!(parse_expires_in("3600"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_expires_in(" 60 "), Some(Duration::from_secs(60)));
        assert_eq!(parse_expires_in("soon"), None);
    }

    #[test]
    fn refresh_delay_keeps_margin() {
        assert_eq!(
            refresh_delay(Duration::from_secs(3600)),
            Duration::from_secs(3540)
        );
    }

    #[test]
    fn short_lived_tokens_are_not_refreshed_back_to_back() {
        assert_eq!(
            refresh_delay(Duration::from_secs(60)),
            Duration::from_secs(30)
        );
        assert_eq!(
            refresh_delay(Duration::from_secs(30)),
            Duration::from_secs(15)
        );
        assert_eq!(refresh_delay(Duration::ZERO), MIN_REFRESH_DELAY);
    }
}
