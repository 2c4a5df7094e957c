//! Generalized-time codec.
//!
//! The directory stamps timestamps such as `zimbraCreateTimestamp` in the
//! LDAP generalized-time form `YYYYMMDDhhmmssZ`, always UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Result};

/// Format string for the generalized-time form.
const GENERALIZED_TIME: &str = "%Y%m%d%H%M%SZ";

/// Parses a generalized-time string into a UTC timestamp.
///
/// # Errors
///
/// Returns an error if the value does not match the generalized-time form.
pub fn parse_generalized(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, GENERALIZED_TIME)
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Formats a UTC timestamp in the generalized-time form.
#[must_use]
pub fn format_generalized(value: DateTime<Utc>) -> String {
    value.format(GENERALIZED_TIME).to_string()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_generalized_time() {
        let parsed = parse_generalized("20230101000000Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_mid_day_stamp() {
        let parsed = parse_generalized("20111008221807Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2011, 10, 8, 22, 18, 7).unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed_values() {
        for value in ["", "2023", "20230101", "not-a-time", "20230101000000", "20231301000000Z"] {
            let err = parse_generalized(value).unwrap_err();
            assert!(matches!(err, Error::InvalidTimestamp { .. }), "{value}");
        }
    }

    #[test]
    fn test_format_round_trip() {
        let stamp = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        let wire = format_generalized(stamp);
        assert_eq!(wire, "20240630235959Z");
        assert_eq!(parse_generalized(&wire).unwrap(), stamp);
    }
}
