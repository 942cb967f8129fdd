//! Window-pair validation for item edit submissions.
//!
//! Both submitted values are validated in one call so the ordering check
//! never depends on per-request state: the caller hands over whatever the
//! form carried for `publish_from` and `publish_until`, and gets back the
//! parsed bounds plus any field-level errors.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::fields;
use crate::errors::FieldError;

/// Accepted layouts for editor-submitted values without a UTC offset.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Result of validating one submitted window pair.
#[derive(Debug)]
pub struct ValidatedWindow {
    pub publish_from: Option<DateTime<Utc>>,
    pub publish_until: Option<DateTime<Utc>>,
    pub errors: Vec<FieldError>,
}

impl ValidatedWindow {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a submitted `publish_from`/`publish_until` pair.
///
/// Empty or whitespace-only strings clear the bound. When both bounds parse
/// and `publish_from >= publish_until`, the error is attached to the
/// `publish_until` field; the window would never open otherwise.
pub fn validate_window(
    publish_from: Option<&str>,
    publish_until: Option<&str>,
    timezone: Tz,
) -> ValidatedWindow {
    let mut errors = Vec::new();

    let from = parse_bound(publish_from, timezone, fields::PUBLISH_FROM, &mut errors);
    let until = parse_bound(publish_until, timezone, fields::PUBLISH_UNTIL, &mut errors);

    if let (Some(from), Some(until)) = (from, until) {
        if from >= until {
            errors.push(FieldError {
                field: fields::PUBLISH_UNTIL.to_string(),
                message: format!(
                    "must be later than {} ({})",
                    fields::PUBLISH_FROM,
                    from.to_rfc3339()
                ),
            });
        }
    }

    ValidatedWindow {
        publish_from: from,
        publish_until: until,
        errors,
    }
}

fn parse_bound(
    raw: Option<&str>,
    timezone: Tz,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    match parse_instant(raw, timezone) {
        Ok(instant) => Some(instant),
        Err(reason) => {
            errors.push(FieldError {
                field: field.to_string(),
                message: reason,
            });
            None
        }
    }
}

/// Parse a submitted date value into a UTC instant.
///
/// RFC 3339 values carry their own offset; everything else is read as a
/// local time in the configured timezone. A bare date means midnight.
fn parse_instant(raw: &str, timezone: Tz) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            format!(
                "'{}' is not a recognized date; use YYYY-MM-DD, YYYY-MM-DD HH:MM or RFC 3339",
                raw
            )
        })?;

    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        // DST fall-back repeats an hour; take the earlier occurrence.
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(format!(
            "'{}' does not exist in timezone {} (daylight-saving gap)",
            raw, timezone
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn absent_pair_is_valid_and_empty() {
        let result = validate_window(None, None, chrono_tz::UTC);
        assert!(result.is_valid());
        assert_eq!(result.publish_from, None);
        assert_eq!(result.publish_until, None);
    }

    #[test]
    fn blank_strings_clear_the_bounds() {
        let result = validate_window(Some(""), Some("   "), chrono_tz::UTC);
        assert!(result.is_valid());
        assert_eq!(result.publish_from, None);
        assert_eq!(result.publish_until, None);
    }

    #[rstest]
    #[case("2024-06-01", utc(2024, 6, 1, 0, 0))]
    #[case("2024-06-01 09:30", utc(2024, 6, 1, 9, 30))]
    #[case("2024-06-01T09:30", utc(2024, 6, 1, 9, 30))]
    #[case("2024-06-01 09:30:15", Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 15).unwrap())]
    #[case("2024-06-01T09:30:00Z", utc(2024, 6, 1, 9, 30))]
    #[case("2024-06-01T09:30:00+02:00", utc(2024, 6, 1, 7, 30))]
    fn accepted_layouts_parse_in_utc(#[case] raw: &str, #[case] expected: DateTime<Utc>) {
        let result = validate_window(Some(raw), None, chrono_tz::UTC);
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
        assert_eq!(result.publish_from, Some(expected));
    }

    #[test]
    fn local_values_honor_the_configured_timezone() {
        // 09:30 in Berlin during summer is 07:30 UTC.
        let result = validate_window(Some("2024-06-01 09:30"), None, chrono_tz::Europe::Berlin);
        assert!(result.is_valid());
        assert_eq!(result.publish_from, Some(utc(2024, 6, 1, 7, 30)));
    }

    #[test]
    fn unparseable_value_errors_on_its_own_field() {
        let result = validate_window(Some("next tuesday"), None, chrono_tz::UTC);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, fields::PUBLISH_FROM);
        assert_eq!(result.publish_from, None);
    }

    #[test]
    fn inverted_pair_errors_on_the_until_field() {
        let result = validate_window(
            Some("2024-06-10"),
            Some("2024-06-01"),
            chrono_tz::UTC,
        );
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, fields::PUBLISH_UNTIL);
    }

    #[test]
    fn equal_pair_is_rejected() {
        let result = validate_window(
            Some("2024-06-01 12:00"),
            Some("2024-06-01 12:00"),
            chrono_tz::UTC,
        );
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].field, fields::PUBLISH_UNTIL);
    }

    #[test]
    fn well_ordered_pair_passes() {
        let result = validate_window(
            Some("2024-06-01"),
            Some("2024-06-10"),
            chrono_tz::UTC,
        );
        assert!(result.is_valid());
        assert!(result.publish_from.unwrap() < result.publish_until.unwrap());
    }

    #[test]
    fn ordering_is_checked_across_timezone_conversion() {
        // 23:00 Berlin on the 1st is 21:00 UTC, still before 22:00 UTC.
        let result = validate_window(
            Some("2024-06-01 23:00"),
            Some("2024-06-01T22:00:00Z"),
            chrono_tz::Europe::Berlin,
        );
        assert!(result.is_valid());
    }
}
