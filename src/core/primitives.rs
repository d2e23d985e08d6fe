use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{TimelineError, TimelineResult};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts fractional epoch milliseconds back to an instant, rounding to the
/// nearest millisecond. Out-of-range values saturate to chrono's bounds.
#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> DateTime<Utc> {
    if !millis.is_finite() {
        return if millis.is_sign_negative() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
    }
    let rounded = millis.round();
    let clamped = rounded.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    Utc.timestamp_millis_opt(clamped).single().unwrap_or(if clamped < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Duration for a fractional number of days, rounded to whole milliseconds.
#[must_use]
pub fn fractional_days(days: f64) -> Duration {
    if !days.is_finite() {
        return Duration::zero();
    }
    Duration::milliseconds((days * MILLIS_PER_DAY).round() as i64)
}

/// Parses the instant formats the step collaborator emits.
///
/// Accepts RFC 3339 (`2024-01-05T10:00:00Z`), naive date-times interpreted as
/// UTC (`2024-01-05T10:00:00`) and plain dates at midnight UTC (`2024-01-05`).
pub fn parse_instant(input: &str) -> TimelineResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(TimelineError::InvalidData(format!(
        "`{input}` is not an ISO-8601 instant"
    )))
}

pub(crate) mod iso_instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_instant(&raw).map_err(serde::de::Error::custom)
    }
}
