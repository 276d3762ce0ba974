//! Date parsing for backend payloads.
//!
//! The backend returns calendar dates in several shapes (`2024-03-01`,
//! `2024-03-01T05:00:00.000Z`, `03/01/2024`). Everything is normalized to a
//! [`jiff::civil::Date`] at the edge so the rest of the workspace never
//! handles date strings. Instants become the local calendar day.

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::error::CoreError;

/// Parse a backend date string into a civil date in the local time zone.
pub fn parse_date(raw: &str) -> Result<Date, CoreError> {
    parse_date_in(raw, &TimeZone::system())
}

/// Parse a backend date string, reading instants as calendar days in `tz`.
///
/// Timestamps carrying an offset (`...Z`, `...+05:30`) are converted before
/// the date is taken. Timestamps without one keep their written date.
pub fn parse_date_in(raw: &str, tz: &TimeZone) -> Result<Date, CoreError> {
    let trimmed = raw.trim();
    if trimmed.len() > 10
        && let Ok(instant) = trimmed.parse::<Timestamp>()
    {
        return Ok(tz.to_datetime(instant).date());
    }
    let head = trimmed.get(..10).unwrap_or(trimmed);
    if let Ok(date) = head.parse::<Date>() {
        return Ok(date);
    }
    if let Ok(date) = Date::strptime("%m/%d/%Y", trimmed) {
        return Ok(date);
    }
    Err(CoreError::InvalidDate(raw.to_string()))
}

/// Format a date the way the enrollment endpoint expects it (`MM/DD/YYYY`).
pub fn format_us(date: Date) -> String {
    date.strftime("%m/%d/%Y").to_string()
}

/// Serde adapter: lenient parse on the way in, ISO `YYYY-MM-DD` on the way out.
pub mod lenient {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Optional variant of [`lenient`]. Null, missing, and empty strings map to `None`.
pub mod lenient_opt {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(d),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_date(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// Serde adapter for the `MM/DD/YYYY` wire format.
pub mod us {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_us(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
