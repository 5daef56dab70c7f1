//! Loose inputs accepted by the formatters.
//!
//! Formatters are total: anything that is not a usable number formats as
//! zero and anything that is not a usable date formats as an empty string.
//! These types carry the raw value until a formatter coerces it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// A value that may or may not be a number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Missing,
}

impl NumberInput {
    /// The finite numeric value, if there is one.
    ///
    /// Text is trimmed and may contain `,` or `_` digit grouping.
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            NumberInput::Number(n) => Some(*n),
            NumberInput::Text(s) => {
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| *c != ',' && *c != '_')
                    .collect();
                cleaned.parse::<f64>().ok()
            }
            NumberInput::Missing => None,
        };
        parsed.filter(|n| n.is_finite())
    }

    /// The numeric value, or `0.0` for invalid input.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or_else(|| {
            gpslab_log::debug!("non-numeric input {:?} formatted as zero", self);
            0.0
        })
    }
}

macro_rules! number_input_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumberInput {
                fn from(n: $t) -> Self {
                    NumberInput::Number(n as f64)
                }
            }
        )*
    };
}

number_input_from!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for NumberInput {
    fn from(s: &str) -> Self {
        NumberInput::Text(s.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(s: String) -> Self {
        NumberInput::Text(s)
    }
}

impl From<&String> for NumberInput {
    fn from(s: &String) -> Self {
        NumberInput::Text(s.clone())
    }
}

impl<T: Into<NumberInput>> From<Option<T>> for NumberInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(NumberInput::Missing)
    }
}

/// A value that may or may not be a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD`
    /// (naive forms read as UTC) or epoch milliseconds
    Text(String),
    Missing,
}

impl DateInput {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let parsed = match self {
            DateInput::Instant(dt) => Some(*dt),
            DateInput::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            DateInput::Text(s) => parse_date_text(s.trim()),
            DateInput::Missing => None,
        };
        if parsed.is_none() && *self != DateInput::Missing {
            gpslab_log::debug!("unusable date input {:?}", self);
        }
        parsed
    }
}

fn parse_date_text(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        DateInput::Instant(dt)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        DateInput::Instant(dt.with_timezone(&Utc))
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        date.and_hms_opt(0, 0, 0)
            .map(|naive| DateInput::Instant(naive.and_utc()))
            .unwrap_or(DateInput::Missing)
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::Millis(ms)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl<T: Into<DateInput>> From<Option<T>> for DateInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DateInput::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_number_coercion() {
        assert_eq!(NumberInput::from(42).or_zero(), 42.0);
        assert_eq!(NumberInput::from(" 1,234.5 ").or_zero(), 1234.5);
        assert_eq!(NumberInput::from("abc").or_zero(), 0.0);
        assert_eq!(NumberInput::from("").or_zero(), 0.0);
        assert_eq!(NumberInput::from(f64::NAN).or_zero(), 0.0);
        assert_eq!(NumberInput::from(f64::INFINITY).or_zero(), 0.0);
        assert_eq!(NumberInput::from("inf").or_zero(), 0.0);
        assert_eq!(NumberInput::from(None::<f64>).or_zero(), 0.0);
        assert_eq!(NumberInput::from(Some(7u8)).or_zero(), 7.0);
    }

    #[test]
    fn test_date_parsing() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        assert_eq!(DateInput::from("2024-01-15T14:30:00Z").to_datetime(), Some(expected));
        assert_eq!(DateInput::from("2024-01-15T23:30:00+09:00").to_datetime(), Some(expected));
        assert_eq!(DateInput::from("2024-01-15 14:30:00").to_datetime(), Some(expected));
        assert_eq!(
            DateInput::from(expected.timestamp_millis()).to_datetime(),
            Some(expected)
        );

        let date_only = DateInput::from("2024-01-15").to_datetime().unwrap();
        assert_eq!(date_only.day(), 15);
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(DateInput::from("not a date").to_datetime(), None);
        assert_eq!(DateInput::from("").to_datetime(), None);
        assert_eq!(DateInput::from(None::<&str>).to_datetime(), None);
        assert_eq!(DateInput::Millis(i64::MAX).to_datetime(), None);
    }
}
