//! Duration Formatting

use gpslab_i18n::{Locale, catalog};
use serde::{Deserialize, Serialize};

use crate::input::NumberInput;

/// Duration formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `2 hours 30 minutes`
    #[default]
    Long,
    /// `2h 30m`
    Short,
}

impl DurationStyle {
    fn key(&self) -> &'static str {
        match self {
            DurationStyle::Long => "long",
            DurationStyle::Short => "short",
        }
    }
}

/// Duration formatting options.
#[derive(Debug, Clone)]
pub struct DurationOptions {
    pub locale: Locale,
    /// Largest number of non-zero units rendered
    pub max_units: usize,
    pub style: DurationStyle,
}

impl Default for DurationOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            max_units: 2,
            style: DurationStyle::Long,
        }
    }
}

impl DurationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn max_units(mut self, max_units: usize) -> Self {
        self.max_units = max_units;
        self
    }

    pub fn style(mut self, style: DurationStyle) -> Self {
        self.style = style;
        self
    }
}

/// A millisecond span split into calendar-free units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DurationParts {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    /// Split `ms` (sign ignored, sub-second remainder dropped).
    pub fn from_millis(ms: f64) -> Self {
        let mut secs = if ms.is_finite() {
            (ms.abs() / 1000.0).floor() as u64
        } else {
            0
        };
        let mut take = |size: u64| {
            let n = secs / size;
            secs %= size;
            n
        };
        let weeks = take(604_800);
        let days = take(86_400);
        let hours = take(3_600);
        let minutes = take(60);
        let seconds = take(1);
        Self {
            weeks,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    fn units(&self) -> [(&'static str, u64); 5] {
        [
            ("weeks", self.weeks),
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.units().iter().all(|(_, n)| *n == 0)
    }
}

/// Format a millisecond duration.
///
/// ```
/// use gpslab_format::{format_duration, DurationOptions, DurationStyle};
///
/// let ms = (2 * 3600 + 30 * 60) * 1000;
/// assert_eq!(format_duration(ms, &DurationOptions::default()), "2 hours 30 minutes");
/// assert_eq!(
///     format_duration(ms, &DurationOptions::new().style(DurationStyle::Short)),
///     "2h 30m"
/// );
/// assert_eq!(format_duration(0, &DurationOptions::default()), "0 seconds");
/// ```
pub fn format_duration(ms: impl Into<NumberInput>, options: &DurationOptions) -> String {
    let parts = DurationParts::from_millis(ms.into().or_zero());
    let locale = &options.locale;
    let style = options.style.key();
    let unit = |name: &str, count: u64| {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        catalog().t_plural(&format!("duration.{}.{}", style, name), count, locale)
    };

    if parts.is_zero() {
        return unit("seconds", 0);
    }

    let rendered: Vec<String> = parts
        .units()
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .take(options.max_units.max(1))
        .map(|(name, n)| unit(name, n))
        .collect();

    rendered.join(&catalog().t("duration.separator", locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: i64 = 1000;
    const MIN: i64 = 60 * SEC;
    const HOUR: i64 = 60 * MIN;
    const DAY: i64 = 24 * HOUR;

    #[test]
    fn test_parts() {
        let parts = DurationParts::from_millis((9 * DAY + 3 * HOUR + 5 * SEC + 999) as f64);
        assert_eq!(
            parts,
            DurationParts {
                weeks: 1,
                days: 2,
                hours: 3,
                minutes: 0,
                seconds: 5
            }
        );
        assert!(DurationParts::from_millis(999.0).is_zero());
        assert!(DurationParts::from_millis(f64::NAN).is_zero());
        assert_eq!(DurationParts::from_millis(-61_000.0).minutes, 1);
    }

    #[test]
    fn test_long_style() {
        let opts = DurationOptions::default();
        assert_eq!(format_duration(90 * MIN, &opts), "1 hour 30 minutes");
        assert_eq!(format_duration(45 * SEC, &opts), "45 seconds");
        assert_eq!(format_duration(SEC, &opts), "1 second");
        // Top two non-zero units, skipping empty ones in between.
        assert_eq!(format_duration(8 * DAY + 4 * MIN + 2 * SEC, &opts), "1 week 1 day");
        assert_eq!(format_duration(2 * DAY + 4 * MIN + 2 * SEC, &opts), "2 days 4 minutes");
    }

    #[test]
    fn test_max_units() {
        let ms = DAY + 2 * HOUR + 3 * MIN + 4 * SEC;
        let one = DurationOptions::new().max_units(1);
        assert_eq!(format_duration(ms, &one), "1 day");
        let all = DurationOptions::new().max_units(5);
        assert_eq!(format_duration(ms, &all), "1 day 2 hours 3 minutes 4 seconds");
        let zero = DurationOptions::new().max_units(0);
        assert_eq!(format_duration(ms, &zero), "1 day");
    }

    #[test]
    fn test_short_style_and_zero() {
        let short = DurationOptions::new().style(DurationStyle::Short);
        assert_eq!(format_duration(3 * HOUR + 15 * MIN, &short), "3h 15m");
        assert_eq!(format_duration(0, &short), "0s");
        assert_eq!(format_duration("junk", &DurationOptions::default()), "0 seconds");
    }

    #[test]
    fn test_localized_durations() {
        let ko = DurationOptions::new().locale(Locale::ko_kr());
        assert_eq!(format_duration(2 * HOUR + 30 * MIN, &ko), "2시간 30분");

        let sw = DurationOptions::new().locale(Locale::sw_ke());
        assert_eq!(format_duration(2 * HOUR + 30 * MIN, &sw), "saa 2 dakika 30");
    }
}
