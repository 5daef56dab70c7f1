//! Relative Time
//!
//! "45 minutes ago", "yesterday", deadline urgency and expiration notices.
//! Calendar-day comparisons use midnight in the configured UTC offset.

use chrono::{DateTime, Utc};
use gpslab_i18n::{Locale, catalog};
use serde::Serialize;

use crate::date::local;
use crate::input::DateInput;

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 60 * MINUTE_SECS;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Relative time options.
#[derive(Debug, Clone, Default)]
pub struct RelativeOptions {
    pub locale: Locale,
    /// Offset used for calendar-day boundaries, in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl RelativeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }
}

/// Whole calendar days from `then` to `now`; positive when `then` is earlier.
fn calendar_days(then: DateTime<Utc>, now: DateTime<Utc>, offset_minutes: i32) -> i64 {
    let then = local(then, offset_minutes).date_naive();
    let now = local(now, offset_minutes).date_naive();
    (now - then).num_days()
}

fn directed(unit: &str, count: i64, past: bool, locale: &Locale) -> String {
    let direction = if past { "ago" } else { "from_now" };
    catalog().t_plural(&format!("relative.{}_{}", unit, direction), count, locale)
}

/// Relative description of `input` against the current time.
pub fn format_relative_time(input: impl Into<DateInput>, options: &RelativeOptions) -> String {
    format_relative_time_at(input, Utc::now(), options)
}

/// Relative description of `input` against `now`; invalid input yields `""`.
///
/// ```
/// use chrono::{Duration, Utc};
/// use gpslab_format::{format_relative_time_at, RelativeOptions};
///
/// let now = Utc::now();
/// let text = format_relative_time_at(now - Duration::minutes(45), now, &RelativeOptions::default());
/// assert_eq!(text, "45 minutes ago");
/// ```
pub fn format_relative_time_at(
    input: impl Into<DateInput>,
    now: DateTime<Utc>,
    options: &RelativeOptions,
) -> String {
    let Some(then) = input.into().to_datetime() else {
        return String::new();
    };
    let locale = &options.locale;
    let elapsed = (now - then).num_seconds();
    let past = elapsed >= 0;
    let secs = elapsed.abs();

    if secs < MINUTE_SECS {
        return catalog().t("relative.just_now", locale);
    }
    if secs < HOUR_SECS {
        return directed("minutes", secs / MINUTE_SECS, past, locale);
    }

    let days = calendar_days(then, now, options.utc_offset_minutes);
    match days.abs() {
        0 => directed("hours", secs / HOUR_SECS, past, locale),
        1 if days > 0 => catalog().t("relative.yesterday", locale),
        1 => catalog().t("relative.tomorrow", locale),
        d if d < 7 => directed("days", d, past, locale),
        d if d < 30 => directed("weeks", d / 7, past, locale),
        d if d / 30 < 12 => directed("months", d / 30, past, locale),
        d => directed("years", (d / 365).max(1), past, locale),
    }
}

/// Calendar-day description: today, yesterday, tomorrow, or N days.
pub fn format_relative_day(
    input: impl Into<DateInput>,
    now: DateTime<Utc>,
    options: &RelativeOptions,
) -> String {
    let Some(then) = input.into().to_datetime() else {
        return String::new();
    };
    let locale = &options.locale;
    match calendar_days(then, now, options.utc_offset_minutes) {
        0 => catalog().t("relative.today", locale),
        1 => catalog().t("relative.yesterday", locale),
        -1 => catalog().t("relative.tomorrow", locale),
        d => directed("days", d.abs(), d > 0, locale),
    }
}

// ============================================================================
// Deadlines
// ============================================================================

/// How close a deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Overdue,
    Critical,
    Urgent,
    Warning,
    Normal,
}

impl Urgency {
    /// Classify the time left before a deadline.
    pub fn from_remaining(remaining_ms: i64) -> Self {
        match remaining_ms {
            ms if ms <= 0 => Urgency::Overdue,
            ms if ms <= 2 * HOUR_MS => Urgency::Critical,
            ms if ms <= DAY_MS => Urgency::Urgent,
            ms if ms <= 3 * DAY_MS => Urgency::Warning,
            _ => Urgency::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Critical => "critical",
            Urgency::Urgent => "urgent",
            Urgency::Warning => "warning",
            Urgency::Normal => "normal",
        }
    }

    /// Localized label.
    pub fn label(&self, locale: &Locale) -> String {
        catalog().t(&format!("deadline.{}", self.as_str()), locale)
    }

    /// Style hint for the UI.
    pub fn css_class(&self) -> &'static str {
        match self {
            Urgency::Overdue => "text-red-700 bg-red-100",
            Urgency::Critical => "text-red-600 bg-red-50",
            Urgency::Urgent => "text-orange-600 bg-orange-50",
            Urgency::Warning => "text-yellow-700 bg-yellow-50",
            Urgency::Normal => "text-gray-600",
        }
    }
}

/// A formatted deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadlineInfo {
    /// Relative phrase ("in 3 hours", "2 days ago")
    pub text: String,
    pub label: String,
    pub urgency: Urgency,
    pub remaining_ms: i64,
    pub is_overdue: bool,
}

impl DeadlineInfo {
    fn invalid() -> Self {
        Self {
            text: String::new(),
            label: String::new(),
            urgency: Urgency::Normal,
            remaining_ms: 0,
            is_overdue: false,
        }
    }
}

/// Describe a deadline relative to `now`.
pub fn format_deadline(
    deadline: impl Into<DateInput>,
    now: DateTime<Utc>,
    locale: &Locale,
) -> DeadlineInfo {
    let Some(due) = deadline.into().to_datetime() else {
        return DeadlineInfo::invalid();
    };
    let remaining_ms = (due - now).num_milliseconds();
    let urgency = Urgency::from_remaining(remaining_ms);
    let options = RelativeOptions::new().locale(locale.clone());

    DeadlineInfo {
        text: format_relative_time_at(due, now, &options),
        label: urgency.label(locale),
        urgency,
        remaining_ms,
        is_overdue: urgency == Urgency::Overdue,
    }
}

// ============================================================================
// Expiration
// ============================================================================

/// A formatted expiration date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpirationInfo {
    pub text: String,
    pub is_expired: bool,
    /// Days left, rounded up; zero once expired
    pub days_remaining: i64,
}

/// Describe when something expires ("Expires in 3 days", "Expired yesterday").
pub fn format_expiration(
    expiry: impl Into<DateInput>,
    now: DateTime<Utc>,
    locale: &Locale,
) -> ExpirationInfo {
    let Some(expires) = expiry.into().to_datetime() else {
        return ExpirationInfo {
            text: String::new(),
            is_expired: false,
            days_remaining: 0,
        };
    };
    let remaining_ms = (expires - now).num_milliseconds();
    let is_expired = remaining_ms <= 0;
    let days_remaining = if is_expired {
        0
    } else {
        (remaining_ms + DAY_MS - 1) / DAY_MS
    };

    let options = RelativeOptions::new().locale(locale.clone());
    let time = format_relative_time_at(expires, now, &options);
    let key = if is_expired {
        "expiration.expired"
    } else {
        "expiration.expires"
    };

    ExpirationInfo {
        text: catalog().t_args(key, locale, &[("time", &time)]),
        is_expired,
        days_remaining,
    }
}
