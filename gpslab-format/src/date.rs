//! Date and Time Formatting
//!
//! Absolute calendar dates and clock times in the field order of each
//! supported locale.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};
use gpslab_i18n::{Locale, SupportedLocale};
use serde::{Deserialize, Serialize};

use crate::input::DateInput;

/// Date formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `1/15/24`
    Short,
    /// `Jan 15, 2024`
    #[default]
    Medium,
    /// `January 15, 2024`
    Long,
    /// `Monday, January 15, 2024`
    Full,
}

/// Time formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStyle {
    /// `2:30 PM`
    #[default]
    Short,
    /// `2:30:05 PM`
    Medium,
}

/// Date and time formatting options.
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    pub locale: Locale,
    pub style: DateStyle,
    pub time_style: TimeStyle,
    /// Offset of the calendar used to read fields, in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl DateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn style(mut self, style: DateStyle) -> Self {
        self.style = style;
        self
    }

    pub fn time_style(mut self, style: TimeStyle) -> Self {
        self.time_style = style;
        self
    }

    pub fn utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }
}

/// Fixed offset for `minutes`; UTC when out of range.
pub(crate) fn offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            gpslab_log::debug!("utc offset {} minutes out of range, using UTC", minutes);
            Utc.fix()
        })
}

pub(crate) fn local(dt: DateTime<Utc>, minutes: i32) -> DateTime<FixedOffset> {
    dt.with_timezone(&offset(minutes))
}

// ============================================================================
// Calendar names
// ============================================================================

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_SW: [&str; 12] = [
    "Januari", "Februari", "Machi", "Aprili", "Mei", "Juni", "Julai", "Agosti", "Septemba",
    "Oktoba", "Novemba", "Desemba",
];
const MONTHS_SW_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mac", "Apr", "Mei", "Jun", "Jul", "Ago", "Sep", "Okt", "Nov", "Des",
];

// Monday first, matching `Weekday::num_days_from_monday`.
const WEEKDAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const WEEKDAYS_KO: [&str; 7] = ["월요일", "화요일", "수요일", "목요일", "금요일", "토요일", "일요일"];
const WEEKDAYS_SW: [&str; 7] = [
    "Jumatatu", "Jumanne", "Jumatano", "Alhamisi", "Ijumaa", "Jumamosi", "Jumapili",
];

/// Localized month name (`month` is 1-based).
pub fn month_name(month: u32, long: bool, locale: &Locale) -> &'static str {
    let idx = (month.clamp(1, 12) - 1) as usize;
    match (locale.supported(), long) {
        (SupportedLocale::SwKe, true) => MONTHS_SW[idx],
        (SupportedLocale::SwKe, false) => MONTHS_SW_SHORT[idx],
        (_, true) => MONTHS_EN[idx],
        (_, false) => MONTHS_EN_SHORT[idx],
    }
}

/// Localized weekday name, Monday = 0.
pub fn weekday_name(days_from_monday: u32, locale: &Locale) -> &'static str {
    let idx = days_from_monday.min(6) as usize;
    match locale.supported() {
        SupportedLocale::EnUs => WEEKDAYS_EN[idx],
        SupportedLocale::KoKr => WEEKDAYS_KO[idx],
        SupportedLocale::SwKe => WEEKDAYS_SW[idx],
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a calendar date; invalid input yields `""`.
///
/// # Example
///
/// ```
/// use gpslab_format::{format_date, DateOptions, DateStyle};
/// use gpslab_i18n::Locale;
///
/// let opts = DateOptions::new().style(DateStyle::Long);
/// assert_eq!(format_date("2024-01-15", &opts), "January 15, 2024");
///
/// let opts = opts.locale(Locale::ko_kr());
/// assert_eq!(format_date("2024-01-15", &opts), "2024년 1월 15일");
///
/// assert_eq!(format_date("garbage", &DateOptions::default()), "");
/// ```
pub fn format_date(input: impl Into<DateInput>, options: &DateOptions) -> String {
    match input.into().to_datetime() {
        Some(dt) => render_date(&local(dt, options.utc_offset_minutes), options),
        None => String::new(),
    }
}

/// Format a clock time; invalid input yields `""`.
pub fn format_time(input: impl Into<DateInput>, options: &DateOptions) -> String {
    match input.into().to_datetime() {
        Some(dt) => render_time(&local(dt, options.utc_offset_minutes), options),
        None => String::new(),
    }
}

/// Format date and time together; invalid input yields `""`.
pub fn format_date_time(input: impl Into<DateInput>, options: &DateOptions) -> String {
    let Some(dt) = input.into().to_datetime() else {
        return String::new();
    };
    let local = local(dt, options.utc_offset_minutes);
    let separator = match options.locale.supported() {
        SupportedLocale::EnUs => ", ",
        SupportedLocale::KoKr | SupportedLocale::SwKe => " ",
    };
    format!(
        "{}{}{}",
        render_date(&local, options),
        separator,
        render_time(&local, options)
    )
}

fn render_date(dt: &DateTime<FixedOffset>, options: &DateOptions) -> String {
    let locale = &options.locale;
    let (year, month, day) = (dt.year(), dt.month(), dt.day());
    let short_year = year.rem_euclid(100);
    let weekday = weekday_name(dt.weekday().num_days_from_monday(), locale);

    match (locale.supported(), options.style) {
        (SupportedLocale::EnUs, DateStyle::Short) => {
            format!("{}/{}/{:02}", month, day, short_year)
        }
        (SupportedLocale::EnUs, DateStyle::Medium) => {
            format!("{} {}, {}", month_name(month, false, locale), day, year)
        }
        (SupportedLocale::EnUs, DateStyle::Long) => {
            format!("{} {}, {}", month_name(month, true, locale), day, year)
        }
        (SupportedLocale::EnUs, DateStyle::Full) => {
            format!("{}, {} {}, {}", weekday, month_name(month, true, locale), day, year)
        }

        (SupportedLocale::KoKr, DateStyle::Short) => {
            format!("{:02}. {}. {}.", short_year, month, day)
        }
        (SupportedLocale::KoKr, DateStyle::Medium) => format!("{}. {}. {}.", year, month, day),
        (SupportedLocale::KoKr, DateStyle::Long) => format!("{}년 {}월 {}일", year, month, day),
        (SupportedLocale::KoKr, DateStyle::Full) => {
            format!("{}년 {}월 {}일 {}", year, month, day, weekday)
        }

        (SupportedLocale::SwKe, DateStyle::Short) => format!("{:02}/{:02}/{}", day, month, year),
        (SupportedLocale::SwKe, DateStyle::Medium) => {
            format!("{} {} {}", day, month_name(month, false, locale), year)
        }
        (SupportedLocale::SwKe, DateStyle::Long) => {
            format!("{} {} {}", day, month_name(month, true, locale), year)
        }
        (SupportedLocale::SwKe, DateStyle::Full) => {
            format!("{}, {} {} {}", weekday, day, month_name(month, true, locale), year)
        }
    }
}

fn render_time(dt: &DateTime<FixedOffset>, options: &DateOptions) -> String {
    let (hour, minute, second) = (dt.hour(), dt.minute(), dt.second());
    let seconds = match options.time_style {
        TimeStyle::Short => String::new(),
        TimeStyle::Medium => format!(":{:02}", second),
    };
    let (is_pm, hour12) = dt.hour12();

    match options.locale.supported() {
        SupportedLocale::EnUs => {
            let period = if is_pm { "PM" } else { "AM" };
            format!("{}:{:02}{} {}", hour12, minute, seconds, period)
        }
        SupportedLocale::KoKr => {
            let period = if is_pm { "오후" } else { "오전" };
            format!("{} {}:{:02}{}", period, hour12, minute, seconds)
        }
        SupportedLocale::SwKe => format!("{:02}:{:02}{}", hour, minute, seconds),
    }
}
