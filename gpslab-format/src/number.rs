//! Number Formatting
//!
//! Grouped decimals, percentages, compact notation, ordinals and ranges.
//! Every supported locale groups with `,` and uses `.` as the decimal mark.

use gpslab_i18n::{Locale, SupportedLocale, catalog, interpolate, ordinal_category};
use rust_decimal::prelude::*;

use crate::input::NumberInput;

const GROUP_SEPARATOR: char = ',';

// ============================================================================
// Rounding
// ============================================================================

/// Decimal form of the shortest text that round-trips `value`, so that
/// `0.125` and `1.005` round as written.
fn to_decimal(value: f64) -> Option<Decimal> {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// Fixed-point text for `value` rounded half away from zero.
///
/// Values outside the `Decimal` range fall back to float formatting.
pub(crate) fn fixed(value: f64, decimals: u32) -> String {
    match to_decimal(value) {
        Some(d) => {
            let mut rounded =
                d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            rounded.to_string()
        }
        None => format!("{:.1$}", value, decimals as usize),
    }
}

/// `value` rounded half away from zero to `decimals` places.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    to_decimal(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Render with `min..=max` fraction digits and optional grouping.
pub(crate) fn render(value: f64, min_fraction: usize, max_fraction: usize, grouping: bool) -> String {
    let max_fraction = max_fraction.max(min_fraction);
    let text = fixed(value, max_fraction as u32);

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };

    let mut fraction = fraction.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let is_zero = integer.chars().chain(fraction.chars()).all(|c| c == '0');
    let sign = if is_zero { "" } else { sign };

    let integer = if grouping {
        add_grouping(integer)
    } else {
        integer.to_string()
    };

    if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    }
}

fn add_grouping(digits: &str) -> String {
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(GROUP_SEPARATOR);
        }
        result.push(c);
    }
    result
}

// ============================================================================
// Plain numbers
// ============================================================================

/// Number formatting options.
#[derive(Debug, Clone)]
pub struct NumberOptions {
    pub locale: Locale,
    /// Exact fraction digits; overrides the min/max pair
    pub decimals: Option<usize>,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    pub use_grouping: bool,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            decimals: None,
            min_fraction_digits: 0,
            max_fraction_digits: 2,
            use_grouping: true,
        }
    }
}

impl NumberOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn min_fraction_digits(mut self, digits: usize) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    fn fraction_range(&self) -> (usize, usize) {
        match self.decimals {
            Some(d) => (d, d),
            None => (self.min_fraction_digits, self.max_fraction_digits),
        }
    }

    fn render(&self, value: f64) -> String {
        let (min, max) = self.fraction_range();
        render(value, min, max, self.use_grouping)
    }
}

/// Format a number with grouping.
///
/// # Example
///
/// ```
/// use gpslab_format::{format_number, NumberOptions};
///
/// assert_eq!(format_number(1234567.891, &NumberOptions::default()), "1,234,567.89");
/// assert_eq!(format_number(f64::NAN, &NumberOptions::default()), "0");
/// assert_eq!(format_number("oops", &NumberOptions::default()), "0");
/// ```
pub fn format_number(value: impl Into<NumberInput>, options: &NumberOptions) -> String {
    options.render(value.into().or_zero())
}

/// Format with exactly `decimals` fraction digits.
pub fn format_decimal(value: impl Into<NumberInput>, decimals: usize, locale: &Locale) -> String {
    let options = NumberOptions::new().locale(locale.clone()).decimals(decimals);
    format_number(value, &options)
}

/// Format `value` prefixed with `+` when positive.
pub fn format_signed(value: impl Into<NumberInput>, options: &NumberOptions) -> String {
    let value = value.into().or_zero();
    let text = options.render(value);
    if value > 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("+{}", text)
    } else {
        text
    }
}

/// Format `value` after clamping it into `[min, max]` (bounds in either order).
pub fn format_clamped(
    value: impl Into<NumberInput>,
    min: impl Into<NumberInput>,
    max: impl Into<NumberInput>,
    options: &NumberOptions,
) -> String {
    let (lo, hi) = ordered(min.into().or_zero(), max.into().or_zero());
    options.render(value.into().or_zero().clamp(lo, hi))
}

/// Format a `min - max` range; a single value when both ends render the same.
pub fn format_range(
    min: impl Into<NumberInput>,
    max: impl Into<NumberInput>,
    options: &NumberOptions,
) -> String {
    let (lo, hi) = ordered(min.into().or_zero(), max.into().or_zero());
    let (lo, hi) = (options.render(lo), options.render(hi));
    if lo == hi {
        return lo;
    }
    let separator = match options.locale.supported() {
        SupportedLocale::KoKr => "~",
        SupportedLocale::EnUs | SupportedLocale::SwKe => " - ",
    };
    format!("{}{}{}", lo, separator, hi)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

// ============================================================================
// Percentages
// ============================================================================

/// Percentage formatting options.
#[derive(Debug, Clone)]
pub struct PercentOptions {
    pub locale: Locale,
    pub decimals: usize,
    /// Input is a fraction in `[0, 1]` rather than a 0-100 value
    pub from_fraction: bool,
    /// Clamp the percentage into `[0, 100]`
    pub clamp: bool,
}

impl Default for PercentOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            decimals: 0,
            from_fraction: true,
            clamp: false,
        }
    }
}

impl PercentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn from_fraction(mut self, from_fraction: bool) -> Self {
        self.from_fraction = from_fraction;
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

/// Format a percentage.
///
/// ```
/// use gpslab_format::{format_percentage, PercentOptions};
///
/// assert_eq!(format_percentage(0.75, &PercentOptions::default()), "75%");
/// assert_eq!(format_percentage(42.5, &PercentOptions::new().from_fraction(false).decimals(1)), "42.5%");
/// ```
pub fn format_percentage(value: impl Into<NumberInput>, options: &PercentOptions) -> String {
    let value = value.into().or_zero();
    let mut percent = if options.from_fraction { value * 100.0 } else { value };
    if options.clamp {
        percent = percent.clamp(0.0, 100.0);
    }
    format!("{}%", render(percent, options.decimals, options.decimals, true))
}

/// Progress from a fraction, always clamped to `0%..=100%`.
pub fn format_progress(value: impl Into<NumberInput>, locale: &Locale) -> String {
    let options = PercentOptions::new().locale(locale.clone()).clamp(true);
    format_percentage(value, &options)
}

/// Progress of `current` out of `total`; `0%` when `total` is not positive.
pub fn format_progress_ratio(
    current: impl Into<NumberInput>,
    total: impl Into<NumberInput>,
    locale: &Locale,
) -> String {
    let total = total.into().or_zero();
    if total <= 0.0 {
        return "0%".to_string();
    }
    format_progress(current.into().or_zero() / total, locale)
}

// ============================================================================
// Compact notation
// ============================================================================

const LATIN_UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
const KOREAN_UNITS: &[(f64, &str)] = &[(1e12, "조"), (1e8, "억"), (1e4, "만"), (1e3, "천")];

fn compact_units(locale: &Locale) -> &'static [(f64, &'static str)] {
    match locale.supported() {
        SupportedLocale::KoKr => KOREAN_UNITS,
        SupportedLocale::EnUs | SupportedLocale::SwKe => LATIN_UNITS,
    }
}

/// Compact notation options.
#[derive(Debug, Clone)]
pub struct CompactOptions {
    pub locale: Locale,
    /// Magnitudes below this are formatted in full
    pub threshold: f64,
    pub decimals: usize,
}

impl Default for CompactOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            threshold: 1000.0,
            decimals: 1,
        }
    }
}

impl CompactOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

/// Format a number in compact notation.
///
/// ```
/// use gpslab_format::{format_compact, CompactOptions};
/// use gpslab_i18n::Locale;
///
/// assert_eq!(format_compact(1500, &CompactOptions::default()), "1.5K");
/// assert_eq!(format_compact(2_000_000, &CompactOptions::default()), "2M");
/// assert_eq!(format_compact(15000, &CompactOptions::new().locale(Locale::ko_kr())), "1.5만");
/// assert_eq!(format_compact(999, &CompactOptions::default()), "999");
/// ```
pub fn format_compact(value: impl Into<NumberInput>, options: &CompactOptions) -> String {
    let value = value.into().or_zero();
    let magnitude = value.abs();

    let plain = || render(value, 0, options.decimals, true);
    if magnitude < options.threshold {
        return plain();
    }

    let units = compact_units(&options.locale);
    let Some(mut index) = units.iter().position(|(size, _)| magnitude >= *size) else {
        return plain();
    };

    // Rounding can carry into the next unit (999,950 -> 1000K -> 1M).
    if index > 0 {
        let scaled = round_half_up(magnitude / units[index].0, options.decimals as u32);
        if scaled * units[index].0 >= units[index - 1].0 {
            index -= 1;
        }
    }

    let (size, suffix) = units[index];
    let sign = if value < 0.0 { "-" } else { "" };
    let scaled = render(magnitude / size, 0, options.decimals, true);
    format!("{}{}{}", sign, scaled, suffix)
}

// ============================================================================
// Ordinals
// ============================================================================

/// Format an ordinal (`1st`, `3번째`, `wa 3`).
///
/// ```
/// use gpslab_format::format_ordinal;
/// use gpslab_i18n::Locale;
///
/// assert_eq!(format_ordinal(22, &Locale::en_us()), "22nd");
/// assert_eq!(format_ordinal(13, &Locale::en_us()), "13th");
/// assert_eq!(format_ordinal(3, &Locale::ko_kr()), "3번째");
/// ```
pub fn format_ordinal(n: impl Into<NumberInput>, locale: &Locale) -> String {
    let n = n.into().or_zero().trunc() as i64;
    let count = n.to_string();
    let category = ordinal_category(n, locale);
    match catalog().plural_form("ordinal", category, locale) {
        Some(template) => interpolate(&template, &[("count", &count)]),
        None => count,
    }
}
