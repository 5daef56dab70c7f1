//! Currency Formatting
//!
//! Fiat currencies plus the platform's digital point currencies
//! (Baraka `β` and PSB).

use gpslab_i18n::{Locale, SupportedLocale};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::NumberInput;
use crate::number::{CompactOptions, format_compact, render};

/// Currencies with known display rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    KRW,
    KES,
    EUR,
    /// Platform reward points
    Baraka,
    /// Platform stable balance
    PSB,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Self::USD,
        Self::KRW,
        Self::KES,
        Self::EUR,
        Self::Baraka,
        Self::PSB,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::KRW => "KRW",
            Self::KES => "KES",
            Self::EUR => "EUR",
            Self::Baraka => "BARAKA",
            Self::PSB => "PSB",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::KRW => "₩",
            Self::KES => "KSh",
            Self::EUR => "€",
            Self::Baraka => "β",
            Self::PSB => "PSB",
        }
    }

    /// Fraction digits shown by default
    pub fn decimals(&self) -> usize {
        match self {
            Self::KRW | Self::Baraka | Self::PSB => 0,
            _ => 2,
        }
    }

    /// Symbol goes before the amount
    pub fn symbol_before(&self) -> bool {
        matches!(self, Self::USD | Self::KRW | Self::KES | Self::EUR)
    }

    /// Symbol is separated from the amount by a space
    fn symbol_spaced(&self) -> bool {
        matches!(self, Self::KES | Self::Baraka | Self::PSB)
    }

    pub fn is_digital(&self) -> bool {
        matches!(self, Self::Baraka | Self::PSB)
    }

    /// Parse from a code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Self::USD),
            "KRW" => Some(Self::KRW),
            "KES" => Some(Self::KES),
            "EUR" => Some(Self::EUR),
            "BARAKA" => Some(Self::Baraka),
            "PSB" => Some(Self::PSB),
            _ => None,
        }
    }

    /// Localized display name.
    pub fn name(&self, locale: &Locale) -> &'static str {
        use SupportedLocale::*;
        match (self, locale.supported()) {
            (Self::USD, EnUs) => "US Dollar",
            (Self::USD, KoKr) => "미국 달러",
            (Self::USD, SwKe) => "Dola ya Marekani",
            (Self::KRW, EnUs) => "South Korean Won",
            (Self::KRW, KoKr) => "원",
            (Self::KRW, SwKe) => "Won ya Korea Kusini",
            (Self::KES, EnUs) => "Kenyan Shilling",
            (Self::KES, KoKr) => "케냐 실링",
            (Self::KES, SwKe) => "Shilingi ya Kenya",
            (Self::EUR, EnUs) => "Euro",
            (Self::EUR, KoKr) => "유로",
            (Self::EUR, SwKe) => "Yuro",
            (Self::Baraka, KoKr) => "바라카",
            (Self::Baraka, _) => "Baraka",
            (Self::PSB, _) => "PSB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Fiat formatting
// ============================================================================

/// Currency formatting options.
#[derive(Debug, Clone)]
pub struct CurrencyOptions {
    pub locale: Locale,
    pub show_symbol: bool,
    /// Append the currency code instead of the symbol
    pub show_code: bool,
    /// Override the currency's default fraction digits
    pub decimals: Option<usize>,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            show_symbol: true,
            show_code: false,
            decimals: None,
        }
    }
}

impl CurrencyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn show_symbol(mut self, show: bool) -> Self {
        self.show_symbol = show;
        self
    }

    pub fn show_code(mut self, show: bool) -> Self {
        self.show_code = show;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

fn signed(amount: f64, body: String) -> String {
    let has_value = body.chars().any(|c| c.is_ascii_digit() && c != '0');
    if amount < 0.0 && has_value {
        format!("-{}", body)
    } else {
        body
    }
}

fn attach_symbol(currency: Currency, number: &str) -> String {
    let space = if currency.symbol_spaced() { " " } else { "" };
    if currency.symbol_before() {
        format!("{}{}{}", currency.symbol(), space, number)
    } else {
        format!("{}{}{}", number, space, currency.symbol())
    }
}

/// Format an amount of money.
///
/// Unknown codes are appended after the amount with two fraction digits.
///
/// # Example
///
/// ```
/// use gpslab_format::{format_currency, CurrencyOptions};
///
/// let opts = CurrencyOptions::default();
/// assert_eq!(format_currency(1234.56, "USD", &opts), "$1,234.56");
/// assert_eq!(format_currency(1234.56, "KRW", &opts), "₩1,235");
/// assert_eq!(format_currency(1234.56, "KES", &opts), "KSh 1,234.56");
/// assert_eq!(format_currency(1234.56, "XYZ", &opts), "1,234.56 XYZ");
/// ```
pub fn format_currency(
    amount: impl Into<NumberInput>,
    code: &str,
    options: &CurrencyOptions,
) -> String {
    let amount = amount.into().or_zero();

    let Some(currency) = Currency::from_code(code) else {
        gpslab_log::debug!("unknown currency code {:?}, using code suffix", code);
        let decimals = options.decimals.unwrap_or(2);
        let number = render(amount.abs(), decimals, decimals, true);
        let code = code.trim().to_uppercase();
        let body = if code.is_empty() {
            number
        } else {
            format!("{} {}", number, code)
        };
        return signed(amount, body);
    };

    let decimals = options.decimals.unwrap_or(currency.decimals());
    let number = render(amount.abs(), decimals, decimals, true);
    let body = if options.show_code {
        format!("{} {}", number, currency.code())
    } else if options.show_symbol {
        attach_symbol(currency, &number)
    } else {
        number
    };
    signed(amount, body)
}

// ============================================================================
// Point currencies
// ============================================================================

/// Baraka / PSB formatting options.
#[derive(Debug, Clone)]
pub struct PointOptions {
    pub locale: Locale,
    /// Use compact notation (`1.5K β`)
    pub compact: bool,
    pub show_symbol: bool,
    /// Use the localized currency name instead of the symbol
    pub show_name: bool,
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            compact: false,
            show_symbol: true,
            show_name: false,
        }
    }
}

impl PointOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn show_symbol(mut self, show: bool) -> Self {
        self.show_symbol = show;
        self
    }

    pub fn show_name(mut self, show: bool) -> Self {
        self.show_name = show;
        self
    }
}

fn format_points(amount: impl Into<NumberInput>, currency: Currency, options: &PointOptions) -> String {
    let amount = amount.into().or_zero();
    let number = if options.compact {
        let compact = CompactOptions::new().locale(options.locale.clone());
        format_compact(amount.abs(), &compact)
    } else {
        render(amount.abs(), 0, 0, true)
    };

    let body = if options.show_name {
        format!("{} {}", number, currency.name(&options.locale))
    } else if options.show_symbol {
        attach_symbol(currency, &number)
    } else {
        number
    };
    signed(amount, body)
}

/// Format a Baraka balance (`1,234 β`).
///
/// ```
/// use gpslab_format::{format_baraka, PointOptions};
///
/// assert_eq!(format_baraka(1234, &PointOptions::default()), "1,234 β");
/// assert_eq!(format_baraka(1500, &PointOptions::new().compact(true)), "1.5K β");
/// ```
pub fn format_baraka(amount: impl Into<NumberInput>, options: &PointOptions) -> String {
    format_points(amount, Currency::Baraka, options)
}

/// Format a PSB balance (`1,234 PSB`).
pub fn format_psb(amount: impl Into<NumberInput>, options: &PointOptions) -> String {
    format_points(amount, Currency::PSB, options)
}

/// Read a number back out of formatted currency text.
///
/// Keeps digits and the decimal point; a `-` before the first digit makes
/// the result negative. Compact suffixes are not expanded. Unparsable
/// text yields `0.0`.
///
/// ```
/// use gpslab_format::parse_currency_string;
///
/// assert_eq!(parse_currency_string("$1,234.56"), 1234.56);
/// assert_eq!(parse_currency_string("-1,234 β"), -1234.0);
/// assert_eq!(parse_currency_string("free"), 0.0);
/// ```
pub fn parse_currency_string(text: &str) -> f64 {
    let mut negative = false;
    let mut digits = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '0'..='9' | '.' => digits.push(c),
            '-' if digits.is_empty() => negative = true,
            _ => {}
        }
    }
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => 0.0,
    }
}

// ============================================================================
// Balance changes
// ============================================================================

/// Direction of a balance change, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTone {
    Positive,
    Negative,
    Neutral,
}

impl ChangeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            ChangeTone::Positive => "text-green-600",
            ChangeTone::Negative => "text-red-600",
            ChangeTone::Neutral => "text-gray-500",
        }
    }
}

/// A signed balance change ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeDisplay {
    /// `+50 β`, `-20 β`, `0 β`
    pub text: String,
    pub value: f64,
    pub is_positive: bool,
    pub is_negative: bool,
    pub is_zero: bool,
    pub tone: ChangeTone,
}

/// Format a Baraka delta with an explicit sign.
pub fn format_baraka_change(delta: impl Into<NumberInput>, locale: &Locale) -> ChangeDisplay {
    format_points_change(delta, Currency::Baraka, locale)
}

/// Format a delta of any point currency with an explicit sign.
pub fn format_points_change(
    delta: impl Into<NumberInput>,
    currency: Currency,
    locale: &Locale,
) -> ChangeDisplay {
    let value = delta.into().or_zero();
    let options = PointOptions::new().locale(locale.clone());
    let magnitude = format_points(value.abs(), currency, &options);

    let rounded = value.round();
    let (tone, text) = if rounded > 0.0 {
        (ChangeTone::Positive, format!("+{}", magnitude))
    } else if rounded < 0.0 {
        (ChangeTone::Negative, format!("-{}", magnitude))
    } else {
        (ChangeTone::Neutral, magnitude)
    };

    ChangeDisplay {
        text,
        value,
        is_positive: tone == ChangeTone::Positive,
        is_negative: tone == ChangeTone::Negative,
        is_zero: tone == ChangeTone::Neutral,
        tone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_lookup() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code(" Baraka "), Some(Currency::Baraka));
        assert_eq!(Currency::from_code("GBP"), None);
        assert_eq!(Currency::default(), Currency::USD);
        assert_eq!(Currency::KRW.decimals(), 0);
        assert!(Currency::PSB.is_digital());
        assert!(!Currency::EUR.is_digital());
        assert_eq!(Currency::KES.name(&Locale::sw_ke()), "Shilingi ya Kenya");
        for currency in Currency::ALL {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
        }
    }

    #[test]
    fn test_format_fiat() {
        let opts = CurrencyOptions::default();
        assert_eq!(format_currency(1234.56, "USD", &opts), "$1,234.56");
        assert_eq!(format_currency(1234.56, "KRW", &opts), "₩1,235");
        assert_eq!(format_currency(1234.56, "KES", &opts), "KSh 1,234.56");
        assert_eq!(format_currency(1234.56, "EUR", &opts), "€1,234.56");
        assert_eq!(format_currency(5, "USD", &opts), "$5.00");
    }

    #[test]
    fn test_format_fiat_options() {
        let code = CurrencyOptions::new().show_code(true);
        assert_eq!(format_currency(1234.56, "USD", &code), "1,234.56 USD");

        let bare = CurrencyOptions::new().show_symbol(false);
        assert_eq!(format_currency(1234.56, "USD", &bare), "1,234.56");

        let whole = CurrencyOptions::new().decimals(0);
        assert_eq!(format_currency(99.5, "USD", &whole), "$100");
    }

    #[test]
    fn test_negative_and_invalid() {
        let opts = CurrencyOptions::default();
        assert_eq!(format_currency(-42.5, "USD", &opts), "-$42.50");
        assert_eq!(format_currency(-0.001, "USD", &opts), "$0.00");
        assert_eq!(format_currency(f64::NAN, "USD", &opts), "$0.00");
        assert_eq!(format_currency("n/a", "KRW", &opts), "₩0");
    }

    #[test]
    fn test_unknown_code() {
        let opts = CurrencyOptions::default();
        assert_eq!(format_currency(10, "xyz", &opts), "10.00 XYZ");
        assert_eq!(format_currency(10, "", &opts), "10.00");
    }

    #[test]
    fn test_points() {
        let opts = PointOptions::default();
        assert_eq!(format_baraka(1234, &opts), "1,234 β");
        assert_eq!(format_baraka(1234.6, &opts), "1,235 β");
        assert_eq!(format_psb(1234, &opts), "1,234 PSB");
        assert_eq!(format_baraka(-50, &opts), "-50 β");
        assert_eq!(format_baraka(2_500_000, &PointOptions::new().compact(true)), "2.5M β");
        assert_eq!(format_baraka(1234, &PointOptions::new().show_symbol(false)), "1,234");
        assert_eq!(
            format_baraka(10, &PointOptions::new().show_name(true).locale(Locale::ko_kr())),
            "10 바라카"
        );
        assert_eq!(
            format_baraka(15_000, &PointOptions::new().compact(true).locale(Locale::ko_kr())),
            "1.5만 β"
        );
    }

    #[test]
    fn test_parse_currency_string() {
        assert_eq!(parse_currency_string("₩1,235"), 1235.0);
        assert_eq!(parse_currency_string("KSh 1,234.56"), 1234.56);
        assert_eq!(parse_currency_string("-$42.50"), -42.5);
        assert_eq!(parse_currency_string(""), 0.0);
        assert_eq!(parse_currency_string("1.2.3"), 0.0);
        assert_eq!(parse_currency_string("1,234 β"), 1234.0);
    }

    #[test]
    fn test_round_trip_baraka() {
        for n in [0i64, 7, 999, 1000, 123_456, -5_000, 9_876_543] {
            let text = format_baraka(n, &PointOptions::default());
            assert_eq!(parse_currency_string(&text), n as f64, "{}", text);
        }
    }

    #[test]
    fn test_baraka_change() {
        let en = Locale::en_us();
        let up = format_baraka_change(50, &en);
        assert_eq!(up.text, "+50 β");
        assert!(up.is_positive);
        assert_eq!(up.tone.css_class(), "text-green-600");

        let down = format_baraka_change(-20, &en);
        assert_eq!(down.text, "-20 β");
        assert!(down.is_negative);
        assert_eq!(down.tone, ChangeTone::Negative);

        let flat = format_baraka_change(0.2, &en);
        assert_eq!(flat.text, "0 β");
        assert!(flat.is_zero);
        assert_eq!(flat.value, 0.2);

        let psb = format_points_change(1500, Currency::PSB, &en);
        assert_eq!(psb.text, "+1,500 PSB");
    }
}
