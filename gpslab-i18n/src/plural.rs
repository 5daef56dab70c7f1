//! Plural and Ordinal Rules
//!
//! CLDR cardinal and ordinal categories for the supported languages.
//! English and Swahili distinguish `one` from `other`; Korean has a single
//! form. English ordinals use `one/two/few/other` (1st, 2nd, 3rd, 4th).

use crate::{I18nError, Locale, Result, SupportedLocale};
use std::str::FromStr;

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl FromStr for PluralCategory {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| I18nError::InvalidPluralCategory(s.to_string()))
    }
}

impl std::fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plural rules for one language.
pub trait PluralRules: Send + Sync {
    /// Cardinal category ("1 day", "2 days").
    fn category(&self, n: f64) -> PluralCategory;

    /// Ordinal category ("1st", "2nd").
    fn ordinal(&self, _n: i64) -> PluralCategory {
        PluralCategory::Other
    }

    fn categories(&self) -> &[PluralCategory];
}

/// English and Swahili: integer 1 is `one`, everything else `other`.
struct OneOther;

impl PluralRules for OneOther {
    fn category(&self, n: f64) -> PluralCategory {
        if n.abs() == 1.0 {
            PluralCategory::One
        } else {
            PluralCategory::Other
        }
    }

    fn categories(&self) -> &[PluralCategory] {
        &[PluralCategory::One, PluralCategory::Other]
    }
}

/// English cardinals plus English ordinals.
struct English;

impl PluralRules for English {
    fn category(&self, n: f64) -> PluralCategory {
        OneOther.category(n)
    }

    fn ordinal(&self, n: i64) -> PluralCategory {
        let n = n.unsigned_abs();
        match (n % 10, n % 100) {
            (_, 11..=13) => PluralCategory::Other,
            (1, _) => PluralCategory::One,
            (2, _) => PluralCategory::Two,
            (3, _) => PluralCategory::Few,
            _ => PluralCategory::Other,
        }
    }

    fn categories(&self) -> &[PluralCategory] {
        &[PluralCategory::One, PluralCategory::Other]
    }
}

/// Korean: a single form.
struct NoPlurals;

impl PluralRules for NoPlurals {
    fn category(&self, _n: f64) -> PluralCategory {
        PluralCategory::Other
    }

    fn categories(&self) -> &[PluralCategory] {
        &[PluralCategory::Other]
    }
}

static ENGLISH: English = English;
static SWAHILI: OneOther = OneOther;
static KOREAN: NoPlurals = NoPlurals;

/// Rules for a supported locale.
pub fn rules_for(locale: SupportedLocale) -> &'static dyn PluralRules {
    match locale {
        SupportedLocale::EnUs => &ENGLISH,
        SupportedLocale::KoKr => &KOREAN,
        SupportedLocale::SwKe => &SWAHILI,
    }
}

/// Cardinal category of `n` in `locale`.
///
/// ```
/// use gpslab_i18n::{plural_category, Locale, PluralCategory};
///
/// assert_eq!(plural_category(1, &Locale::en_us()), PluralCategory::One);
/// assert_eq!(plural_category(2, &Locale::sw_ke()), PluralCategory::Other);
/// assert_eq!(plural_category(1, &Locale::ko_kr()), PluralCategory::Other);
/// ```
pub fn plural_category(n: impl Into<f64>, locale: &Locale) -> PluralCategory {
    rules_for(locale.supported()).category(n.into())
}

/// Ordinal category of `n` in `locale`.
pub fn ordinal_category(n: i64, locale: &Locale) -> PluralCategory {
    rules_for(locale.supported()).ordinal(n)
}
