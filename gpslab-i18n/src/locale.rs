//! Locale Resolution and Accept-Language Negotiation
//!
//! GPS Lab ships tables for three locales: English (`en-US`), Korean
//! (`ko-KR`) and Swahili (`sw-KE`). Any other tag is carried through
//! unchanged by the resolver and formatted with the default tables.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Tag used when no locale is given.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Short language code to full tag.
const SHORT_CODES: &[(&str, &str)] = &[("en", "en-US"), ("ko", "ko-KR"), ("sw", "sw-KE")];

/// A locale with built-in formatting tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SupportedLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "sw-KE")]
    SwKe,
}

impl SupportedLocale {
    pub const ALL: [SupportedLocale; 3] = [Self::EnUs, Self::KoKr, Self::SwKe];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::KoKr => "ko-KR",
            Self::SwKe => "sw-KE",
        }
    }

    pub fn language(&self) -> &'static str {
        match self {
            Self::EnUs => "en",
            Self::KoKr => "ko",
            Self::SwKe => "sw",
        }
    }

    /// Look up by primary language subtag, case-insensitively.
    pub fn from_language(language: &str) -> Option<Self> {
        match language.to_ascii_lowercase().as_str() {
            "en" => Some(Self::EnUs),
            "ko" => Some(Self::KoKr),
            "sw" => Some(Self::SwKe),
            _ => None,
        }
    }

    /// Pick the tables for an arbitrary tag, defaulting to English.
    pub fn for_tag(tag: &str) -> Self {
        Self::from_language(primary_subtag(tag)).unwrap_or_default()
    }

    pub fn locale(&self) -> Locale {
        Locale::from(*self)
    }
}

impl fmt::Display for SupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.trim().split(['-', '_']).next().unwrap_or_default()
}

/// Map a user-supplied locale string to a supported tag.
///
/// The primary subtag is looked up in the short-code table. Unknown
/// non-empty input is returned as given; empty or absent input resolves to
/// [`DEFAULT_LOCALE`]. Never fails.
///
/// ```
/// use gpslab_i18n::resolve_locale;
///
/// assert_eq!(resolve_locale(Some("ko")), "ko-KR");
/// assert_eq!(resolve_locale(Some("EN-gb")), "en-US");
/// assert_eq!(resolve_locale(Some("fr-FR")), "fr-FR");
/// assert_eq!(resolve_locale(None), "en-US");
/// ```
pub fn resolve_locale(input: Option<&str>) -> String {
    let input = input.map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return DEFAULT_LOCALE.to_string();
    }

    let primary = primary_subtag(input).to_ascii_lowercase();
    SHORT_CODES
        .iter()
        .find(|(short, _)| *short == primary)
        .map(|(_, tag)| (*tag).to_string())
        .unwrap_or_else(|| input.to_string())
}

/// A language tag: language, optional script and optional region.
///
/// ```
/// use gpslab_i18n::Locale;
/// use std::str::FromStr;
///
/// let ko = Locale::from_str("ko-KR").unwrap();
/// assert_eq!(ko.tag(), "ko-KR");
/// assert_eq!(ko.language, "ko");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// ISO 639 language code, lowercase
    pub language: String,
    /// ISO 3166 region code, uppercase
    pub region: Option<String>,
    /// ISO 15924 script, title case
    pub script: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
            script: None,
        }
    }

    /// Parse a BCP 47 tag such as `ko-KR` or `sw_KE`.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default().to_lowercase();

        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                let mut chars = part.chars();
                script = chars.next().map(|first| {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                });
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                region = Some(part.to_string());
            }
        }

        Ok(Self {
            language,
            region,
            script,
        })
    }

    /// Resolve arbitrary input the way [`resolve_locale`] does and parse
    /// the result, using the default locale when the tag is unusable.
    pub fn resolve(input: Option<&str>) -> Self {
        let resolved = resolve_locale(input);
        Self::parse(&resolved).unwrap_or_else(|_| {
            gpslab_log::debug!("unparseable locale {:?}, using {}", resolved, DEFAULT_LOCALE);
            Self::default()
        })
    }

    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(ref script) = self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(ref region) = self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// Formatting tables to use; unsupported languages get English.
    pub fn supported(&self) -> SupportedLocale {
        SupportedLocale::from_language(&self.language).unwrap_or_default()
    }

    pub fn is_supported(&self) -> bool {
        SupportedLocale::from_language(&self.language).is_some()
    }

    /// Match score, higher is better: 100 exact, 50 language and region,
    /// 10 language only, 0 no match.
    pub fn match_score(&self, other: &Locale) -> u32 {
        if self.language != other.language {
            return 0;
        }
        if self == other {
            return 100;
        }

        let mut score = 10;
        if self.region.is_some() && self.region == other.region {
            score += 40;
        }
        if self.script.is_some() && self.script == other.script {
            score += 15;
        }
        score
    }

    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    pub fn ko_kr() -> Self {
        Self::new("ko", Some("KR"))
    }

    pub fn sw_ke() -> Self {
        Self::new("sw", Some("KE"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl From<SupportedLocale> for Locale {
    fn from(supported: SupportedLocale) -> Self {
        match supported {
            SupportedLocale::EnUs => Self::en_us(),
            SupportedLocale::KoKr => Self::ko_kr(),
            SupportedLocale::SwKe => Self::sw_ke(),
        }
    }
}

/// Builder for locales assembled from separate parts.
#[derive(Debug, Default)]
pub struct LocaleBuilder {
    language: Option<String>,
    region: Option<String>,
    script: Option<String>,
}

impl LocaleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Validate the parts by round-tripping them through [`Locale::parse`].
    pub fn build(self) -> Result<Locale> {
        let language = self
            .language
            .ok_or_else(|| I18nError::InvalidLocale("missing language".to_string()))?;

        let tag = [Some(language), self.script, self.region]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("-");
        Locale::parse(&tag)
    }
}

// ============================================================================
// Accept-Language Parsing
// ============================================================================

#[derive(Debug, Clone)]
struct WeightedLocale {
    locale: Locale,
    quality: f32,
}

/// Parse an `Accept-Language` header into locales, highest quality first.
/// Wildcards and malformed entries are skipped; equal weights keep their
/// header order.
///
/// ```
/// use gpslab_i18n::parse_accept_language;
///
/// let locales = parse_accept_language("ko-KR,ko;q=0.9,en;q=0.8,*;q=0.1");
/// assert_eq!(locales.len(), 3);
/// assert_eq!(locales[0].tag(), "ko-KR");
/// assert_eq!(locales[2].tag(), "en");
/// ```
pub fn parse_accept_language(header: &str) -> Vec<Locale> {
    let mut entries: Vec<WeightedLocale> = header
        .split(',')
        .filter_map(|part| {
            let mut split = part.trim().splitn(2, ';');
            let tag = split.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = split
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|q| q.parse().ok())
                .unwrap_or(1.0);

            let locale = Locale::parse(tag).ok()?;
            Some(WeightedLocale { locale, quality })
        })
        .collect();

    entries.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    entries.into_iter().map(|e| e.locale).collect()
}

/// Pick the best available locale for the requested list.
///
/// Exact matches win; otherwise the first available locale sharing the
/// requested language. Falls back to `default`.
pub fn negotiate_locale<'a>(
    requested: &[Locale],
    available: &'a [Locale],
    default: &'a Locale,
) -> &'a Locale {
    for req in requested {
        if let Some(locale) = available.iter().find(|a| *a == req) {
            return locale;
        }
        if let Some(locale) = available.iter().find(|a| a.match_score(req) > 0) {
            return locale;
        }
    }
    default
}

/// Negotiate an `Accept-Language` header against the built-in locales.
pub fn negotiate_supported(header: &str) -> SupportedLocale {
    parse_accept_language(header)
        .iter()
        .find_map(|locale| SupportedLocale::from_language(&locale.language))
        .unwrap_or_default()
}
