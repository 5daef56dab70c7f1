//! Text Formatting
//!
//! Case conversion, truncation and URL slugs.

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Abbreviations kept uppercase by title and sentence casing.
pub const ACRONYMS: &[&str] = &[
    "GPS", "PSB", "AI", "API", "ID", "UI", "UX", "URL", "FAQ", "NFT", "CEO", "USA", "KPI", "MVP",
];

fn acronym(word: &str) -> Option<&'static str> {
    let core = word.trim_matches(|c: char| !c.is_alphanumeric());
    if core.is_empty() {
        return None;
    }
    ACRONYMS
        .iter()
        .find(|a| a.eq_ignore_ascii_case(core))
        .copied()
}

/// Replace the alphanumeric core of `word` with its acronym spelling.
fn with_acronym(word: &str, acronym: &str) -> String {
    let start = word.find(|c: char| c.is_alphanumeric()).unwrap_or(0);
    let end = word
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| i + word[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(word.len());
    format!("{}{}{}", &word[..start], acronym, &word[end..])
}

// ============================================================================
// Case conversion
// ============================================================================

/// `gpsLabMission`
pub fn to_camel_case(text: &str) -> String {
    text.to_lower_camel_case()
}

/// `GpsLabMission`
pub fn to_pascal_case(text: &str) -> String {
    text.to_pascal_case()
}

/// `gps_lab_mission`
pub fn to_snake_case(text: &str) -> String {
    text.to_snake_case()
}

/// `gps-lab-mission`
pub fn to_kebab_case(text: &str) -> String {
    text.to_kebab_case()
}

/// `GPS_LAB_MISSION`
pub fn to_constant_case(text: &str) -> String {
    text.to_shouty_snake_case()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_tail(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Capitalize each whitespace-separated word, keeping known acronyms uppercase.
///
/// ```
/// use gpslab_format::to_title_case;
///
/// assert_eq!(to_title_case("welcome to the gps lab api"), "Welcome To The GPS Lab API");
/// ```
pub fn to_title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| match acronym(word) {
            Some(a) => with_acronym(word, a),
            None => lower_tail(word),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize the first word and lowercase the rest, keeping known acronyms.
pub fn to_sentence_case(text: &str) -> String {
    text.split_whitespace()
        .enumerate()
        .map(|(i, word)| match acronym(word) {
            Some(a) => with_acronym(word, a),
            None if i == 0 => lower_tail(word),
            None => word.to_lowercase(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Truncation
// ============================================================================

/// Truncation options. Lengths count characters, not bytes.
#[derive(Debug, Clone)]
pub struct TruncateOptions {
    /// Maximum length of the result, ellipsis included
    pub max_length: usize,
    pub ellipsis: String,
    /// Cut at the last whole word when possible
    pub word_boundary: bool,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            max_length: 100,
            ellipsis: "...".to_string(),
            word_boundary: true,
        }
    }
}

impl TruncateOptions {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }

    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn word_boundary(mut self, word_boundary: bool) -> Self {
        self.word_boundary = word_boundary;
        self
    }
}

/// Shorten `text` to at most `max_length` characters.
///
/// ```
/// use gpslab_format::{truncate, TruncateOptions};
///
/// assert_eq!(truncate("The quick brown fox", &TruncateOptions::new(12)), "The quick...");
/// assert_eq!(truncate("short", &TruncateOptions::new(12)), "short");
/// ```
pub fn truncate(text: &str, options: &TruncateOptions) -> String {
    if text.chars().count() <= options.max_length {
        return text.to_string();
    }

    let ellipsis_len = options.ellipsis.chars().count();
    if options.max_length <= ellipsis_len {
        return options.ellipsis.chars().take(options.max_length).collect();
    }

    let keep = options.max_length - ellipsis_len;
    let mut cut: String = text.chars().take(keep).collect();

    if options.word_boundary {
        let next_is_space = text.chars().nth(keep).is_some_and(char::is_whitespace);
        if !next_is_space
            && let Some(idx) = cut.rfind(char::is_whitespace)
            && idx > 0
        {
            cut.truncate(idx);
        }
    }

    format!("{}{}", cut.trim_end(), options.ellipsis)
}

/// Keep the first `max_words` words.
pub fn truncate_words(text: &str, max_words: usize, ellipsis: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}{}", words[..max_words].join(" "), ellipsis)
}

// ============================================================================
// Slugs
// ============================================================================

/// Slug options.
#[derive(Debug, Clone)]
pub struct SlugOptions {
    pub separator: char,
    pub max_length: Option<usize>,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: '-',
            max_length: None,
        }
    }
}

impl SlugOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

/// URL-safe slug: ASCII letters and digits plus Hangul, with diacritics
/// stripped and every other run collapsed into one separator.
///
/// ```
/// use gpslab_format::{slugify, SlugOptions};
///
/// assert_eq!(slugify("Café au Lait!", &SlugOptions::default()), "cafe-au-lait");
/// assert_eq!(slugify("GPS 연구소 2024", &SlugOptions::default()), "gps-연구소-2024");
/// ```
pub fn slugify(text: &str, options: &SlugOptions) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending = false;

    let push = |slug: &mut String, c: char, pending: &mut bool| {
        if *pending && !slug.is_empty() {
            slug.push(options.separator);
        }
        *pending = false;
        slug.push(c);
    };

    for c in text.chars() {
        if is_hangul(c) {
            push(&mut slug, c, &mut pending);
            continue;
        }
        if matches!(c, '\'' | '\u{2019}') {
            continue;
        }
        for d in std::iter::once(c).nfd() {
            if is_combining_mark(d) {
                continue;
            }
            if d.is_ascii_alphanumeric() {
                push(&mut slug, d.to_ascii_lowercase(), &mut pending);
            } else {
                pending = true;
            }
        }
    }

    if let Some(max) = options.max_length
        && slug.chars().count() > max
    {
        slug = slug.chars().take(max).collect();
        while slug.ends_with(options.separator) {
            slug.pop();
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_camel_case("gps lab mission"), "gpsLabMission");
        assert_eq!(to_pascal_case("gps_lab_mission"), "GpsLabMission");
        assert_eq!(to_snake_case("GpsLabMission"), "gps_lab_mission");
        assert_eq!(to_kebab_case("gps lab mission"), "gps-lab-mission");
        assert_eq!(to_constant_case("gpsLabMission"), "GPS_LAB_MISSION");
    }

    #[test]
    fn test_title_case_acronyms() {
        assert_eq!(to_title_case("the ai and ux of gps"), "The AI And UX Of GPS");
        assert_eq!(to_title_case("HELLO   world"), "Hello World");
        assert_eq!(to_title_case("faq: (api) keys"), "FAQ: (API) Keys");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(to_sentence_case("hello WORLD from the gps lab"), "Hello world from the GPS lab");
        assert_eq!(to_sentence_case("api keys ROTATE daily"), "API keys rotate daily");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello World"), "Hello World");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_truncate_word_boundary() {
        let opts = TruncateOptions::new(12);
        assert_eq!(truncate("The quick brown fox", &opts), "The quick...");
        assert_eq!(truncate("Exactly twelve", &TruncateOptions::new(14)), "Exactly twelve");

        let hard = TruncateOptions::new(12).word_boundary(false);
        assert_eq!(truncate("The quick brown fox", &hard), "The quick...");
        assert_eq!(truncate("Supercalifragilistic", &hard), "Supercali...");
        // No whitespace to break on: hard cut.
        assert_eq!(truncate("Supercalifragilistic", &opts), "Supercali...");
    }

    #[test]
    fn test_truncate_edges() {
        assert_eq!(truncate("abcdef", &TruncateOptions::new(2)), "..");
        assert_eq!(truncate("안녕하세요 여러분", &TruncateOptions::new(6).ellipsis("…")), "안녕하세요…");
        assert_eq!(truncate("abcdef", &TruncateOptions::new(4).ellipsis("")), "abcd");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two three four", 2, "..."), "one two...");
        assert_eq!(truncate_words("one two", 2, "..."), "one two");
    }

    #[test]
    fn test_slugify() {
        let opts = SlugOptions::default();
        assert_eq!(slugify("Hello, World!", &opts), "hello-world");
        assert_eq!(slugify("  --Crème brûlée--  ", &opts), "creme-brulee");
        assert_eq!(slugify("Don't stop", &opts), "dont-stop");
        assert_eq!(slugify("안녕 GPS", &opts), "안녕-gps");
        assert_eq!(slugify("!!!", &opts), "");
    }

    #[test]
    fn test_slug_options() {
        let underscore = SlugOptions::new().separator('_');
        assert_eq!(slugify("Mission Two", &underscore), "mission_two");

        let short = SlugOptions::new().max_length(8);
        assert_eq!(slugify("stage twelve review", &short), "stage-tw");
        assert_eq!(slugify("stage one", &SlugOptions::new().max_length(6)), "stage");
    }
}
