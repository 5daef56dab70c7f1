//! Message Catalog
//!
//! Per-locale bundles of plain messages, plural forms and template lists.
//! The built-in bundles are embedded JSON; applications can layer their own
//! bundles on top at runtime.
//!
//! Bundle JSON shape:
//!
//! ```json
//! {
//!   "relative": {
//!     "just_now": "just now",
//!     "minutes_ago": { "one": "{count} minute ago", "other": "{count} minutes ago" }
//!   },
//!   "messages": { "welcome": ["Welcome, {name}!", "Hi {name}!"] }
//! }
//! ```
//!
//! Nested objects flatten to dotted keys (`relative.just_now`). An object
//! whose keys are all plural category names is a plural message. Arrays
//! of strings are template lists.

use crate::{I18nError, Locale, PluralCategory, Result, SupportedLocale, plural_category};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_BUNDLES: [(SupportedLocale, &str); 3] = [
    (SupportedLocale::EnUs, include_str!("../locales/en-US.json")),
    (SupportedLocale::KoKr, include_str!("../locales/ko-KR.json")),
    (SupportedLocale::SwKe, include_str!("../locales/sw-KE.json")),
];

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

/// The process-wide catalog, preloaded with the built-in bundles.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Replace `{name}` placeholders.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

/// Messages for a single locale.
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
    plurals: HashMap<(String, PluralCategory), String>,
    lists: HashMap<String, Vec<String>>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(json)?;
        let Value::Object(root) = data else {
            return Err(I18nError::ParseError("bundle root must be an object".to_string()));
        };

        let mut bundle = Self::new();
        for (key, value) in root {
            bundle.absorb(key, value)?;
        }
        Ok(bundle)
    }

    fn absorb(&mut self, key: String, value: Value) -> Result<()> {
        match value {
            Value::String(s) => {
                self.messages.insert(key, s);
            }
            Value::Array(items) => {
                let templates = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        other => Err(I18nError::ParseError(format!(
                            "{}: template lists may only contain strings, found {}",
                            key, other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.lists.insert(key, templates);
            }
            Value::Object(map) => {
                let is_plural = !map.is_empty()
                    && map.keys().all(|k| PluralCategory::from_str(k).is_ok())
                    && map.values().all(Value::is_string);

                for (child, value) in map {
                    match (is_plural, value) {
                        (true, Value::String(s)) => {
                            let category = PluralCategory::from_str(&child)?;
                            self.plurals.insert((key.clone(), category), s);
                        }
                        (_, value) => self.absorb(format!("{}.{}", key, child), value)?,
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {
                return Err(I18nError::ParseError(format!(
                    "{}: expected string, list or object",
                    key
                )));
            }
        }
        Ok(())
    }

    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    pub fn add_plural(
        &mut self,
        key: impl Into<String>,
        category: PluralCategory,
        message: impl Into<String>,
    ) {
        self.plurals.insert((key.into(), category), message.into());
    }

    pub fn add_list<I, S>(&mut self, key: impl Into<String>, templates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(key.into(), templates.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Plural form for `category`, falling back to the `other` form.
    pub fn get_plural(&self, key: &str, category: PluralCategory) -> Option<&str> {
        let key = key.to_string();
        self.plurals
            .get(&(key.clone(), category))
            .or_else(|| self.plurals.get(&(key, PluralCategory::Other)))
            .map(String::as_str)
    }

    /// Non-empty template list.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.lists
            .get(key)
            .filter(|list| !list.is_empty())
            .map(Vec::as_slice)
    }

    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
            || self.lists.contains_key(key)
            || self.plurals.keys().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.messages.len() + self.plurals.len() + self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overlay `other` on this bundle; entries in `other` win.
    pub fn merge(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
        self.plurals.extend(other.plurals);
        self.lists.extend(other.lists);
    }
}

/// Thread-safe collection of bundles with locale fallback.
///
/// Lookups try the exact tag, then any bundle for the same language, then
/// the fallback locale (`en-US`). A key missing everywhere is returned as
/// the message text.
pub struct Catalog {
    bundles: RwLock<HashMap<String, MessageBundle>>,
    fallback: Locale,
}

impl Catalog {
    /// An empty catalog falling back to `en-US`.
    pub fn new() -> Self {
        Self {
            bundles: RwLock::new(HashMap::new()),
            fallback: Locale::en_us(),
        }
    }

    /// A catalog holding the embedded bundles.
    pub fn builtin() -> Self {
        let catalog = Self::new();
        for (locale, source) in BUILTIN_BUNDLES {
            match MessageBundle::from_json(source) {
                Ok(bundle) => catalog.add_bundle(&locale.locale(), bundle),
                Err(e) => gpslab_log::error!("built-in bundle {} is invalid: {}", locale, e),
            }
        }
        catalog
    }

    /// Add a bundle, merging into any bundle already present for the tag.
    pub fn add_bundle(&self, locale: &Locale, bundle: MessageBundle) {
        merge_into(&mut self.bundles.write(), locale, bundle);
    }

    /// Load every `<tag>.json` file in `dir` and merge it in.
    ///
    /// All files are parsed before any is merged, so an error leaves the
    /// catalog untouched. Returns how many bundles were loaded.
    pub fn load_from_dir(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let mut parsed = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| I18nError::ParseError(format!("invalid file name {:?}", path)))?;

            let locale = Locale::parse(stem)?;
            let bundle = MessageBundle::from_json(&fs::read_to_string(&path)?)?;
            gpslab_log::debug!("loaded {} entries for {} from {:?}", bundle.len(), locale, path);
            parsed.push((locale, bundle));
        }

        let loaded = parsed.len();
        let mut bundles = self.bundles.write();
        for (locale, bundle) in parsed {
            merge_into(&mut bundles, &locale, bundle);
        }
        Ok(loaded)
    }

    fn lookup<T>(&self, locale: &Locale, find: impl Fn(&MessageBundle) -> Option<T>) -> Option<T> {
        let bundles = self.bundles.read();

        let exact = bundles.get(&locale.tag()).and_then(&find);
        if exact.is_some() {
            return exact;
        }

        let mut same_language: Vec<(&String, &MessageBundle)> = bundles
            .iter()
            .filter(|(tag, _)| {
                tag.split('-').next().is_some_and(|lang| lang == locale.language)
                    && **tag != locale.tag()
            })
            .collect();
        same_language.sort_by(|a, b| a.0.cmp(b.0));
        if let Some(found) = same_language.into_iter().find_map(|(_, b)| find(b)) {
            return Some(found);
        }

        if locale.language != self.fallback.language {
            return bundles.get(&self.fallback.tag()).and_then(&find);
        }
        None
    }

    /// Translate a key.
    pub fn t(&self, key: &str, locale: &Locale) -> String {
        self.lookup(locale, |b| b.get(key).map(str::to_string))
            .unwrap_or_else(|| {
                gpslab_log::debug!("missing message {} for {}", key, locale);
                key.to_string()
            })
    }

    /// Translate and replace `{name}` placeholders.
    pub fn t_args(&self, key: &str, locale: &Locale, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key, locale), args)
    }

    /// Select the plural form for `count` and replace `{count}`.
    pub fn t_plural(&self, key: &str, count: i64, locale: &Locale) -> String {
        self.t_plural_args(key, count, locale, &[("count", &count.to_string())])
    }

    /// Select the plural form for `count` and replace the given placeholders.
    pub fn t_plural_args(
        &self,
        key: &str,
        count: i64,
        locale: &Locale,
        args: &[(&str, &str)],
    ) -> String {
        let category = plural_category(count as f64, locale);
        self.plural_form(key, category, locale)
            .map(|template| interpolate(&template, args))
            .unwrap_or_else(|| format!("{}[{}]", key, category))
    }

    /// Raw template for an explicit category (e.g. an ordinal category).
    pub fn plural_form(&self, key: &str, category: PluralCategory, locale: &Locale) -> Option<String> {
        self.lookup(locale, |b| b.get_plural(key, category).map(str::to_string))
    }

    /// Template list for a key; empty when no bundle has it.
    pub fn list(&self, key: &str, locale: &Locale) -> Vec<String> {
        self.lookup(locale, |b| b.get_list(key).map(<[String]>::to_vec))
            .unwrap_or_default()
    }

    /// Whether the locale's own bundle (no fallback) has the key.
    pub fn has(&self, key: &str, locale: &Locale) -> bool {
        self.bundles
            .read()
            .get(&locale.tag())
            .is_some_and(|b| b.has(key))
    }

    /// Tags with a registered bundle, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.bundles.read().keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("locales", &self.locales())
            .field("fallback", &self.fallback)
            .finish()
    }
}

fn merge_into(bundles: &mut HashMap<String, MessageBundle>, locale: &Locale, bundle: MessageBundle) {
    match bundles.get_mut(&locale.tag()) {
        Some(existing) => existing.merge(bundle),
        None => {
            bundles.insert(locale.tag(), bundle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> Catalog {
        let catalog = Catalog::new();

        let mut en = MessageBundle::new();
        en.add("hello", "Hello!");
        en.add("greeting", "Hello, {name}!");
        en.add("only_en", "English only");
        en.add_plural("items", PluralCategory::One, "{count} item");
        en.add_plural("items", PluralCategory::Other, "{count} items");
        en.add_list("cheers", ["Go {name}!", "Nice, {name}."]);
        catalog.add_bundle(&Locale::en_us(), en);

        let mut ko = MessageBundle::new();
        ko.add("hello", "안녕하세요!");
        ko.add_plural("items", PluralCategory::Other, "{count}개");
        catalog.add_bundle(&Locale::ko_kr(), ko);

        catalog
    }

    #[test]
    fn test_simple_translation() {
        let catalog = test_catalog();
        assert_eq!(catalog.t("hello", &Locale::en_us()), "Hello!");
        assert_eq!(catalog.t("hello", &Locale::ko_kr()), "안녕하세요!");
    }

    #[test]
    fn test_language_and_fallback_chain() {
        let catalog = test_catalog();
        let ko = Locale::new("ko", None::<&str>);
        assert_eq!(catalog.t("hello", &ko), "안녕하세요!");
        assert_eq!(catalog.t("only_en", &Locale::ko_kr()), "English only");
        assert_eq!(catalog.t("only_en", &Locale::new("fr", Some("FR"))), "English only");
        assert_eq!(catalog.t("missing.key", &Locale::ko_kr()), "missing.key");
    }

    #[test]
    fn test_translation_with_args() {
        let catalog = test_catalog();
        let msg = catalog.t_args("greeting", &Locale::en_us(), &[("name", "Amani")]);
        assert_eq!(msg, "Hello, Amani!");
    }

    #[test]
    fn test_plural_translation() {
        let catalog = test_catalog();
        assert_eq!(catalog.t_plural("items", 1, &Locale::en_us()), "1 item");
        assert_eq!(catalog.t_plural("items", 5, &Locale::en_us()), "5 items");
        assert_eq!(catalog.t_plural("items", 1, &Locale::ko_kr()), "1개");
        assert_eq!(catalog.t_plural("nothing", 2, &Locale::en_us()), "nothing[other]");
    }

    #[test]
    fn test_lists() {
        let catalog = test_catalog();
        assert_eq!(catalog.list("cheers", &Locale::ko_kr()).len(), 2);
        assert!(catalog.list("absent", &Locale::en_us()).is_empty());
    }

    #[test]
    fn test_bundle_from_json_shapes() {
        let bundle = MessageBundle::from_json(
            r#"{
                "relative": {
                    "just_now": "just now",
                    "days_ago": { "one": "{count} day ago", "other": "{count} days ago" }
                },
                "messages": { "welcome": ["Hi {name}", "Hello {name}"] }
            }"#,
        )
        .unwrap();

        assert_eq!(bundle.get("relative.just_now"), Some("just now"));
        assert_eq!(
            bundle.get_plural("relative.days_ago", PluralCategory::One),
            Some("{count} day ago")
        );
        assert_eq!(
            bundle.get_plural("relative.days_ago", PluralCategory::Few),
            Some("{count} days ago")
        );
        assert_eq!(bundle.get_list("messages.welcome").map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_bundle_rejects_bad_values() {
        assert!(MessageBundle::from_json("[]").is_err());
        assert!(MessageBundle::from_json(r#"{"n": 3}"#).is_err());
        assert!(MessageBundle::from_json(r#"{"l": ["a", 1]}"#).is_err());
    }

    #[test]
    fn test_add_bundle_merges() {
        let catalog = test_catalog();
        let mut overlay = MessageBundle::new();
        overlay.add("hello", "Howdy!");
        catalog.add_bundle(&Locale::en_us(), overlay);

        assert_eq!(catalog.t("hello", &Locale::en_us()), "Howdy!");
        assert_eq!(catalog.t("greeting", &Locale::en_us()), "Hello, {name}!");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sw-KE.json"), r#"{"hello": "Habari!"}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = test_catalog();
        assert_eq!(catalog.load_from_dir(dir.path()).unwrap(), 1);
        assert_eq!(catalog.t("hello", &Locale::sw_ke()), "Habari!");
    }

    #[test]
    fn test_failed_dir_load_merges_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ko-KR.json"), r#"{"only_ko": "한국어만"}"#).unwrap();
        std::fs::write(dir.path().join("sw-KE.json"), "[1, 2]").unwrap();

        let catalog = test_catalog();
        assert!(catalog.load_from_dir(dir.path()).is_err());
        assert!(!catalog.has("only_ko", &Locale::ko_kr()));
        assert_eq!(catalog.t("hello", &Locale::ko_kr()), "안녕하세요!");
    }

    #[test]
    fn test_load_from_missing_dir_fails() {
        let catalog = Catalog::new();
        assert!(catalog.load_from_dir("/definitely/not/here").is_err());
    }

    #[test]
    fn test_builtin_catalog_has_all_locales() {
        let tags = catalog().locales();
        for locale in SupportedLocale::ALL {
            assert!(tags.contains(&locale.tag().to_string()), "missing {}", locale);
            assert!(catalog().has("relative.just_now", &locale.locale()));
        }
    }
}
