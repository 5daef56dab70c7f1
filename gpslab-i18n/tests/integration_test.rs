//! Integration tests for gpslab-i18n

use gpslab_i18n::*;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_builtin_locales_present() {
    let catalog = Catalog::builtin();
    let mut locales = catalog.locales();
    locales.sort();
    assert_eq!(locales, vec!["en-US", "ko-KR", "sw-KE"]);
}

#[test]
fn test_lookup_chain() {
    let catalog = Catalog::builtin();

    // exact
    assert_eq!(catalog.t("relative.yesterday", &Locale::ko_kr()), "어제");
    // same language, different region
    assert_eq!(catalog.t("relative.yesterday", &Locale::new("ko", None::<&str>)), "어제");
    // fallback locale
    assert_eq!(
        catalog.t("relative.yesterday", &Locale::new("fr", Some("FR"))),
        catalog.t("relative.yesterday", &Locale::en_us())
    );
    // key
    assert_eq!(catalog.t("no.such.key", &Locale::sw_ke()), "no.such.key");
}

#[test]
fn test_directory_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("sw-KE.json"),
        r#"{"relative": {"yesterday": "Jana tu"}, "greeting": ["Habari {name}", "Mambo {name}"]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let catalog = Catalog::builtin();
    assert_eq!(catalog.load_from_dir(dir.path()).unwrap(), 1);

    let sw = Locale::sw_ke();
    assert_eq!(catalog.t("relative.yesterday", &sw), "Jana tu");
    assert_eq!(catalog.list("greeting", &sw).len(), 2);
    // untouched keys survive the merge
    assert!(catalog.has("relative.tomorrow", &sw));
}

#[test]
fn test_bad_bundle_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en-US.json"), "[1, 2, 3]").unwrap();
    assert!(Catalog::new().load_from_dir(dir.path()).is_err());

    assert!(matches!(
        Catalog::new().load_from_dir(dir.path().join("missing")),
        Err(I18nError::IoError(_))
    ));
}

#[test]
fn test_plural_messages() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.t_plural("relative.minutes_ago", 1, &Locale::en_us()), "1 minute ago");
    assert_eq!(catalog.t_plural("relative.minutes_ago", 5, &Locale::ko_kr()), "5분 전");
}

#[test]
fn test_accept_language_negotiation() {
    assert_eq!(negotiate_supported("sw;q=0.9, ko-KR"), SupportedLocale::KoKr);
    assert_eq!(negotiate_supported("de-DE, fr"), SupportedLocale::EnUs);
    assert_eq!(negotiate_supported(""), SupportedLocale::EnUs);
}

proptest! {
    #[test]
    fn resolve_never_returns_empty(input in "\\PC{0,12}") {
        let tag = resolve_locale(Some(&input));
        prop_assert!(!tag.is_empty());
        let _ = Locale::resolve(Some(&input)).supported();
    }

    #[test]
    fn plural_category_is_total(n in proptest::num::f64::ANY) {
        for locale in [Locale::en_us(), Locale::ko_kr(), Locale::sw_ke()] {
            let _ = plural_category(n, &locale);
        }
    }
}
