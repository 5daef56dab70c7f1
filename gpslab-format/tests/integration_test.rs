//! Integration tests for gpslab-format

use chrono::{Duration, TimeZone, Utc};
use gpslab_format::*;
use gpslab_i18n::Locale;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_nan_formats_as_zero() {
    assert_eq!(format_number(f64::NAN, &NumberOptions::default()), "0");
    assert_eq!(format_currency(f64::NAN, "USD", &CurrencyOptions::default()), "$0.00");
    assert_eq!(format_compact(f64::NAN, &CompactOptions::default()), "0");
    assert_eq!(format_percentage(f64::NAN, &PercentOptions::default()), "0%");
}

#[test]
fn test_percentages_and_progress() {
    assert_eq!(format_percentage(1.0, &PercentOptions::default()), "100%");
    assert_eq!(format_progress(1.5, &Locale::en_us()), "100%");
    assert_eq!(format_progress(-3.0, &Locale::en_us()), "0%");
}

#[test]
fn test_relative_minutes() {
    let now = fixed_now();
    let text = format_relative_time_at(now - Duration::minutes(45), now, &RelativeOptions::default());
    assert_eq!(text, "45 minutes ago");
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(get_baraka_tier(999).id, "starter");
    assert_eq!(get_baraka_tier(1000).id, "beginner");
}

#[test]
fn test_teen_ordinals() {
    let en = Locale::en_us();
    assert_eq!(format_ordinal(11, &en), "11th");
    assert_eq!(format_ordinal(12, &en), "12th");
    assert_eq!(format_ordinal(13, &en), "13th");
}

#[test]
fn test_covenant_split() {
    let split = format_covenant_return(100, Some(0.5));
    assert_eq!(split.return_amount, 50.0);
    assert_eq!(split.net_payment, 50.0);
    assert!((split.allocated_total() - 50.0).abs() < 0.01);
}

#[test]
fn test_baraka_round_trip() {
    for n in [0, 1, 42, 1234, 1_000_000] {
        let text = format_baraka(n, &PointOptions::default());
        assert_eq!(parse_currency_string(&text), n as f64);
    }
}

#[test]
fn test_locale_drives_every_formatter() {
    let ko = Locale::ko_kr();
    let date = DateOptions::new().locale(ko.clone()).style(DateStyle::Full);
    assert_eq!(format_date("2024-01-15T09:00:00Z", &date), "2024년 1월 15일 월요일");

    let dur = DurationOptions::new().locale(ko.clone());
    assert_eq!(format_duration(90 * 60 * 1000, &dur), "1시간 30분");

    let now = fixed_now();
    let rel = RelativeOptions::new().locale(ko.clone());
    assert_eq!(format_relative_time_at(now - Duration::days(1), now, &rel), "어제");

    let deadline = format_deadline(now + Duration::hours(1), now, &ko);
    assert_eq!(deadline.urgency, Urgency::Critical);
    assert_eq!(deadline.label, "매우 긴급");
}

#[test]
fn test_unsupported_locale_falls_back_to_english() {
    let fr = Locale::resolve(Some("fr-FR"));
    assert_eq!(fr.tag(), "fr-FR");
    let now = fixed_now();
    let rel = RelativeOptions::new().locale(fr.clone());
    assert_eq!(format_relative_time_at(now - Duration::hours(2), now, &rel), "2 hours ago");
    assert_eq!(format_ordinal(2, &fr), "2nd");
}

#[test]
fn test_swahili_formatting() {
    let sw = Locale::sw_ke();
    assert_eq!(
        format_date("2024-01-15", &DateOptions::new().locale(sw.clone()).style(DateStyle::Full)),
        "Jumatatu, 15 Januari 2024"
    );
    assert_eq!(format_currency(1234.56, "KES", &CurrencyOptions::new().locale(sw.clone())), "KSh 1,234.56");
    assert_eq!(format_ordinal(5, &sw), "wa 5");
}

#[test]
fn test_seeded_messages() {
    let opts = MessageOptions::new().style(MessageStyle::Gentle);
    let mut a = StdRng::seed_from_u64(2024);
    let mut b = StdRng::seed_from_u64(2024);
    let first = generate_message_with(&mut a, "badge_earned", "Neema", &opts);
    let second = generate_message_with(&mut b, "badge_earned", "Neema", &opts);
    assert_eq!(first, second);
    assert!(first.contains("Neema"));
    assert!(!first.contains('!'));
}

#[test]
fn test_text_pipeline() {
    let title = to_title_case("intro to the gps lab api");
    assert_eq!(title, "Intro To The GPS Lab API");
    assert_eq!(slugify(&title, &SlugOptions::default()), "intro-to-the-gps-lab-api");
    assert_eq!(truncate(&title, &TruncateOptions::new(15)), "Intro To The...");
}

#[test]
fn test_results_serialize() {
    let change = format_baraka_change(25, &Locale::en_us());
    let json = serde_json::to_value(&change).unwrap();
    assert_eq!(json["text"], "+25 β");
    assert_eq!(json["tone"], "positive");

    let progress = BARAKA_TIERS.progress(1500);
    let json = serde_json::to_value(&progress).unwrap();
    assert_eq!(json["current"]["id"], "beginner");
}
