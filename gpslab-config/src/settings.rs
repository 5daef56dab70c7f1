//! Typed formatting defaults

use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigManager, Result};
use gpslab_format::{
    CompactOptions, CovenantReturn, CurrencyOptions, DEFAULT_COVENANT_RATE, DateOptions,
    DateStyle, DurationOptions, DurationStyle, NumberOptions, RelativeOptions, TruncateOptions,
    format_covenant_return,
};
use gpslab_i18n::{Locale, catalog};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Largest UTC offset in use anywhere, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Application-wide defaults for the formatters.
///
/// Every field has a default, so a config file only needs to name what
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Any tag `resolve_locale` understands, e.g. `ko` or `sw-KE`
    #[serde(deserialize_with = "scalar_text")]
    pub default_locale: String,
    pub compact_threshold: f64,
    pub compact_decimals: usize,
    pub max_fraction_digits: usize,
    pub duration_max_units: usize,
    pub duration_style: DurationStyle,
    pub date_style: DateStyle,
    pub covenant_rate: f64,
    #[serde(deserialize_with = "scalar_text")]
    pub ellipsis: String,
    pub utc_offset_minutes: i32,
    /// Directory of `<tag>.json` bundles merged over the built-in messages
    #[serde(deserialize_with = "scalar_path")]
    pub messages_dir: Option<PathBuf>,
}

/// Text fields take numbers and booleans as written, since environment
/// values like `GPSLAB_ELLIPSIS=1` arrive already typed.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        v @ (Value::Number(_) | Value::Bool(_)) => Ok(v.to_string()),
        other => Err(D::Error::custom(format!("expected text, found {}", other))),
    }
}

fn scalar_path<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<PathBuf>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(PathBuf::from(s))),
        v @ (Value::Number(_) | Value::Bool(_)) => Ok(Some(PathBuf::from(v.to_string()))),
        other => Err(D::Error::custom(format!("expected a path, found {}", other))),
    }
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            default_locale: gpslab_i18n::DEFAULT_LOCALE.to_string(),
            compact_threshold: 1000.0,
            compact_decimals: 1,
            max_fraction_digits: 2,
            duration_max_units: 2,
            duration_style: DurationStyle::Long,
            date_style: DateStyle::Medium,
            covenant_rate: DEFAULT_COVENANT_RATE,
            ellipsis: "...".to_string(),
            utc_offset_minutes: 0,
            messages_dir: None,
        }
    }
}

impl Validate for FormatSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty("default_locale", &self.default_locale)?;
        ConfigValidator::is_locale("default_locale", &self.default_locale)?;
        ConfigValidator::finite("compact_threshold", self.compact_threshold)?;
        ConfigValidator::in_range("compact_threshold", self.compact_threshold, 0.0, f64::MAX)?;
        ConfigValidator::in_range("compact_decimals", self.compact_decimals, 0, 4)?;
        ConfigValidator::in_range("max_fraction_digits", self.max_fraction_digits, 0, 6)?;
        ConfigValidator::in_range("duration_max_units", self.duration_max_units, 1, 5)?;
        ConfigValidator::finite("covenant_rate", self.covenant_rate)?;
        ConfigValidator::in_range("covenant_rate", self.covenant_rate, 0.0, 1.0)?;
        ConfigValidator::in_range(
            "utc_offset_minutes",
            self.utc_offset_minutes,
            -MAX_UTC_OFFSET_MINUTES,
            MAX_UTC_OFFSET_MINUTES,
        )?;
        if let Some(dir) = &self.messages_dir
            && !dir.is_dir()
        {
            return Err(crate::ConfigError::invalid(
                "messages_dir",
                format!("{} is not a directory", dir.display()),
            ));
        }
        Ok(())
    }
}

impl FormatSettings {
    /// Defaults, then `path` if given, then `GPSLAB_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigManager::builder().with_defaults(&Self::default())?;
        if let Some(path) = path {
            builder = builder.add_file(path);
        }
        Self::from_manager(&builder.load_env().build()?)
    }

    pub fn from_manager(manager: &ConfigManager) -> Result<Self> {
        manager.load_validated()
    }

    pub fn locale(&self) -> Locale {
        Locale::resolve(Some(&self.default_locale))
    }

    pub fn number_options(&self) -> NumberOptions {
        NumberOptions::new()
            .locale(self.locale())
            .max_fraction_digits(self.max_fraction_digits)
    }

    pub fn compact_options(&self) -> CompactOptions {
        CompactOptions::new()
            .locale(self.locale())
            .threshold(self.compact_threshold)
            .decimals(self.compact_decimals)
    }

    pub fn currency_options(&self) -> CurrencyOptions {
        CurrencyOptions::new().locale(self.locale())
    }

    pub fn duration_options(&self) -> DurationOptions {
        DurationOptions::new()
            .locale(self.locale())
            .max_units(self.duration_max_units)
            .style(self.duration_style)
    }

    pub fn date_options(&self) -> DateOptions {
        DateOptions::new()
            .locale(self.locale())
            .style(self.date_style)
            .utc_offset_minutes(self.utc_offset_minutes)
    }

    pub fn relative_options(&self) -> RelativeOptions {
        RelativeOptions::new()
            .locale(self.locale())
            .utc_offset_minutes(self.utc_offset_minutes)
    }

    pub fn truncate_options(&self, max_length: usize) -> TruncateOptions {
        TruncateOptions::new(max_length).ellipsis(self.ellipsis.clone())
    }

    /// Covenant split at the configured rate.
    pub fn covenant_return(&self, total: f64) -> CovenantReturn {
        format_covenant_return(total, Some(self.covenant_rate))
    }

    /// Merge `messages_dir` into the global catalog, returning the number
    /// of bundles loaded.
    pub fn install_messages(&self) -> Result<usize> {
        let Some(dir) = &self.messages_dir else {
            return Ok(0);
        };
        let loaded = catalog().load_from_dir(dir)?;
        gpslab_log::info!("installed {} message bundles from {}", loaded, dir.display());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    #[test]
    fn test_defaults_are_valid() {
        let settings = FormatSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.locale(), Locale::en_us());
        assert_eq!(settings.install_messages().unwrap(), 0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let cases = [
            FormatSettings {
                covenant_rate: 1.5,
                ..Default::default()
            },
            FormatSettings {
                covenant_rate: f64::NAN,
                ..Default::default()
            },
            FormatSettings {
                duration_max_units: 0,
                ..Default::default()
            },
            FormatSettings {
                compact_decimals: 9,
                ..Default::default()
            },
            FormatSettings {
                utc_offset_minutes: 15 * 60,
                ..Default::default()
            },
            FormatSettings {
                default_locale: "!!".to_string(),
                ..Default::default()
            },
            FormatSettings {
                default_locale: "   ".to_string(),
                ..Default::default()
            },
            FormatSettings {
                messages_dir: Some(PathBuf::from("/definitely/not/here")),
                ..Default::default()
            },
        ];
        for settings in cases {
            assert!(
                matches!(settings.validate(), Err(ConfigError::ValidationError { .. })),
                "{:?}",
                settings
            );
        }
    }

    #[test]
    fn test_options_follow_settings() {
        let settings = FormatSettings {
            default_locale: "ko".to_string(),
            compact_threshold: 10_000.0,
            duration_max_units: 3,
            duration_style: DurationStyle::Short,
            utc_offset_minutes: 540,
            ..Default::default()
        };

        let compact = settings.compact_options();
        assert_eq!(compact.locale, Locale::ko_kr());
        assert_eq!(compact.threshold, 10_000.0);

        let duration = settings.duration_options();
        assert_eq!(duration.max_units, 3);
        assert_eq!(duration.style, DurationStyle::Short);

        assert_eq!(settings.date_options().utc_offset_minutes, 540);
        assert_eq!(settings.relative_options().utc_offset_minutes, 540);
        assert_eq!(settings.truncate_options(20).ellipsis, "...");
    }

    #[test]
    fn test_covenant_uses_configured_rate() {
        let settings = FormatSettings {
            covenant_rate: 0.2,
            ..Default::default()
        };
        let split = settings.covenant_return(1000.0);
        assert_eq!(split.return_amount, 200.0);
        assert_eq!(split.net_payment, 800.0);
    }

    #[test]
    fn test_from_manager_layers() {
        let manager = ConfigManager::builder()
            .with_defaults(&FormatSettings::default())
            .unwrap()
            .with_vars([
                ("GPSLAB_DEFAULT_LOCALE", "sw"),
                ("GPSLAB_DURATION_STYLE", "short"),
                ("GPSLAB_COVENANT_RATE", "1"),
            ])
            .build()
            .unwrap();
        let settings = FormatSettings::from_manager(&manager).unwrap();
        assert_eq!(settings.locale(), Locale::sw_ke());
        assert_eq!(settings.duration_style, DurationStyle::Short);
        assert_eq!(settings.covenant_rate, 1.0);
        assert_eq!(settings.ellipsis, "...");
    }

    #[test]
    fn test_blank_locale_reports_empty() {
        let settings = FormatSettings {
            default_locale: String::new(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid setting default_locale: must not be empty");
    }

    #[test]
    fn test_numeric_env_values_for_text_fields() {
        let dir = tempfile::tempdir().unwrap();
        let messages = dir.path().join("2024");
        std::fs::create_dir(&messages).unwrap();

        let manager = ConfigManager::builder()
            .with_defaults(&FormatSettings::default())
            .unwrap()
            .with_vars([
                ("GPSLAB_ELLIPSIS", "1".to_string()),
                ("GPSLAB_MESSAGES_DIR", messages.display().to_string()),
            ])
            .build()
            .unwrap();
        let settings = FormatSettings::from_manager(&manager).unwrap();
        assert_eq!(settings.ellipsis, "1");
        assert_eq!(settings.messages_dir.as_deref(), Some(messages.as_path()));

        let json = serde_json::json!({ "ellipsis": true, "messages_dir": 2024 });
        let settings: FormatSettings = serde_json::from_value(json).unwrap();
        assert_eq!(settings.ellipsis, "true");
        assert_eq!(settings.messages_dir, Some(PathBuf::from("2024")));

        let bad: std::result::Result<FormatSettings, _> =
            serde_json::from_value(serde_json::json!({ "ellipsis": ["."] }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_load_prefixed_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "GPSLAB_DEFAULT_LOCALE=ko\nGPSLAB_DURATION_MAX_UNITS=3\n").unwrap();

        let settings = FormatSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.default_locale, "ko");
        assert_eq!(settings.locale(), Locale::ko_kr());
        assert_eq!(settings.duration_max_units, 3);
    }
}
