// GPS Lab - locale-aware formatting for the GPS Lab learning platform
//
// Numbers, dates, durations, Baraka/PSB point currencies, tiers and text in
// English, Korean and Swahili, plus the static curriculum tables they serve.

// Re-export the formatters
pub use gpslab_format::*;

// Re-export locale handling
pub use gpslab_i18n::{
    Catalog, DEFAULT_LOCALE, I18nError, Locale, SupportedLocale, catalog, interpolate,
    negotiate_locale, parse_accept_language, resolve_locale,
};

pub use gpslab_format as format;
pub use gpslab_i18n as i18n;
pub use gpslab_log as log;

#[cfg(feature = "config")]
pub use gpslab_config as config;

#[cfg(feature = "curriculum")]
pub use gpslab_curriculum as curriculum;

// Prelude for common imports
pub mod prelude {
    pub use gpslab_format::prelude::*;
    pub use gpslab_i18n::{Locale, SupportedLocale, resolve_locale};

    #[cfg(feature = "config")]
    pub use gpslab_config::FormatSettings;

    #[cfg(feature = "curriculum")]
    pub use gpslab_curriculum::{MissionStatus, Phase, stage};
}
