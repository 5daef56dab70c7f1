//! Internationalization support for GPS Lab
//!
//! - **Locale Resolution**: map loose user input to `en-US`, `ko-KR` or
//!   `sw-KE`, passing unknown tags through
//! - **Accept-Language**: parse and negotiate request headers
//! - **Pluralization**: cardinal and ordinal categories per language
//! - **Message Catalog**: embedded per-locale templates with runtime
//!   overrides and fallback
//!
//! # Quick Start
//!
//! ```rust
//! use gpslab_i18n::{catalog, resolve_locale, Locale};
//!
//! let locale = Locale::resolve(Some("ko"));
//! assert_eq!(locale.tag(), "ko-KR");
//! assert_eq!(resolve_locale(Some("sw")), "sw-KE");
//!
//! let text = catalog().t_plural("relative.minutes_ago", 45, &Locale::en_us());
//! assert_eq!(text, "45 minutes ago");
//! ```

mod error;
mod locale;
mod messages;
mod plural;

pub use error::I18nError;
pub use locale::{
    DEFAULT_LOCALE, Locale, LocaleBuilder, SupportedLocale, negotiate_locale, negotiate_supported,
    parse_accept_language, resolve_locale,
};
pub use messages::{Catalog, MessageBundle, catalog, interpolate};
pub use plural::{PluralCategory, PluralRules, ordinal_category, plural_category, rules_for};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, I18nError, Locale, PluralCategory, Result, SupportedLocale, catalog,
        plural_category, resolve_locale,
    };
}
