//! Configuration for GPS Lab formatting
//!
//! Layers defaults, JSON/TOML/`.env` files and `GPSLAB_*` environment
//! variables into a [`ConfigManager`], then reads them out as validated
//! [`FormatSettings`] that produce formatter options.
//!
//! ```no_run
//! use gpslab_config::FormatSettings;
//! use std::path::Path;
//!
//! let settings = FormatSettings::load(Some(Path::new("gpslab.toml")))?;
//! settings.install_messages()?;
//! let text = gpslab_format::format_compact(15_000, &settings.compact_options());
//! # Ok::<(), gpslab_config::ConfigError>(())
//! ```

mod env;
mod error;
mod loader;
mod manager;
mod settings;
mod validation;

pub use env::{ENV_PREFIX, EnvLoader, coerce_env_value};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use manager::{ConfigBuilder, ConfigManager};
pub use settings::FormatSettings;
pub use validation::{ConfigValidator, Validate};
