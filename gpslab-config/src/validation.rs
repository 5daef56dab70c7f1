//! Setting validation

use crate::{ConfigError, Result};
use std::fmt::Display;

/// Types that can check their own invariants after loading.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable checks for individual settings.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(key, "must not be empty"));
        }
        Ok(())
    }

    pub fn in_range<T: PartialOrd + Display>(key: &str, value: T, min: T, max: T) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::invalid(
                key,
                format!("{} is outside {}..={}", value, min, max),
            ));
        }
        Ok(())
    }

    pub fn finite(key: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ConfigError::invalid(key, "must be a finite number"));
        }
        Ok(())
    }

    /// Accepts anything `Locale::parse` accepts.
    pub fn is_locale(key: &str, value: &str) -> Result<()> {
        gpslab_i18n::Locale::parse(value)
            .map(|_| ())
            .map_err(|e| ConfigError::invalid(key, e.to_string()))
    }
}
