//! Environment variable loading

use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Prefix used for every GPS Lab environment variable.
pub const ENV_PREFIX: &str = "GPSLAB";

/// Collects prefixed environment variables as lowercase setting keys.
///
/// With the `GPSLAB` prefix, `GPSLAB_DEFAULT_LOCALE=ko` becomes the
/// setting `default_locale`.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Load matching variables from the process environment.
    pub fn load(&self) -> HashMap<String, String> {
        self.collect(env::vars())
    }

    /// Filter and rename an arbitrary set of variables.
    ///
    /// Variables without the `<PREFIX>_` head are skipped; without a
    /// prefix every variable is kept.
    pub fn collect<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| self.setting_key(&key).map(|k| (k, value)))
            .collect()
    }

    /// Map a variable name to its setting key, if it carries the prefix.
    pub fn setting_key(&self, var: &str) -> Option<String> {
        let rest = match &self.prefix {
            Some(prefix) => var.strip_prefix(prefix.as_str())?.strip_prefix('_')?,
            None => var,
        };
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_lowercase())
    }

    /// Read one variable by its unprefixed name.
    pub fn load_var(&self, name: &str) -> Result<String> {
        Ok(env::var(self.var_name(name))?)
    }

    pub fn load_var_or(&self, name: &str, default: &str) -> String {
        self.load_var(name).unwrap_or_else(|_| default.to_string())
    }

    fn var_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, name.to_uppercase()),
            None => name.to_uppercase(),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(ENV_PREFIX.to_string()))
    }
}

/// Type an environment string by its shape: booleans, integers and
/// floats become JSON values of that kind, everything else stays text.
pub fn coerce_env_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = trimmed.parse::<f64>()
        && f.is_finite()
        && let Some(n) = serde_json::Number::from_f64(f)
    {
        return Value::Number(n);
    }
    Value::String(raw.to_string())
}
