//! Configuration file loading

use crate::env::EnvLoader;
use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    /// `KEY=value` lines, as in a `.env` file
    Env,
}

impl FileFormat {
    /// Detect the format from a path's extension or file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name == ".env" || name.starts_with(".env.") {
            return Some(FileFormat::Env);
        }
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Parses configuration text into a flat-or-nested JSON object.
///
/// `.env` keys go through the same prefix mapping as environment
/// variables, so `GPSLAB_DEFAULT_LOCALE` and `DEFAULT_LOCALE` both land
/// on `default_locale`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    format: FileFormat,
    env: EnvLoader,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self {
            format,
            env: EnvLoader::default(),
        }
    }

    pub fn with_env(mut self, env: EnvLoader) -> Self {
        self.env = env;
        self
    }

    /// Loader for whatever format `path` looks like.
    pub fn for_path(path: &Path) -> Result<Self> {
        FileFormat::from_path(path)
            .map(Self::new)
            .ok_or_else(|| ConfigError::LoadError(format!("unknown config format: {}", path.display())))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn load_file(&self, path: &Path) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Map<String, Value>> {
        match self.format {
            FileFormat::Json => parse_json(content),
            FileFormat::Toml => parse_toml(content),
            FileFormat::Env => Ok(parse_env(content, &self.env)),
        }
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::ParseError(format!(
            "expected a table at the top level, found {}",
            other
        ))),
    }
}

fn parse_json(content: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    into_object(value)
}

fn parse_toml(content: &str) -> Result<Map<String, Value>> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let value = serde_json::to_value(table).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    into_object(value)
}

fn parse_env(content: &str, env: &EnvLoader) -> Map<String, Value> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            let key = env.setting_key(key).unwrap_or_else(|| key.to_lowercase());
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key, crate::env::coerce_env_value(value))
        })
        .collect()
}
