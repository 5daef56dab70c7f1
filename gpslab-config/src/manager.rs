//! Layered key/value store

use crate::env::{EnvLoader, coerce_env_value};
use crate::loader::ConfigLoader;
use crate::validation::Validate;
use crate::{ConfigError, Result};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared, thread-safe configuration values.
///
/// Later loads override earlier ones key by key, so the usual order is
/// defaults, then files, then the environment.
#[derive(Clone)]
pub struct ConfigManager {
    values: Arc<RwLock<Map<String, Value>>>,
    env: EnvLoader,
}

impl ConfigManager {
    /// Manager reading `GPSLAB_*` variables.
    pub fn new() -> Self {
        Self::with_env(EnvLoader::default())
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_env(EnvLoader::new(Some(prefix.into())))
    }

    pub fn with_env(env: EnvLoader) -> Self {
        Self {
            values: Arc::new(RwLock::new(Map::new())),
            env,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load prefixed variables from the process environment.
    pub fn load_env(&self) -> usize {
        self.load_vars(std::env::vars())
    }

    /// Load prefixed variables from an explicit list.
    pub fn load_vars<I>(&self, vars: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let loaded = self.env.collect(vars);
        let count = loaded.len();
        let mut values = self.values.write();
        for (key, raw) in loaded {
            values.insert(key, coerce_env_value(&raw));
        }
        gpslab_log::debug!("loaded {} environment settings", count);
        count
    }

    /// Export a `.env` file into the process environment, then load it.
    ///
    /// Without a path a missing `.env` is not an error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<usize> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)
                    .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;
            }
            None => {
                if let Err(e) = dotenvy::dotenv() {
                    gpslab_log::debug!("no .env file loaded: {}", e);
                }
            }
        }
        Ok(self.load_env())
    }

    /// Merge a JSON, TOML or `.env` file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let table = ConfigLoader::for_path(path)?
            .with_env(self.env.clone())
            .load_file(path)?;
        let count = table.len();
        self.values.write().extend(table);
        gpslab_log::info!("loaded {} settings from {}", count, path.display());
        Ok(count)
    }

    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| ConfigError::TypeMismatch {
            key: key.to_string(),
            source,
        })?;
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .values
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;
        serde_json::from_value(value).map_err(|source| ConfigError::TypeMismatch {
            key: key.to_string(),
            source,
        })
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// String form of any scalar value.
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.values.read().get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(ConfigError::invalid(key, "not a scalar value")),
            None => Err(ConfigError::KeyNotFound(key.to_string())),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get(key)
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Copy every value from `other`, overriding ours.
    pub fn merge(&self, other: &ConfigManager) {
        if Arc::ptr_eq(&self.values, &other.values) {
            return;
        }
        let theirs = other.values.read().clone();
        self.values.write().extend(theirs);
    }

    pub fn snapshot(&self) -> Value {
        Value::Object(self.values.read().clone())
    }

    /// Deserialize everything into `T` and validate it.
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let config: T = serde_json::from_value(self.snapshot())
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("prefix", &self.env.prefix())
            .field("keys", &self.keys())
            .finish()
    }
}

enum Source {
    File(PathBuf),
    Dotenv(Option<PathBuf>),
    Env,
    Vars(Vec<(String, String)>),
}

/// Declares configuration sources in precedence order.
///
/// ```
/// use gpslab_config::ConfigManager;
///
/// let config = ConfigManager::builder()
///     .with_vars([("GPSLAB_DEFAULT_LOCALE", "ko")])
///     .build()
///     .unwrap();
/// assert_eq!(config.get_string("default_locale").unwrap(), "ko");
/// ```
pub struct ConfigBuilder {
    env: EnvLoader,
    defaults: Map<String, Value>,
    sources: Vec<Source>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            env: EnvLoader::default(),
            defaults: Map::new(),
            sources: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env = EnvLoader::new(Some(prefix.into()));
        self
    }

    /// Base values that every source may override.
    pub fn with_defaults<T: Serialize>(mut self, defaults: &T) -> Result<Self> {
        match serde_json::to_value(defaults) {
            Ok(Value::Object(map)) => {
                self.defaults = map;
                Ok(self)
            }
            Ok(_) => Err(ConfigError::ParseError("defaults must serialize to a table".into())),
            Err(e) => Err(ConfigError::ParseError(e.to_string())),
        }
    }

    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.sources.push(Source::Dotenv(path));
        self
    }

    pub fn load_env(mut self) -> Self {
        self.sources.push(Source::Env);
        self
    }

    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.sources.push(Source::Vars(vars));
        self
    }

    pub fn build(self) -> Result<ConfigManager> {
        let manager = ConfigManager::with_env(self.env);
        manager.values.write().extend(self.defaults);

        for source in self.sources {
            match source {
                Source::File(path) => {
                    manager.load_file(&path)?;
                }
                Source::Dotenv(path) => {
                    manager.load_dotenv(path.as_deref())?;
                }
                Source::Env => {
                    manager.load_env();
                }
                Source::Vars(vars) => {
                    manager.load_vars(vars);
                }
            }
        }

        Ok(manager)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_set_and_get() {
        let config = ConfigManager::new();
        config.set("compact_decimals", 2).unwrap();
        config.set("default_locale", "sw-KE").unwrap();

        assert_eq!(config.get_int("compact_decimals").unwrap(), 2);
        assert_eq!(config.get_string("default_locale").unwrap(), "sw-KE");
        assert_eq!(config.get_string("compact_decimals").unwrap(), "2");
        assert!(config.has("default_locale"));
        assert_eq!(config.keys(), vec!["compact_decimals", "default_locale"]);
    }

    #[test]
    fn test_missing_and_mismatched() {
        let config = ConfigManager::new();
        assert!(matches!(config.get_int("nope"), Err(ConfigError::KeyNotFound(_))));

        config.set("ellipsis", "...").unwrap();
        assert!(matches!(
            config.get_bool("ellipsis"),
            Err(ConfigError::TypeMismatch { .. })
        ));
        assert_eq!(config.get_or("nope", 7), 7);
    }

    #[test]
    fn test_vars_are_typed() {
        let config = ConfigManager::new();
        let count = config.load_vars(vec![
            ("GPSLAB_COVENANT_RATE".to_string(), "0.3".to_string()),
            ("GPSLAB_UTC_OFFSET_MINUTES".to_string(), "540".to_string()),
            ("OTHER_THING".to_string(), "1".to_string()),
        ]);
        assert_eq!(count, 2);
        assert_eq!(config.get_float("covenant_rate").unwrap(), 0.3);
        assert_eq!(config.get_int("utc_offset_minutes").unwrap(), 540);
    }

    #[test]
    fn test_merge_overrides() {
        let base = ConfigManager::new();
        base.set("a", 1).unwrap();
        base.set("b", 1).unwrap();
        let over = ConfigManager::new();
        over.set("b", 2).unwrap();

        base.merge(&over);
        assert_eq!(base.get_int("a").unwrap(), 1);
        assert_eq!(base.get_int("b").unwrap(), 2);

        let alias = base.clone();
        base.merge(&alias);
        assert_eq!(base.keys().len(), 2);
    }

    #[derive(Deserialize)]
    struct Window {
        minutes: i64,
    }

    impl Validate for Window {
        fn validate(&self) -> Result<()> {
            crate::ConfigValidator::in_range("minutes", self.minutes, 0, 60)
        }
    }

    #[test]
    fn test_load_validated() {
        let config = ConfigManager::new();
        config.set("minutes", 30).unwrap();
        assert_eq!(config.load_validated::<Window>().unwrap().minutes, 30);

        config.set("minutes", 90).unwrap();
        assert!(matches!(
            config.load_validated::<Window>(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_builder_order() {
        let config = ConfigManager::builder()
            .with_prefix("APP")
            .with_vars([("APP_LEVEL", "1")])
            .with_vars([("APP_LEVEL", "2"), ("GPSLAB_LEVEL", "3")])
            .build()
            .unwrap();
        assert_eq!(config.get_int("level").unwrap(), 2);
    }

    #[test]
    fn test_builder_defaults() {
        #[derive(Serialize)]
        struct Defaults {
            ellipsis: &'static str,
        }
        let config = ConfigManager::builder()
            .with_defaults(&Defaults { ellipsis: "..." })
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.get_string("ellipsis").unwrap(), "...");
        assert!(ConfigManager::builder().with_defaults(&3).is_err());
    }
}
