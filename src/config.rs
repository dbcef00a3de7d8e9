// Tue Jan 13 2026 - Alex

use crate::error::{Error, Result};
use crate::pattern::Signature;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub color: bool,
    pub default_module: Option<String>,
    pub context_bytes: usize,
    pub signatures: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            color: true,
            default_module: None,
            context_bytes: 16,
            signatures: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_default_module(mut self, module: impl Into<String>) -> Self {
        self.default_module = Some(module.into());
        self
    }

    pub fn with_signature(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.signatures.insert(name.into(), pattern.into());
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }

    pub fn signature(&self, name: &str) -> Result<Signature> {
        let pattern = self
            .signatures
            .get(name)
            .ok_or_else(|| Error::Config(format!("No signature named '{}'", name)))?;
        Ok(Signature::parse(pattern)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::Config(format!("Unknown log level '{}'", self.log_level)));
        }
        for (name, pattern) in &self.signatures {
            Signature::parse(pattern)
                .map_err(|e| Error::Config(format!("Signature '{}': {}", name, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        assert!(Config::new().with_log_level("loud").validate().is_err());

        let config = Config::new().with_signature("broken", "DE AD G0");
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_named_signature_lookup() {
        let config = Config::new().with_signature("prologue", "55 48 89 E5");
        assert_eq!(config.signature("prologue").unwrap().len(), 4);
        assert_eq!(config.signature("missing").unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memprobe.json");
        let config = Config::new()
            .with_log_level("debug")
            .with_default_module("libexample.so")
            .with_signature("marker", "4D 50 ? 42");

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "signatures": { "nop": "90" } }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.context_bytes, 16);
        assert!(config.color);
        assert_eq!(config.signature("nop").unwrap().to_string(), "90");
    }
}
