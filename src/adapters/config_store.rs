//! Configuration store adapters.
//!
//! Both implement [`ConfigPort`]:
//!
//! - [`JsonFileConfig`] reads and writes a JSON file on disk.
//! - [`MemoryConfig`] keeps the serialized JSON in memory (tests, demos).
//!
//! Every config is range-checked with [`validate_config`] on load and
//! before it is persisted.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::{DashboardConfig, validate_config};

fn decode(json: &str) -> Result<DashboardConfig, ConfigError> {
    let cfg: DashboardConfig = serde_json::from_str(json).map_err(|e| {
        warn!("Config: parse error: {}", e);
        ConfigError::Corrupted
    })?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn encode(config: &DashboardConfig) -> Result<String, ConfigError> {
    validate_config(config)?;
    serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)
}

// ── JSON file ─────────────────────────────────────────────────

/// Config stored as a JSON document at a fixed path.
pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<DashboardConfig, ConfigError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::NotFound),
            Err(e) => {
                warn!("Config: cannot read {}: {}", self.path.display(), e);
                return Err(ConfigError::IoError);
            }
        };
        let cfg = decode(&json)?;
        info!("Config: loaded {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &DashboardConfig) -> Result<(), ConfigError> {
        let json = encode(config)?;
        std::fs::write(&self.path, json).map_err(|e| {
            warn!("Config: cannot write {}: {}", self.path.display(), e);
            ConfigError::IoError
        })?;
        info!("Config: saved {}", self.path.display());
        Ok(())
    }
}

// ── In-memory ─────────────────────────────────────────────────

/// Config held in memory as serialized JSON.
#[derive(Default)]
pub struct MemoryConfig {
    stored: RefCell<Option<String>>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON, bypassing validation.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            stored: RefCell::new(Some(json.into())),
        }
    }
}

impl ConfigPort for MemoryConfig {
    fn load(&self) -> Result<DashboardConfig, ConfigError> {
        match self.stored.borrow().as_deref() {
            Some(json) => decode(json),
            None => Err(ConfigError::NotFound),
        }
    }

    fn save(&self, config: &DashboardConfig) -> Result<(), ConfigError> {
        let json = encode(config)?;
        *self.stored.borrow_mut() = Some(json);
        Ok(())
    }
}
