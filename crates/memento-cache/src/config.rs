use std::path::{Path, PathBuf};
use std::{env, fs};

use memento_core::LifespanSettings;
use serde::Deserialize;

use crate::error::{CacheError, Result};

pub const CONFIG_FILE: &str = "memento.toml";
pub const CACHE_DB_FILE: &str = "cache.db";

/// Bump to invalidate every previously cached asset.
pub const DEFAULT_CACHE_NAME: &str = "memento-vivere-v4";

/// Static assets precached on install.
pub const DEFAULT_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./css/style.css",
    "./js/app.js",
    "./js/calculations.js",
    "./js/chart.js",
    "./js/constants.js",
    "./images/galaxy.jpg",
    "./images/ants.jpg",
    "./images/cell.gif",
    "./static/manifest.json",
    "./static/icon-192.png",
    "./static/icon-512.png",
];

/// Default base directory for all memento storage.
pub fn default_base_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".memento-vivere")
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub name: String,
    pub assets: Vec<String>,
    /// Directory path or http(s) URL.
    pub origin: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_CACHE_NAME.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
            origin: None,
        }
    }
}

/// `memento.toml`. Every field is optional.
///
/// ```toml
/// [lifespan]
/// average_years = 80
/// weeks_per_year = 52
///
/// [cache]
/// name = "memento-vivere-v4"
/// origin = "https://example.com/memento/"
/// assets = ["./", "./index.html"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lifespan: LifespanSettings,
    pub cache: CacheSettings,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| CacheError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!("loading config from {}", path.display());
                Self::parse(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CacheError::Config(format!("{}: {e}", path.display()))),
        }
    }

    pub fn load_from_dir(base: &Path) -> Result<Self> {
        Self::load(&base.join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.lifespan.average_years == 0 || self.lifespan.weeks_per_year == 0 {
            return Err(CacheError::Config(
                "lifespan years and weeks per year must be positive".to_string(),
            ));
        }
        if self.cache.name.trim().is_empty() {
            return Err(CacheError::Config("cache name must not be empty".to_string()));
        }
        Ok(())
    }
}
