use std::{env, path::PathBuf};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};

/// Environment variable naming an extra provider catalog file.
pub const PROVIDERS_PATH_ENV_VAR: &str = "FLEETDECK_PROVIDERS_PATH";

/// Locations of operator-authored provider catalogs merged over the
/// embedded manifest.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub catalogs: Option<Vec<PathBuf>>,
}

impl RegistryConfig {
    /// Loads the registry configuration.
    ///
    /// `FLEETDECK_PROVIDERS_PATH` takes precedence; otherwise the config
    /// file next to the default catalog location is consulted. A missing or
    /// malformed config file yields the default (embedded catalog only).
    pub fn load() -> Self {
        if let Ok(path) = env::var(PROVIDERS_PATH_ENV_VAR)
            && !path.trim().is_empty()
        {
            return RegistryConfig {
                catalogs: Some(vec![PathBuf::from(path)]),
            };
        }

        let path = default_config_path();
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(config) = serde_json::from_str(&content)
        {
            return config;
        }
        RegistryConfig::default()
    }

    /// Catalog paths to load, in declaration order.
    pub fn catalog_paths(&self) -> Vec<PathBuf> {
        self.catalogs.clone().unwrap_or_default()
    }
}

/// Get the default path for the registry configuration file.
pub fn default_config_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleetdeck")
        .join("registry.json")
}
