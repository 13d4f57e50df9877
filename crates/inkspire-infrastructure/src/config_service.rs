//! Configuration service implementation.
//!
//! Loads the root configuration from config.toml (~/.config/inkspire/config.toml).

use crate::storage::ConfigStorage;
use inkspire_core::config::RootConfig;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// Unreadable or invalid files fall back to defaults with a warning, so a
/// broken config.toml never prevents the app from starting.
#[derive(Debug, Clone)]
pub struct ConfigService {
    storage: ConfigStorage,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Result<Self, crate::storage::ConfigStorageError> {
        Ok(Self::with_storage(ConfigStorage::new(base_path)?))
    }

    pub fn with_storage(storage: ConfigStorage) -> Self {
        Self {
            storage,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.storage.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %self.storage.path().display(),
                    error = %e,
                    "Failed to load config, using defaults"
                );
                RootConfig::default()
            }
        };

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    pub fn storage(&self) -> &ConfigStorage {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "not = [valid").unwrap();

        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        assert_eq!(service.get_config(), RootConfig::default());
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        assert_eq!(service.get_config().log_level, "debug");

        std::fs::write(&path, "log_level = \"warn\"\n").unwrap();
        assert_eq!(service.get_config().log_level, "debug");

        service.invalidate_cache();
        assert_eq!(service.get_config().log_level, "warn");
    }
}
