//! Secret service implementation.
//!
//! Loads the Gemini credential from secret.json. The `GEMINI_API_KEY` or
//! `API_KEY` environment variable, when set and non-blank, replaces the key
//! from the file.

use crate::storage::{SecretStorage, SecretStorageError};
use inkspire_core::config::{GeminiConfig, SecretConfig};
use inkspire_core::secret::SecretService;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Service for loading secret configuration.
///
/// Caches the loaded config so repeated lookups don't touch the disk.
///
/// # Example
///
/// ```ignore
/// use inkspire_infrastructure::SecretServiceImpl;
/// use inkspire_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(None)?;
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    storage: SecretStorage,
    env_api_key: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service for secret.json under `base_path` (or the default
    /// config directory), capturing the environment override now.
    pub fn new(base_path: Option<&Path>) -> Result<Self, SecretStorageError> {
        Ok(Self {
            storage: SecretStorage::new(base_path)?,
            env_api_key: api_key_from_env(),
            secrets: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_storage(storage: SecretStorage) -> Self {
        Self {
            storage,
            env_api_key: None,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces the captured environment override.
    pub fn with_env_api_key(mut self, api_key: Option<String>) -> Self {
        self.env_api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn storage(&self) -> &SecretStorage {
        &self.storage
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig, String> {
        {
            let read_lock = self
                .secrets
                .read()
                .map_err(|_| "Secret cache lock poisoned".to_string())?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = match self.storage.load() {
            Ok(config) => config,
            // The environment alone is enough
            Err(SecretStorageError::NotFound(_)) if self.env_api_key.is_some() => {
                SecretConfig::default()
            }
            Err(e) => return Err(e.to_string()),
        };
        let loaded = self.apply_env_override(loaded);

        {
            let mut write_lock = self
                .secrets
                .write()
                .map_err(|_| "Secret cache lock poisoned".to_string())?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    fn apply_env_override(&self, mut config: SecretConfig) -> SecretConfig {
        if let Some(api_key) = &self.env_api_key {
            tracing::debug!("Using API key from environment");
            match config.gemini.as_mut() {
                Some(gemini) => gemini.api_key = api_key.clone(),
                None => {
                    config.gemini = Some(GeminiConfig {
                        api_key: api_key.clone(),
                        model_name: None,
                    })
                }
            }
        }
        config
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.storage.exists()
    }
}
