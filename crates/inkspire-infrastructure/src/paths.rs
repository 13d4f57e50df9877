//! Unified path management for InkSpire configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/inkspire/          # Config directory
//! ├── config.toml              # Models, login delay, output directory, log level
//! └── secret.json              # Gemini API key
//! ```
//!
//! Generated artwork is never stored here; downloads go to the output
//! directory chosen in config.toml or on the command line.

use inkspire_core::config::{GeminiConfig, RootConfig, SecretConfig};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "inkspire";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves InkSpire's configuration paths.
///
/// With a base path every file lives directly under it (used by tests and by
/// `--config-dir`); otherwise under `~/.config/inkspire/`.
#[derive(Debug, Clone, Default)]
pub struct InkspirePaths {
    base: Option<PathBuf>,
}

impl InkspirePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/inkspire/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join(APP_DIR))
    }

    /// Returns the path to config.toml.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// # Security Note
    ///
    /// This function sets file permissions to 600 (user read/write only) on Unix systems.
    ///
    /// # Returns
    ///
    /// - `Ok((PathBuf, bool))`: Path to the secret file and whether it was created now
    /// - `Err(std::io::Error)`: If file creation or permission setting fails
    pub fn ensure_secret_file(&self) -> Result<(PathBuf, bool), std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok((secret_path, false));
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(std::io::Error::other)?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok((secret_path, true))
    }

    /// Ensures config.toml exists, writing the defaults if it doesn't.
    pub fn ensure_config_file(&self) -> Result<(PathBuf, bool), std::io::Error> {
        let config_path = self
            .config_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if config_path.exists() {
            return Ok((config_path, false));
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = toml::to_string_pretty(&RootConfig::default())
            .map_err(std::io::Error::other)?;
        std::fs::write(&config_path, template)?;

        Ok((config_path, true))
    }
}
