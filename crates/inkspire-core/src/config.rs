//! Configuration models.
//!
//! `secret.json` holds the API credential, `config.toml` everything else.
//! Every field of `config.toml` has a default so a missing or partial file
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root structure of secret.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overrides the image model from config.toml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Root structure of config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Upstream model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            image_model: default_image_model(),
            text_model: default_text_model(),
            base_url: default_base_url(),
        }
    }
}

/// Mock sign-in behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
        }
    }
}

/// Where downloads, print documents and try-on previews are written.
///
/// `None` means the current directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            generation: GenerationSettings::default(),
            session: SessionSettings::default(),
            output: OutputSettings::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.generation.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.session.login_delay_ms, 1500);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            log_level = "debug"

            [generation]
            text_model = "gemini-2.5-pro"

            [session]
            login_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.generation.text_model, "gemini-2.5-pro");
        assert_eq!(config.generation.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.generation.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session.login_delay_ms, 0);
        assert_eq!(config.log_level, "debug");
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_secret_config_without_gemini() {
        let secrets: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(secrets.gemini.is_none());
    }
}
