//! Wiring shared by every subcommand: config, credentials and services.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use inkspire_core::config::RootConfig;
use inkspire_core::session::{MockSessionGate, SessionGate};
use inkspire_infrastructure::{ConfigService, ExportService, InkspirePaths, SecretServiceImpl};
use inkspire_interaction::{GeminiApiClient, GenerationClient};

pub struct AppContext {
    pub paths: InkspirePaths,
    pub config: RootConfig,
    config_dir: Option<PathBuf>,
}

impl AppContext {
    /// Loads config.toml from `config_dir` (or ~/.config/inkspire).
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let config = ConfigService::new(config_dir)
            .context("Failed to resolve config directory")?
            .get_config();
        Ok(Self {
            paths: InkspirePaths::new(config_dir),
            config,
            config_dir: config_dir.map(Path::to_path_buf),
        })
    }

    /// Gemini-backed generation client using secret.json or the environment.
    pub async fn generation_client(&self) -> Result<GenerationClient> {
        let secrets = SecretServiceImpl::new(self.config_dir.as_deref())
            .context("Failed to resolve secret.json")?;
        let backend = GeminiApiClient::from_secret_service(&secrets, &self.config.generation)
            .await
            .context("Run `inkspire init` and add your Gemini API key")?;
        tracing::debug!(
            image_model = backend.image_model(),
            text_model = backend.text_model(),
            "Gemini backend ready"
        );
        Ok(GenerationClient::new(Arc::new(backend))?)
    }

    pub fn session_gate(&self) -> Arc<dyn SessionGate> {
        Arc::new(MockSessionGate::new(Duration::from_millis(
            self.config.session.login_delay_ms,
        )))
    }

    /// Exporter for `out`, falling back to the configured output directory.
    pub fn export_service(&self, out: Option<&Path>) -> ExportService {
        match out {
            Some(dir) => ExportService::new(dir),
            None => ExportService::from_setting(self.config.output.directory.as_deref()),
        }
    }
}
