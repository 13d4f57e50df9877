use anyhow::{Context, Result};
use colored::Colorize;
use inkspire_infrastructure::InkspirePaths;

/// Creates config.toml and a secret.json template if they are missing.
pub fn run(paths: &InkspirePaths) -> Result<()> {
    let (config_path, created) = paths
        .ensure_config_file()
        .context("Failed to create config.toml")?;
    report(&config_path, created);

    let (secret_path, created) = paths
        .ensure_secret_file()
        .context("Failed to create secret.json")?;
    report(&secret_path, created);

    if created {
        println!(
            "{}",
            "Add your Gemini API key to secret.json (or export GEMINI_API_KEY).".yellow()
        );
    }
    Ok(())
}

fn report(path: &std::path::Path, created: bool) {
    if created {
        println!("{} {}", "created".green(), path.display());
    } else {
        println!("{} {}", "exists ".bright_black(), path.display());
    }
}
