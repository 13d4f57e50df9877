use inkspire_core::secret::SecretService;
use inkspire_infrastructure::storage::SecretStorage;
use inkspire_infrastructure::{ConfigService, InkspirePaths, SecretServiceImpl};
use tempfile::TempDir;

#[tokio::test]
async fn test_init_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let paths = InkspirePaths::new(Some(temp_dir.path()));

    paths.ensure_config_file().expect("config.toml should be created");
    let (secret_path, _) = paths.ensure_secret_file().expect("secret.json should be created");

    // Fresh config directory loads as defaults
    let config = ConfigService::new(Some(temp_dir.path())).unwrap().get_config();
    assert_eq!(config.session.login_delay_ms, 1500);

    // Template key is blank until the user fills it in
    let service = SecretServiceImpl::with_storage(SecretStorage::with_path(secret_path.clone()));
    let secrets = service.load_secrets().await.unwrap();
    assert_eq!(secrets.gemini.unwrap().api_key, "");

    std::fs::write(&secret_path, r#"{"gemini": {"api_key": "AIza-test"}}"#).unwrap();
    let service = SecretServiceImpl::with_storage(SecretStorage::with_path(secret_path));
    let secrets = service.load_secrets().await.unwrap();
    assert_eq!(secrets.gemini.unwrap().api_key, "AIza-test");
}
