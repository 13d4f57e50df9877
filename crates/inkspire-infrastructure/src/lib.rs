pub mod config_service;
pub mod export_service;
pub mod image_loader;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::export_service::ExportService;
pub use crate::image_loader::load_image;
pub use crate::paths::InkspirePaths;
pub use crate::secret_service::SecretServiceImpl;
