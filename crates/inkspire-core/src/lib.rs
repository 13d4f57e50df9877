pub mod classifier;
pub mod config;
pub mod error;
pub mod generation;
pub mod image;
pub mod presentation;
pub mod result;
pub mod secret;
pub mod session;
pub mod style;
pub mod tryon;

// Re-export common error type
pub use error::InkspireError;

pub use classifier::{BodyPart, Classification, classify};
pub use image::ImageData;
pub use result::{GeneratedResult, ResultHistory};
pub use style::TattooStyle;
