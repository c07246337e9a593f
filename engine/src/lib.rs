pub mod config;
pub mod error;
pub mod filename;
pub mod generation;
pub mod image_model;
pub mod prompt;
pub mod retry;
pub mod sculptor;

pub use config::Configuration;
pub use error::GenerationError;
pub use generation::GenerationClient;
pub use image_model::{ImageModel, ImgModBox};
pub use sculptor::{GenerationRequest, SculptorAgent};
