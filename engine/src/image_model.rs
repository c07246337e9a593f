use std::pin::Pin;

use crate::error::GenerationError;

pub mod imagen;
pub use imagen::Imagen;

#[cfg(any(test, feature = "testing"))]
pub mod fake;

/// Image data as handed back by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    Base64(String),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImage {
    pub payload: Option<ImagePayload>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub number_of_images: u32,
    pub include_reason: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            number_of_images: 1,
            include_reason: false,
        }
    }
}

pub type ImageFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<GeneratedImage>, GenerationError>> + Send + 'a>>;

/// A remote text-to-image service.
pub trait ImageModel {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        options: GenerateOptions,
    ) -> ImageFuture<'a>;

    fn provider(&self) -> &'static str;
}

pub type ImgModBox = Box<dyn ImageModel + Send + Sync>;
