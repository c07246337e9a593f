use log::debug;

use crate::image_model::{GenerateOptions, ImageFuture, ImageModel};

pub mod imagen_api;

/// Google's Imagen models behind the Gemini API
#[derive(Clone)]
pub struct Imagen {
    api_key: String,
    client: reqwest::Client,
}

impl Imagen {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

impl ImageModel for Imagen {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        options: GenerateOptions,
    ) -> ImageFuture<'a> {
        Box::pin(async move {
            debug!("Requesting {} image(s) from {model}", options.number_of_images);
            imagen_api::predict(prompt, model, options, &self.api_key, &self.client).await
        })
    }

    fn provider(&self) -> &'static str {
        "Google Imagen"
    }
}
