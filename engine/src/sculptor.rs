use std::path::PathBuf;

use futures_util::future::join_all;
use log::info;
use time::OffsetDateTime;

use crate::{
    config::Configuration,
    error::GenerationError,
    filename::generate_filename,
    generation::{GenerationClient, ensure_dir},
    prompt::build_prompt,
};

/// Everything needed for one image. `None` fields fall back to the agent's `Configuration`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub description: String,
    pub model: Option<String>,
    pub output_dir: Option<PathBuf>,
    /// wins over `output_dir`
    pub output_path: Option<PathBuf>,
    pub shadows: Option<bool>,
    /// zero based
    pub variation: Option<usize>,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

pub struct SculptorAgent {
    client: GenerationClient,
    config: Configuration,
}

impl SculptorAgent {
    pub fn new(client: GenerationClient, config: Configuration) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Generates one clay image and returns the path it was written to.
    pub async fn generate_clay_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<PathBuf, GenerationError> {
        let output_dir = request
            .output_dir
            .as_ref()
            .unwrap_or(&self.config.output_dir);
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let shadows = request.shadows.unwrap_or(self.config.shadows);
        let description = request.description.trim();

        ensure_dir(output_dir).await?;

        let prompt = build_prompt(description, shadows);
        let path = match &request.output_path {
            Some(path) => path.clone(),
            None => output_dir.join(generate_filename(
                description,
                request.variation,
                OffsetDateTime::now_utc(),
            )),
        };

        info!("Sculpting \"{description}\" with {model}");
        self.client.generate_to_file(&prompt, model, &path).await?;
        Ok(path)
    }

    /// Generates `count` variations concurrently. Every variation runs to completion, then the
    /// batch fails with the first error if any variation failed.
    pub async fn generate_multiple_variations(
        &self,
        description: &str,
        count: usize,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        let requests = (0..count)
            .map(|i| GenerationRequest {
                variation: Some(i),
                ..GenerationRequest::new(description)
            })
            .collect::<Vec<_>>();

        info!("Generating {count} variations of \"{}\"", description.trim());
        join_all(requests.iter().map(|r| self.generate_clay_image(r)))
            .await
            .into_iter()
            .collect()
    }
}
