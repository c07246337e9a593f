use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::GenerationError,
    image_model::{GenerateOptions, GeneratedImage, ImagePayload},
};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub instances: Vec<Instance<'a>>,
    pub parameters: Parameters,
}

#[derive(Debug, Serialize)]
pub struct Instance<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub sample_count: u32,
    pub include_rai_reason: bool,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
    pub rai_filtered_reason: Option<String>,
}

impl<'a> PredictRequest<'a> {
    pub fn new(prompt: &'a str, options: GenerateOptions) -> Self {
        Self {
            instances: vec![Instance { prompt }],
            parameters: Parameters {
                sample_count: options.number_of_images,
                include_rai_reason: options.include_reason,
            },
        }
    }
}

impl From<Prediction> for GeneratedImage {
    fn from(p: Prediction) -> Self {
        GeneratedImage {
            payload: p
                .bytes_base64_encoded
                .filter(|b| !b.is_empty())
                .map(ImagePayload::Base64),
            mime_type: p.mime_type,
        }
    }
}

pub fn predict_url(model: &str) -> String {
    format!("{BASE_URL}/{model}:predict")
}

/// Runs one `:predict` call and returns whatever images came back
pub async fn predict(
    prompt: &str,
    model: &str,
    options: GenerateOptions,
    api_key: &str,
    client: &reqwest::Client,
) -> Result<Vec<GeneratedImage>, GenerationError> {
    let resp = client
        .post(predict_url(model))
        .header("x-goog-api-key", api_key)
        .json(&PredictRequest::new(prompt, options))
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(GenerationError::Api {
            status: status.as_u16(),
            message: text,
        });
    }

    let response = serde_json::from_str::<PredictResponse>(&text).map_err(|e| {
        GenerationError::Api {
            status: status.as_u16(),
            message: format!("Unexpected response body ({e}): {text}"),
        }
    })?;

    for p in &response.predictions {
        if let Some(reason) = &p.rai_filtered_reason {
            debug!("Prediction filtered: {reason}");
        }
    }

    Ok(response
        .predictions
        .into_iter()
        .map(GeneratedImage::from)
        .collect())
}
