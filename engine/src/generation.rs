use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use log::{debug, info};

use crate::{
    error::GenerationError,
    image_model::{GenerateOptions, ImagePayload, ImgModBox},
    retry::{RetryPolicy, retry},
};

/// One image per call from an `ImageModel`, with retries on transient failures.
pub struct GenerationClient {
    imgmod: ImgModBox,
    retry_policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(imgmod: ImgModBox) -> Self {
        Self {
            imgmod,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Returns the raw bytes of the first generated image.
    pub async fn generate(&self, prompt: &str, model: &str) -> Result<Vec<u8>, GenerationError> {
        let options = GenerateOptions::default();
        debug!("Sending prompt to {} ({model}): {prompt}", self.imgmod.provider());

        let images = retry(self.retry_policy, || {
            self.imgmod.generate(prompt, model, options)
        })
        .await?;

        let image = images
            .into_iter()
            .next()
            .ok_or(GenerationError::NoImageReturned)?;
        if let Some(mime) = &image.mime_type {
            debug!("Received {mime} image");
        }
        let payload = image.payload.ok_or(GenerationError::EmptyImagePayload)?;

        decode_payload(payload)
    }

    /// Generates an image and writes it to `path`, creating missing parent directories.
    pub async fn generate_to_file(
        &self,
        prompt: &str,
        model: &str,
        path: &Path,
    ) -> Result<(), GenerationError> {
        let bytes = self.generate(prompt, model).await?;
        save_image(&bytes, path).await?;
        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

pub fn decode_payload(payload: ImagePayload) -> Result<Vec<u8>, GenerationError> {
    let bytes = match payload {
        ImagePayload::Base64(encoded) => BASE64.decode(encoded.trim())?,
        ImagePayload::Raw(bytes) => bytes,
    };
    if bytes.is_empty() {
        return Err(GenerationError::EmptyImagePayload);
    }
    Ok(bytes)
}

/// Creates `dir` and its parents. An existing directory is fine.
pub async fn ensure_dir(dir: &Path) -> Result<(), GenerationError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| GenerationError::filesystem(dir, e))
}

pub async fn save_image(bytes: &[u8], path: &Path) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| GenerationError::filesystem(path, e))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use tempfile::tempdir;

    use super::*;
    use crate::image_model::{
        GeneratedImage,
        fake::{FakeImageModel, PNG_BASE64, png_image},
    };

    fn client(fake: FakeImageModel) -> GenerationClient {
        GenerationClient::new(Box::new(fake)).with_retry_policy(RetryPolicy::no_delay(3))
    }

    #[tokio::test]
    async fn decodes_base64_payload() {
        let bytes = client(FakeImageModel::png())
            .generate("prompt", "model")
            .await
            .unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
        assert_eq!(bytes, BASE64.decode(PNG_BASE64).unwrap());
    }

    #[tokio::test]
    async fn raw_payload_is_passed_through() {
        let fake = FakeImageModel::new(|_| {
            Ok(vec![GeneratedImage {
                payload: Some(ImagePayload::Raw(vec![1, 2, 3])),
                mime_type: None,
            }])
        });
        let bytes = client(fake).generate("prompt", "model").await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn zero_images_is_an_error() {
        let fake = FakeImageModel::new(|_| Ok(vec![]));
        let calls = fake.calls();
        let err = client(fake).generate("prompt", "model").await.unwrap_err();
        assert!(matches!(err, GenerationError::NoImageReturned));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn image_without_payload_is_an_error() {
        let fake = FakeImageModel::new(|_| Ok(vec![GeneratedImage::default()]));
        let err = client(fake).generate("prompt", "model").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyImagePayload));
    }

    #[tokio::test]
    async fn invalid_base64_is_an_error() {
        let fake = FakeImageModel::new(|_| {
            Ok(vec![GeneratedImage {
                payload: Some(ImagePayload::Base64("not base64!".into())),
                mime_type: None,
            }])
        });
        let err = client(fake).generate("prompt", "model").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let fake = FakeImageModel::new(|i| {
            if i < 2 {
                Err(GenerationError::Api {
                    status: 429,
                    message: "slow down".into(),
                })
            } else {
                Ok(vec![png_image()])
            }
        });
        let calls = fake.calls();
        client(fake).generate("prompt", "model").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn passes_prompt_and_model_to_backend() {
        let fake = FakeImageModel::png();
        let requests = fake.requests();
        client(fake).generate("a prompt", "some-model").await.unwrap();
        assert_eq!(
            *requests.lock().unwrap(),
            vec![("a prompt".to_string(), "some-model".to_string())]
        );
    }

    #[tokio::test]
    async fn writes_file_and_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.png");

        client(FakeImageModel::png())
            .generate_to_file("prompt", "model", &path)
            .await
            .unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, BASE64.decode(PNG_BASE64).unwrap());
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("output");
        ensure_dir(&target).await.unwrap();
        ensure_dir(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn ensure_dir_over_a_file_is_a_filesystem_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_dir(&file.join("sub")).await.unwrap_err();
        assert!(matches!(err, GenerationError::Filesystem { .. }));
    }
}
