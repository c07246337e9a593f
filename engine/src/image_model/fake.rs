use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    error::GenerationError,
    image_model::{GenerateOptions, GeneratedImage, ImageFuture, ImageModel, ImagePayload},
};

/// 1x1 PNG
pub const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

type Reply = dyn Fn(usize) -> Result<Vec<GeneratedImage>, GenerationError> + Send + Sync;
type Delay = dyn Fn(usize) -> Duration + Send + Sync;

/// Scripted stand-in for a remote backend. `reply` gets the zero based call index.
pub struct FakeImageModel {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
    reply: Box<Reply>,
    delay: Box<Delay>,
}

impl FakeImageModel {
    pub fn new(
        reply: impl Fn(usize) -> Result<Vec<GeneratedImage>, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Default::default(),
            requests: Default::default(),
            reply: Box::new(reply),
            delay: Box::new(|_| Duration::ZERO),
        }
    }

    /// Lets call `i` take `delay(i)` before it answers.
    pub fn with_delay(mut self, delay: impl Fn(usize) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn png() -> Self {
        Self::new(|_| Ok(vec![png_image()]))
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    /// (prompt, model) of every call so far
    pub fn requests(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.requests.clone()
    }
}

pub fn png_image() -> GeneratedImage {
    GeneratedImage {
        payload: Some(ImagePayload::Base64(PNG_BASE64.into())),
        mime_type: Some("image/png".into()),
    }
}

impl ImageModel for FakeImageModel {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
        _options: GenerateOptions,
    ) -> ImageFuture<'a> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((prompt.to_string(), model.to_string()));
        let reply = (self.reply)(idx);
        let delay = (self.delay)(idx);
        Box::pin(async move {
            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }
            reply
        })
    }

    fn provider(&self) -> &'static str {
        "fake"
    }
}
