use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while generating and storing an image
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("The image API returned no images")]
    NoImageReturned,

    #[error("The image API returned an image without payload")]
    EmptyImagePayload,

    #[error("Image payload is not valid base64: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Image API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl GenerationError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => matches!(status, 408 | 429 | 500..=599),
            Self::NoImageReturned
            | Self::EmptyImagePayload
            | Self::InvalidPayload(_)
            | Self::Filesystem { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let api = |status| GenerationError::Api {
            status,
            message: String::new(),
        };
        assert!(api(429).is_transient());
        assert!(api(503).is_transient());
        assert!(api(408).is_transient());
        assert!(!api(400).is_transient());
        assert!(!api(403).is_transient());
        assert!(!GenerationError::NoImageReturned.is_transient());
        assert!(!GenerationError::EmptyImagePayload.is_transient());
        assert!(
            !GenerationError::filesystem("x", std::io::ErrorKind::PermissionDenied.into())
                .is_transient()
        );
    }

    #[test]
    fn malformed_requests_are_not_retried() {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        assert!(err.is_builder());
        assert!(!GenerationError::Network(err).is_transient());
    }
}
