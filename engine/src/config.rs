use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Process wide defaults. Values in a `GenerationRequest` take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub model: String,
    pub output_dir: PathBuf,
    pub variation_count: usize,
    pub shadows: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            variation_count: 1,
            shadows: false,
        }
    }
}
