use std::{
    fs,
    path::{Path, PathBuf},
};

use clay_engine::{Configuration, GenerationRequest, SculptorAgent};
use color_eyre::{
    Result,
    eyre::{WrapErr as _, ensure, eyre},
};
use log::warn;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{cli::Cli, session::MAX_VARIATIONS};

pub mod cli;
pub mod session;

pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "No API key found. Set {} to your Gemini API key, e.g. `export {}=...` \
         (keys are available at https://aistudio.google.com/apikey).",
        API_KEY_VARS.join(" or "),
        API_KEY_VARS[0]
    )]
    MissingCredential,
}

/// Returns the first non-empty credential among `API_KEY_VARS`.
pub fn resolve_api_key(
    lookup: impl Fn(&str) -> Option<String>,
) -> std::result::Result<String, StartupError> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| lookup(*var))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or(StartupError::MissingCredential)
}

pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let src = fs::read_to_string(path)?;
    Ok(ron::from_str(&src)?)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join("clay_sculptor.ron"))
}

/// Loads `explicit`, or the default config file if it exists, or the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Configuration> {
    let config = match explicit {
        Some(path) => load_ron_file(path)
            .wrap_err_with(|| format!("Couldn't load config {}", path.display()))?,
        None => match config_path() {
            Ok(path) if path.exists() => load_ron_file(&path)
                .wrap_err_with(|| format!("Couldn't load config {}", path.display()))?,
            _ => Configuration::default(),
        },
    };

    ensure!(
        (1..=MAX_VARIATIONS).contains(&config.variation_count),
        "variation_count must be between 1 and {MAX_VARIATIONS}, got {}",
        config.variation_count
    );
    Ok(config)
}

/// Single-command mode: one image, or variations if more than one is configured.
pub async fn run_single(agent: &SculptorAgent, cli: &Cli) -> Result<Vec<PathBuf>> {
    let description = cli.description.as_deref().unwrap_or_default().trim();
    ensure!(!description.is_empty(), "The description must not be empty");

    let count = agent.config().variation_count;
    let paths = if count > 1 {
        if cli.output.is_some() {
            warn!("--output is ignored when generating variations");
        }
        agent.generate_multiple_variations(description, count).await?
    } else {
        let request = GenerationRequest {
            output_path: cli.output.clone(),
            ..GenerationRequest::new(description)
        };
        vec![agent.generate_clay_image(&request).await?]
    };

    Ok(paths)
}
