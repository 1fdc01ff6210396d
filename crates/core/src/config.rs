//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into the registry and the web layer, so that
//! request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_BACKGROUND_URL, DEFAULT_MODEL_DIR};
use crate::disease::Disease;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_dir: PathBuf,
    background_url: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if `model_dir` is not an existing directory or the
    /// background URL is blank.
    pub fn new(model_dir: PathBuf, background_url: Option<String>) -> CoreResult<Self> {
        if !model_dir.is_dir() {
            return Err(CoreError::InvalidInput(format!(
                "model directory does not exist: {}",
                model_dir.display()
            )));
        }

        let background_url = match background_url {
            Some(url) if url.trim().is_empty() => {
                return Err(CoreError::InvalidInput(
                    "background_url cannot be empty".into(),
                ))
            }
            Some(url) => url.trim().to_string(),
            None => DEFAULT_BACKGROUND_URL.to_string(),
        };

        Ok(Self {
            model_dir,
            background_url,
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Full path of a disease's model artifact.
    pub fn artifact_path(&self, disease: Disease) -> PathBuf {
        self.model_dir.join(disease.artifact_filename())
    }

    pub fn background_url(&self) -> &str {
        &self.background_url
    }
}

/// Resolve the model directory from an optional environment value.
///
/// `None` or a blank value falls back to [`DEFAULT_MODEL_DIR`].
pub fn model_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR))
}
