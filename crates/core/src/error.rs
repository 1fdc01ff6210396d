use crate::disease::Disease;
use std::path::PathBuf;

/// Errors raised while coercing a submitted form value into a scalar.
///
/// These mirror what the browser widget itself would refuse, so they are reported back to the
/// user on the form rather than treated as failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{label} must be a number")]
    NotANumber { label: &'static str },
    #[error("{label} must be a whole number")]
    NotAnInteger { label: &'static str },
    #[error("{label} must be between {min} and {max}")]
    OutOfRange {
        label: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{label}: unknown option {value:?}")]
    UnknownOption { label: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown disease: {0}")]
    UnknownDisease(String),
    #[error("failed to read model artifact {path}: {source}", path = path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {path}: {source}", path = path.display())]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact {path} is invalid: {reason}", path = path.display())]
    InvalidArtifact { path: PathBuf, reason: String },
    #[error("invalid classifier: {0}")]
    InvalidClassifier(String),
    #[error("no model loaded for {0}")]
    ModelNotLoaded(Disease),
    #[error("feature vector has {actual} values, model expects {expected}")]
    FeatureWidth { expected: usize, actual: usize },
    #[error("model returned no prediction")]
    EmptyPrediction,
    #[error(transparent)]
    Form(#[from] FormError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
