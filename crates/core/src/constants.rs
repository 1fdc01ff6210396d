//! Constants used throughout the medpredict core crate.
//!
//! Default locations, artifact filenames and page styling values live here so that the
//! server, the CLI and the tests agree on them.

/// Default directory holding the serialised model artifacts.
pub const DEFAULT_MODEL_DIR: &str = "Models";

/// Default listen address for the web UI.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8501";

/// Background image used by the page theme unless overridden.
pub const DEFAULT_BACKGROUND_URL: &str =
    "https://d2jx2rerrg6sh3.cloudfront.net/images/news/ImageForNews_776422_17123165547518811.jpg";

/// Artifact filename for the diabetes classifier.
pub const DIABETES_MODEL_FILENAME: &str = "diabetes_model_selected.json";

/// Artifact filename for the heart disease classifier.
pub const HEART_DISEASE_MODEL_FILENAME: &str = "heart_disease_model.json";

/// Artifact filename for the Parkinson's classifier.
pub const PARKINSONS_MODEL_FILENAME: &str = "parkinson_rf_model.json";

/// Artifact filename for the lung cancer classifier.
pub const LUNG_CANCER_MODEL_FILENAME: &str = "lungs_disease_model.json";

/// Probability cut-off used by logistic models that do not declare their own.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Marker used in flattened tree arrays for "no child".
pub const TREE_LEAF: i64 = -1;
