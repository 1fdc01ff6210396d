//! # medpredict Core
//!
//! Core logic for the disease prediction forms.
//!
//! This crate contains the pure, synchronous parts of the system:
//! - Disease and page identity ([`Disease`], [`Page`])
//! - Per-disease form field tables and widget value coercion
//! - Feature vector assembly in each classifier's training order
//! - Loading the four classifier artifacts into a read-only [`ModelRegistry`]
//! - Mapping predicted labels to the displayed diagnosis messages
//!
//! **No API concerns**: HTML rendering, HTTP routing and the CLI belong in `api-rest`,
//! `api-shared` and `medpredict-cli`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod disease;
pub mod error;
pub mod features;
pub mod form;
pub mod prediction;
pub mod registry;

pub use classifier::{Classifier, ClassifierSpec, Label};
pub use config::CoreConfig;
pub use constants::{DEFAULT_ADDR, DEFAULT_MODEL_DIR};
pub use diagnosis::Diagnosis;
pub use disease::{Disease, Page};
pub use error::{CoreError, CoreResult, FormError};
pub use features::{assemble, feature_order, FeatureVector};
pub use form::{fields, FormField, FormValues, InputKind, SelectOption};
pub use prediction::{Prediction, PredictionService};
pub use registry::{ModelArtifact, ModelDescription, ModelRegistry};
