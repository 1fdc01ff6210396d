//! Model registry.
//!
//! Holds one loaded classifier per [`Disease`]. The registry is built once at startup, either by
//! reading the artifacts from the configured model directory or from in-memory classifiers, and
//! is read-only afterwards. Callers share it behind an `Arc`.
//!
//! # Artifact format
//!
//! Each artifact is a JSON document:
//!
//! ```json
//! {
//!   "name": "diabetes",
//!   "features": ["Glucose", "BloodPressure", "BMI", "Age"],
//!   "classifier": { "kind": "logistic_regression", "coefficients": [0.03, 0.0, 0.08, 0.02], "intercept": -8.0 }
//! }
//! ```
//!
//! See [`ClassifierSpec`] for the supported `classifier` kinds.

use crate::classifier::{Classifier, ClassifierSpec, Label};
use crate::config::CoreConfig;
use crate::disease::Disease;
use crate::features::{feature_order, FeatureVector};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// A serialised, pre-trained classifier as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    pub name: String,
    /// Training-time feature names, in column order.
    pub features: Vec<String>,
    pub classifier: ClassifierSpec,
}

impl ModelArtifact {
    /// Parses an artifact document. `path` is only used for error reporting.
    pub fn parse(input: &str, path: &Path) -> CoreResult<Self> {
        serde_json::from_str(input).map_err(|source| CoreError::ArtifactParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Checks that the artifact can serve `disease`'s feature vectors.
    pub fn validate_for(&self, disease: Disease, path: &Path) -> CoreResult<()> {
        let invalid = |reason: String| CoreError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        };

        let expected = feature_order(disease);
        if self.features.len() != expected.len() {
            return Err(invalid(format!(
                "declares {} features, {disease} forms produce {}",
                self.features.len(),
                expected.len()
            )));
        }
        if self.classifier.n_features() != expected.len() {
            return Err(invalid(format!(
                "classifier takes {} features, {disease} forms produce {}",
                self.classifier.n_features(),
                expected.len()
            )));
        }
        self.classifier
            .validate()
            .map_err(|e| invalid(e.to_string()))?;

        let renamed = self
            .features
            .iter()
            .zip(expected)
            .any(|(have, want)| !have.eq_ignore_ascii_case(want));
        if renamed {
            tracing::warn!(
                "{}: feature names {:?} differ from form fields {:?}; using column order",
                path.display(),
                self.features,
                expected
            );
        }
        Ok(())
    }
}

/// A classifier ready to serve one disease.
#[derive(Clone, Debug)]
pub struct LoadedModel {
    name: String,
    features: Vec<String>,
    classifier: Arc<dyn Classifier>,
}

impl LoadedModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

/// Summary of a loaded model, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescription {
    pub disease: Disease,
    pub name: String,
    pub kind: &'static str,
    pub features: Vec<String>,
}

/// Read-only mapping from disease to classifier.
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<Disease, LoadedModel>,
}

impl ModelRegistry {
    /// Loads all four artifacts from the configured model directory.
    ///
    /// # Errors
    /// Fails on the first artifact that is missing, unparsable or does not fit its disease.
    pub fn load(cfg: &CoreConfig) -> CoreResult<Self> {
        let mut models = BTreeMap::new();
        for disease in Disease::ALL {
            let path = cfg.artifact_path(disease);
            let artifact = ModelArtifact::read(&path)?;
            artifact.validate_for(disease, &path)?;

            tracing::info!(
                "++ Loaded {} model '{}' ({}) from {}",
                disease,
                artifact.name,
                artifact.classifier.kind(),
                path.display()
            );

            models.insert(
                disease,
                LoadedModel {
                    name: artifact.name,
                    features: artifact.features,
                    classifier: Arc::new(artifact.classifier),
                },
            );
        }
        Ok(Self { models })
    }

    /// Builds a registry from in-memory classifiers, named after their disease.
    ///
    /// # Errors
    /// Returns [`CoreError::FeatureWidth`] if a classifier does not take its disease's vector.
    pub fn from_classifiers<I>(classifiers: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (Disease, Arc<dyn Classifier>)>,
    {
        let mut models = BTreeMap::new();
        for (disease, classifier) in classifiers {
            let expected = feature_order(disease);
            if classifier.n_features() != expected.len() {
                return Err(CoreError::FeatureWidth {
                    expected: expected.len(),
                    actual: classifier.n_features(),
                });
            }
            models.insert(
                disease,
                LoadedModel {
                    name: disease.key().to_string(),
                    features: expected.iter().map(|f| f.to_string()).collect(),
                    classifier,
                },
            );
        }
        Ok(Self { models })
    }

    pub fn get(&self, disease: Disease) -> CoreResult<&LoadedModel> {
        self.models
            .get(&disease)
            .ok_or(CoreError::ModelNotLoaded(disease))
    }

    /// Runs `disease`'s classifier over a batch of rows.
    pub fn predict(&self, disease: Disease, rows: &[FeatureVector]) -> CoreResult<Vec<Label>> {
        self.get(disease)?.classifier().predict(rows)
    }

    /// Predicts a single-row batch and returns its only label.
    pub fn predict_one(&self, disease: Disease, row: &FeatureVector) -> CoreResult<Label> {
        self.predict(disease, std::slice::from_ref(row))?
            .into_iter()
            .next()
            .ok_or(CoreError::EmptyPrediction)
    }

    pub fn describe(&self) -> Vec<ModelDescription> {
        self.models
            .iter()
            .map(|(disease, model)| ModelDescription {
                disease: *disease,
                name: model.name().to_string(),
                kind: model.classifier().kind(),
                features: model.features().to_vec(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
