//! Feature vector assembly.
//!
//! Maps a page's coerced widget values into the numeric row a classifier was trained on. The
//! index order per disease is fixed here and is the contract with the model artifacts.

use crate::disease::Disease;
use crate::form::FormValues;
use serde::Serialize;

pub const DIABETES_FEATURES: [&str; 4] = ["Glucose", "BloodPressure", "BMI", "Age"];

pub const HEART_DISEASE_FEATURES: [&str; 7] =
    ["age", "sex", "cp", "trestbps", "chol", "thalach", "exang"];

pub const PARKINSONS_FEATURES: [&str; 6] = [
    "tremors",
    "bradykinesia",
    "muscle_stiffness",
    "balance_issues",
    "voice_changes",
    "facial_expression_changes",
];

pub const LUNG_CANCER_FEATURES: [&str; 8] = [
    "gender",
    "age",
    "smoking",
    "fatigue",
    "wheezing",
    "coughing",
    "short_breath",
    "chest_pain",
];

/// Field names in the order the disease's classifier expects them.
pub fn feature_order(disease: Disease) -> &'static [&'static str] {
    match disease {
        Disease::Diabetes => &DIABETES_FEATURES,
        Disease::HeartDisease => &HEART_DISEASE_FEATURES,
        Disease::Parkinsons => &PARKINSONS_FEATURES,
        Disease::LungCancer => &LUNG_CANCER_FEATURES,
    }
}

/// Ordered numeric input for one prediction. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Builds the feature vector for `disease` from the page's values.
///
/// A key absent from `values` contributes 0, the same as an untouched widget.
pub fn assemble(disease: Disease, values: &FormValues) -> FeatureVector {
    let row = feature_order(disease)
        .iter()
        .map(|key| values.get(key).unwrap_or(0.0))
        .collect();
    FeatureVector(row)
}
