//! JSON wire types for the prediction API.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

/// Number of disease models a complete deployment serves.
pub const EXPECTED_MODELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    pub models_loaded: u32,
}

/// One loaded classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    /// Disease key, e.g. `heart_disease`.
    pub disease: String,
    pub name: String,
    /// Model family, e.g. `random_forest`.
    pub kind: String,
    /// Feature names in column order.
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListModelsRes {
    pub models: Vec<ModelInfo>,
}

/// Widget values keyed by field name.
///
/// Values may be strings (option labels or numbers), numbers or booleans. Missing fields take
/// the widget default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictReq {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl PredictReq {
    /// Flattens the JSON values into the strings a browser form would submit.
    ///
    /// `null` is treated as absent. Arrays and objects are rejected with the offending key.
    pub fn to_submission(&self) -> Result<HashMap<String, String>, String> {
        let mut submission = HashMap::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            let raw = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(format!("field {key} must be a string, number or boolean"))
                }
            };
            submission.insert(key.clone(), raw);
        }
        Ok(submission)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    pub disease: String,
    /// Predicted label, 0 or 1.
    pub label: u8,
    pub positive: bool,
    pub message: String,
    /// The feature vector passed to the model.
    pub features: Vec<f64>,
}
