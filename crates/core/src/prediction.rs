//! The per-request prediction flow.
//!
//! Coerce the submitted widget values, assemble the feature vector, run the disease's
//! classifier on a single-row batch, and pick the message for the returned label. Nothing is
//! cached: every call re-runs the model.

use crate::diagnosis::Diagnosis;
use crate::disease::Disease;
use crate::features::{assemble, FeatureVector};
use crate::form::FormValues;
use crate::registry::ModelRegistry;
use crate::CoreResult;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything produced by one prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub values: FormValues,
    pub features: FeatureVector,
    pub diagnosis: Diagnosis,
}

/// Prediction operations over a shared, read-only registry.
#[derive(Clone, Debug)]
pub struct PredictionService {
    registry: Arc<ModelRegistry>,
}

impl PredictionService {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Predicts from already coerced values.
    pub fn predict_values(&self, values: FormValues) -> CoreResult<Prediction> {
        let disease = values.disease();
        let features = assemble(disease, &values);
        let label = self.registry.predict_one(disease, &features)?;
        tracing::debug!(
            "predicted {} for {}: features={:?}",
            label,
            disease,
            features.as_slice()
        );

        Ok(Prediction {
            values,
            features,
            diagnosis: Diagnosis::from_label(disease, label),
        })
    }

    /// Predicts from a raw form submission.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::Form`] if a value fails widget coercion, or a registry error
    /// if the model cannot run.
    pub fn predict_submission(
        &self,
        disease: Disease,
        submission: &HashMap<String, String>,
    ) -> CoreResult<Prediction> {
        let values = FormValues::from_submission(disease, submission)?;
        self.predict_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, Label, LogisticRegression};
    use crate::error::FormError;
    use crate::features::feature_order;
    use crate::CoreError;

    /// Classifier that always answers the same label.
    #[derive(Debug)]
    struct Fixed {
        label: Label,
        n_features: usize,
    }

    impl Classifier for Fixed {
        fn kind(&self) -> &'static str {
            "fixed"
        }

        fn n_features(&self) -> usize {
            self.n_features
        }

        fn predict_row(&self, _row: &[f64]) -> Label {
            self.label
        }
    }

    fn service(label: Label) -> PredictionService {
        let registry = ModelRegistry::from_classifiers(Disease::ALL.map(|d| {
            let classifier: Arc<dyn Classifier> = Arc::new(Fixed {
                label,
                n_features: feature_order(d).len(),
            });
            (d, classifier)
        }))
        .expect("registry");
        PredictionService::new(Arc::new(registry))
    }

    fn submission(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_diabetes_positive_flow() {
        let raw = submission(&[
            ("Glucose", "150"),
            ("BloodPressure", "80"),
            ("BMI", "30"),
            ("Age", "45"),
        ]);
        let prediction = service(Label::Positive)
            .predict_submission(Disease::Diabetes, &raw)
            .expect("predict");
        assert_eq!(prediction.features.as_slice(), &[150.0, 80.0, 30.0, 45.0]);
        assert_eq!(prediction.diagnosis.message, "✅ The person is diabetic");
    }

    #[test]
    fn test_negative_label_renders_negative_message() {
        let prediction = service(Label::Negative)
            .predict_submission(Disease::Parkinsons, &HashMap::new())
            .expect("predict");
        assert_eq!(
            prediction.diagnosis.message,
            "❌ The person is not likely to have Parkinson's Disease"
        );
        assert_eq!(prediction.features.as_slice(), &[0.0; 6]);
    }

    #[test]
    fn test_form_error_is_reported_before_prediction() {
        let raw = submission(&[("chol", "9000")]);
        let err = service(Label::Positive)
            .predict_submission(Disease::HeartDisease, &raw)
            .expect_err("should reject");
        assert!(matches!(
            err,
            CoreError::Form(FormError::OutOfRange { label, .. }) if label == "Serum Cholesterol (mg/dL)"
        ));
    }

    #[test]
    fn test_repeated_submissions_rerun_the_model() {
        let model: Arc<dyn Classifier> = Arc::new(LogisticRegression {
            coefficients: vec![1.0, 0.0, 0.0, 0.0],
            intercept: -120.0,
            threshold: 0.5,
            scaler: None,
        });
        let registry = ModelRegistry::from_classifiers([(Disease::Diabetes, model)]).expect("registry");
        let service = PredictionService::new(Arc::new(registry));

        let high = submission(&[("Glucose", "150")]);
        let low = submission(&[("Glucose", "100")]);
        let first = service.predict_submission(Disease::Diabetes, &high).expect("first");
        let second = service.predict_submission(Disease::Diabetes, &low).expect("second");
        let third = service.predict_submission(Disease::Diabetes, &high).expect("third");
        assert!(first.diagnosis.is_positive());
        assert!(!second.diagnosis.is_positive());
        assert_eq!(first, third);
    }
}
