//! Binary classifiers behind the model artifacts.
//!
//! The registry only needs `predict(rows) -> labels`, expressed by the [`Classifier`] trait. The
//! serialised artifacts carry one of three model families, described by [`ClassifierSpec`]:
//!
//! - `logistic_regression`: optional standard scaling, then a linear score through a sigmoid
//! - `decision_tree`: flattened node arrays (left/right child, split feature, threshold, per-class
//!   leaf weights)
//! - `random_forest`: several such trees whose normalised leaf weights are averaged
//!
//! Trees go left when `x[feature] <= threshold`. Class ties resolve to the negative label.

use crate::constants::{DEFAULT_DECISION_THRESHOLD, TREE_LEAF};
use crate::features::FeatureVector;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of a binary classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Label::Positive
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

impl From<bool> for Label {
    fn from(positive: bool) -> Self {
        if positive {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(format!("label must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Something that maps feature rows to binary labels.
pub trait Classifier: fmt::Debug + Send + Sync {
    /// Short name of the model family, for display.
    fn kind(&self) -> &'static str;

    /// Number of features each row must carry.
    fn n_features(&self) -> usize;

    /// Predicts one row. `row.len()` has already been checked against [`n_features`].
    ///
    /// [`n_features`]: Classifier::n_features
    fn predict_row(&self, row: &[f64]) -> Label;

    /// Predicts a batch of rows, one label per row.
    ///
    /// # Errors
    /// Returns [`CoreError::FeatureWidth`] if any row has the wrong length.
    fn predict(&self, rows: &[FeatureVector]) -> CoreResult<Vec<Label>> {
        let expected = self.n_features();
        rows.iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(CoreError::FeatureWidth {
                        expected,
                        actual: row.len(),
                    });
                }
                Ok(self.predict_row(row.as_slice()))
            })
            .collect()
    }
}

/// Serialised model, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ClassifierSpec {
    /// Checks internal consistency so that prediction cannot index out of bounds.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            ClassifierSpec::LogisticRegression(m) => m.validate(),
            ClassifierSpec::DecisionTree(m) => m.validate(),
            ClassifierSpec::RandomForest(m) => m.validate(),
        }
    }
}

impl Classifier for ClassifierSpec {
    fn kind(&self) -> &'static str {
        match self {
            ClassifierSpec::LogisticRegression(m) => m.kind(),
            ClassifierSpec::DecisionTree(m) => m.kind(),
            ClassifierSpec::RandomForest(m) => m.kind(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            ClassifierSpec::LogisticRegression(m) => m.n_features(),
            ClassifierSpec::DecisionTree(m) => m.n_features(),
            ClassifierSpec::RandomForest(m) => m.n_features(),
        }
    }

    fn predict_row(&self, row: &[f64]) -> Label {
        match self {
            ClassifierSpec::LogisticRegression(m) => m.predict_row(row),
            ClassifierSpec::DecisionTree(m) => m.predict_row(row),
            ClassifierSpec::RandomForest(m) => m.predict_row(row),
        }
    }
}

/// Per-feature standardisation applied before a linear model: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

fn default_threshold() -> f64 {
    DEFAULT_DECISION_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Positive iff the probability is strictly above this value.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
}

impl LogisticRegression {
    pub fn probability(&self, row: &[f64]) -> f64 {
        let z = self
            .coefficients
            .iter()
            .zip(row)
            .enumerate()
            .map(|(i, (w, x))| {
                let x = match &self.scaler {
                    Some(s) => (x - s.mean[i]) / s.scale[i],
                    None => *x,
                };
                w * x
            })
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }

    fn validate(&self) -> CoreResult<()> {
        if self.coefficients.is_empty() {
            return Err(CoreError::InvalidClassifier(
                "logistic regression has no coefficients".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(CoreError::InvalidClassifier(format!(
                "threshold {} is not a probability",
                self.threshold
            )));
        }
        if let Some(scaler) = &self.scaler {
            let n = self.coefficients.len();
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(CoreError::InvalidClassifier(
                    "scaler length does not match coefficients".into(),
                ));
            }
            if scaler.scale.iter().any(|s| *s == 0.0) {
                return Err(CoreError::InvalidClassifier("scaler has zero scale".into()));
            }
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> Label {
        Label::from(self.probability(row) > self.threshold)
    }
}

/// A single CART tree in flattened array form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionTree {
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[negative, positive]`; only leaves are read.
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn leaf(&self, row: &[f64]) -> usize {
        let mut node = 0;
        loop {
            let left = self.children_left[node];
            if left == TREE_LEAF {
                return node;
            }
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }

    /// Normalised class weights of the leaf `row` lands in.
    pub fn proba(&self, row: &[f64]) -> [f64; 2] {
        let [neg, pos] = self.value[self.leaf(row)];
        let total = neg + pos;
        if total <= 0.0 {
            return [0.0, 0.0];
        }
        [neg / total, pos / total]
    }

    fn validate(&self) -> CoreResult<()> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(CoreError::InvalidClassifier("decision tree has no nodes".into()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(CoreError::InvalidClassifier(
                "decision tree arrays differ in length".into(),
            ));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF && right == TREE_LEAF {
                if self.value[node].iter().any(|w| *w < 0.0 || !w.is_finite()) {
                    return Err(CoreError::InvalidClassifier(format!(
                        "node {node} has invalid leaf weights"
                    )));
                }
                continue;
            }
            // Children must come after their parent, which also rules out cycles.
            let child_ok = |c: i64| c > node as i64 && (c as usize) < n;
            if !child_ok(left) || !child_ok(right) {
                return Err(CoreError::InvalidClassifier(format!(
                    "node {node} has invalid children ({left}, {right})"
                )));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= self.n_features {
                return Err(CoreError::InvalidClassifier(format!(
                    "node {node} splits on feature {feature}, model has {}",
                    self.n_features
                )));
            }
        }
        Ok(())
    }
}

fn argmax(proba: [f64; 2]) -> Label {
    Label::from(proba[1] > proba[0])
}

impl Classifier for DecisionTree {
    fn kind(&self) -> &'static str {
        "decision_tree"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, row: &[f64]) -> Label {
        argmax(self.proba(row))
    }
}

/// Averaging ensemble of decision trees.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RandomForest {
    pub n_features: usize,
    pub estimators: Vec<DecisionTree>,
}

impl RandomForest {
    /// Mean of the trees' class probabilities.
    pub fn proba(&self, row: &[f64]) -> [f64; 2] {
        let n = self.estimators.len() as f64;
        let [neg, pos] = self
            .estimators
            .iter()
            .map(|tree| tree.proba(row))
            .fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
        [neg / n, pos / n]
    }

    fn validate(&self) -> CoreResult<()> {
        if self.estimators.is_empty() {
            return Err(CoreError::InvalidClassifier("random forest has no trees".into()));
        }
        for (i, tree) in self.estimators.iter().enumerate() {
            if tree.n_features != self.n_features {
                return Err(CoreError::InvalidClassifier(format!(
                    "tree {i} expects {} features, forest expects {}",
                    tree.n_features, self.n_features
                )));
            }
            tree.validate()?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, row: &[f64]) -> Label {
        argmax(self.proba(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depth-one tree: positive when feature 0 is above 0.5.
    fn stump(n_features: usize, threshold: f64) -> DecisionTree {
        DecisionTree {
            n_features,
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![[5.0, 5.0], [4.0, 1.0], [1.0, 4.0]],
        }
    }

    fn rows(values: &[&[f64]]) -> Vec<FeatureVector> {
        values.iter().map(|r| FeatureVector::new(r.to_vec())).collect()
    }

    #[test]
    fn test_label_serialises_as_integer() {
        assert_eq!(serde_json::to_string(&Label::Positive).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Label>("0").unwrap(), Label::Negative);
        assert!(serde_json::from_str::<Label>("2").is_err());
    }

    #[test]
    fn test_logistic_regression_thresholds_sigmoid() {
        let model = LogisticRegression {
            coefficients: vec![1.0, 0.0],
            intercept: -2.0,
            threshold: 0.5,
            scaler: None,
        };
        let labels = model
            .predict(&rows(&[&[1.0, 9.0], &[3.0, 9.0], &[2.0, 0.0]]))
            .expect("predict");
        // z == 0 gives exactly 0.5, which is not above the threshold.
        assert_eq!(labels, vec![Label::Negative, Label::Positive, Label::Negative]);
    }

    #[test]
    fn test_logistic_regression_applies_scaler() {
        let model = LogisticRegression {
            coefficients: vec![1.0],
            intercept: 0.0,
            threshold: 0.5,
            scaler: Some(StandardScaler {
                mean: vec![100.0],
                scale: vec![10.0],
            }),
        };
        assert!(model.probability(&[120.0]) > 0.85);
        assert_eq!(model.predict_row(&[90.0]), Label::Negative);
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let model = stump(2, 0.5);
        let err = model.predict(&rows(&[&[1.0]])).expect_err("should reject");
        assert!(matches!(err, CoreError::FeatureWidth { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_decision_tree_goes_left_on_equal_threshold() {
        let model = stump(1, 0.5);
        assert_eq!(model.predict_row(&[0.5]), Label::Negative);
        assert_eq!(model.predict_row(&[0.51]), Label::Positive);
        assert_eq!(model.proba(&[0.0]), [0.8, 0.2]);
    }

    #[test]
    fn test_decision_tree_tie_resolves_negative() {
        let mut model = stump(1, 0.5);
        model.value[2] = [2.0, 2.0];
        assert_eq!(model.predict_row(&[1.0]), Label::Negative);
    }

    #[test]
    fn test_decision_tree_validation_rejects_back_edges() {
        let mut model = stump(1, 0.5);
        model.children_left[0] = 0;
        assert!(matches!(
            model.validate(),
            Err(CoreError::InvalidClassifier(msg)) if msg.contains("invalid children")
        ));
    }

    #[test]
    fn test_decision_tree_validation_rejects_unknown_feature() {
        let mut model = stump(1, 0.5);
        model.feature[0] = 3;
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_random_forest_averages_probabilities() {
        let forest = RandomForest {
            n_features: 2,
            estimators: vec![stump(2, 0.5), stump(2, 10.0), stump(2, 20.0)],
        };
        forest.validate().expect("valid forest");
        // Only the first stump votes positive for x = 1: (0.8 + 0.2 + 0.2) / 3 positive.
        let [neg, pos] = forest.proba(&[1.0, 0.0]);
        assert!((pos - 0.4).abs() < 1e-12);
        assert!((neg - 0.6).abs() < 1e-12);
        assert_eq!(forest.predict_row(&[1.0, 0.0]), Label::Negative);
        assert_eq!(forest.predict_row(&[15.0, 0.0]), Label::Positive);
    }

    #[test]
    fn test_random_forest_rejects_mismatched_tree() {
        let forest = RandomForest {
            n_features: 3,
            estimators: vec![stump(2, 0.5)],
        };
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_spec_deserialises_by_kind_tag() {
        let json = r#"{"kind": "logistic_regression", "coefficients": [0.5, -0.25], "intercept": 1.0}"#;
        let spec: ClassifierSpec = serde_json::from_str(json).expect("parse");
        assert_eq!(spec.kind(), "logistic_regression");
        assert_eq!(spec.n_features(), 2);
        match spec {
            ClassifierSpec::LogisticRegression(m) => assert_eq!(m.threshold, 0.5),
            other => panic!("expected logistic regression, got {other:?}"),
        }
    }

    #[test]
    fn test_predict_is_deterministic() {
        let forest = RandomForest {
            n_features: 1,
            estimators: vec![stump(1, 0.5), stump(1, 0.7)],
        };
        let input = rows(&[&[0.6]]);
        assert_eq!(
            forest.predict(&input).expect("first"),
            forest.predict(&input).expect("second")
        );
    }
}
