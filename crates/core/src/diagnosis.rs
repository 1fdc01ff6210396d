//! Decision rendering: label to message.

use crate::classifier::Label;
use crate::disease::Disease;
use serde::Serialize;

/// Message shown when the classifier predicts the disease.
pub fn positive_message(disease: Disease) -> &'static str {
    match disease {
        Disease::Diabetes => "✅ The person is diabetic",
        Disease::HeartDisease => "✅ The person has heart disease",
        Disease::Parkinsons => "✅The person is likely to have Parkinson's Disease",
        Disease::LungCancer => "✅The person is likely to have Lung Cancer.",
    }
}

/// Message shown when the classifier does not predict the disease.
pub fn negative_message(disease: Disease) -> &'static str {
    match disease {
        Disease::Diabetes => "❌ The person is not diabetic",
        Disease::HeartDisease => "❌ The person does not have heart disease",
        Disease::Parkinsons => "❌ The person is not likely to have Parkinson's Disease",
        Disease::LungCancer => "❌ The person is not likely to have Lung Cancer.",
    }
}

/// The displayed outcome of one button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub disease: Disease,
    pub label: Label,
    pub message: &'static str,
}

impl Diagnosis {
    pub fn from_label(disease: Disease, label: Label) -> Self {
        let message = match label {
            Label::Positive => positive_message(disease),
            Label::Negative => negative_message(disease),
        };
        Self {
            disease,
            label,
            message,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.label.is_positive()
    }
}
