//! Disease and page identity.
//!
//! The UI is a fixed set of five pages: a home page plus one form per disease. Both are closed
//! enums so that routing, field tables and result messages are resolved by `match` rather than
//! by comparing page title strings.

use crate::constants::{
    DIABETES_MODEL_FILENAME, HEART_DISEASE_MODEL_FILENAME, LUNG_CANCER_MODEL_FILENAME,
    PARKINSONS_MODEL_FILENAME,
};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A disease with its own classifier and input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
}

impl Disease {
    /// All diseases in menu order.
    pub const ALL: [Disease; 4] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Parkinsons,
        Disease::LungCancer,
    ];

    /// Registry key, also used in the JSON API.
    pub fn key(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart_disease",
            Disease::Parkinsons => "parkinsons",
            Disease::LungCancer => "lung_cancer",
        }
    }

    /// URL path segment of the disease page.
    pub fn slug(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart-disease",
            Disease::Parkinsons => "parkinsons",
            Disease::LungCancer => "lung-cancer",
        }
    }

    /// Filename of the serialised classifier inside the model directory.
    pub fn artifact_filename(&self) -> &'static str {
        match self {
            Disease::Diabetes => DIABETES_MODEL_FILENAME,
            Disease::HeartDisease => HEART_DISEASE_MODEL_FILENAME,
            Disease::Parkinsons => PARKINSONS_MODEL_FILENAME,
            Disease::LungCancer => LUNG_CANCER_MODEL_FILENAME,
        }
    }

    pub fn menu_title(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction",
            Disease::HeartDisease => "Heart Disease Prediction",
            Disease::Parkinsons => "Parkinsons Prediction",
            Disease::LungCancer => "Lung Cancer Prediction",
        }
    }

    pub fn page_title(&self) -> &'static str {
        match self {
            Disease::Diabetes => "🩸 Diabetes Prediction",
            Disease::HeartDisease => "❤️ Heart Disease Prediction",
            Disease::Parkinsons => "🧠 Parkinson's Disease Prediction",
            Disease::LungCancer => "🫁 Lung Cancer Prediction",
        }
    }

    pub fn intro(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Enter the following details to predict diabetes:",
            Disease::HeartDisease => "Enter the following details to predict heart disease:",
            Disease::Parkinsons => "Enter the following details to predict Parkinson's disease:",
            Disease::LungCancer => "Enter the following details to predict lung cancer:",
        }
    }

    /// Caption of the form's submit button.
    pub fn submit_caption(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Predict Diabetes",
            Disease::HeartDisease => "Predict Heart Disease",
            Disease::Parkinsons => "Parkinson's Test Result",
            Disease::LungCancer => "Lung Cancer Test Result",
        }
    }

    /// Bootstrap icon name shown in the sidebar menu.
    pub fn icon(&self) -> &'static str {
        match self {
            Disease::Diabetes => "activity",
            Disease::HeartDisease => "heart",
            Disease::Parkinsons => "cpu",
            Disease::LungCancer => "lungs",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Disease {
    type Err = CoreError;

    /// Accepts either the registry key (`heart_disease`) or the page slug (`heart-disease`).
    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        Disease::ALL
            .into_iter()
            .find(|d| d.key() == s || d.slug() == s)
            .ok_or_else(|| CoreError::UnknownDisease(s.to_string()))
    }
}

/// A page reachable from the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Disease(Disease),
}

impl Page {
    /// All pages in menu order.
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Disease(Disease::Diabetes),
        Page::Disease(Disease::HeartDisease),
        Page::Disease(Disease::Parkinsons),
        Page::Disease(Disease::LungCancer),
    ];

    /// Absolute URL path of the page.
    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Disease(d) => format!("/{}", d.slug()),
        }
    }

    pub fn menu_title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Disease(d) => d.menu_title(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "house",
            Page::Disease(d) => d.icon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_parses_key_and_slug() {
        assert_eq!("heart_disease".parse::<Disease>().unwrap(), Disease::HeartDisease);
        assert_eq!("heart-disease".parse::<Disease>().unwrap(), Disease::HeartDisease);
        assert_eq!(" lung_cancer ".parse::<Disease>().unwrap(), Disease::LungCancer);
    }

    #[test]
    fn test_disease_rejects_unknown_name() {
        let err = "asthma".parse::<Disease>().expect_err("should reject");
        assert!(matches!(err, CoreError::UnknownDisease(name) if name == "asthma"));
    }

    #[test]
    fn test_page_menu_order_matches_sidebar() {
        let titles: Vec<_> = Page::ALL.iter().map(Page::menu_title).collect();
        assert_eq!(
            titles,
            vec![
                "Home",
                "Diabetes Prediction",
                "Heart Disease Prediction",
                "Parkinsons Prediction",
                "Lung Cancer Prediction",
            ]
        );
    }

    #[test]
    fn test_page_paths_are_distinct() {
        let paths: Vec<_> = Page::ALL.iter().map(Page::path).collect();
        assert_eq!(
            paths,
            vec!["/", "/diabetes", "/heart-disease", "/parkinsons", "/lung-cancer"]
        );
    }

    #[test]
    fn test_artifact_filenames_are_distinct() {
        let mut names: Vec<_> = Disease::ALL.iter().map(Disease::artifact_filename).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
