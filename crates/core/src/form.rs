//! Per-disease input forms.
//!
//! Each disease page declares an ordered table of [`FormField`]s. A field knows how to render
//! itself (label, help text, widget kind) and how to coerce a submitted string into the scalar
//! fed to the feature assembler. Coercion only enforces what the widget itself would: numeric
//! text, slider bounds and the fixed option lists. There is no cross-field validation.

use crate::disease::Disease;
use crate::error::FormError;
use std::collections::HashMap;

/// One choice of a single-select widget and its numeric encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOption {
    pub label: &'static str,
    pub code: f64,
}

/// Widget kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    /// Free numeric entry, optionally bounded (inclusive).
    FreeNumber {
        range: Option<(f64, f64)>,
        step: f64,
    },
    /// Integer slider with inclusive bounds.
    IntegerSlider { min: i64, max: i64 },
    /// Mutually exclusive choice with a fixed encoding table.
    SingleSelect { options: &'static [SelectOption] },
    /// Boolean tick box, encoded as 0 or 1.
    Checkbox,
}

/// A named input on a disease page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: InputKind,
    /// Value used when the widget was never touched.
    pub default: f64,
}

const fn opt(label: &'static str, code: f64) -> SelectOption {
    SelectOption { label, code }
}

pub const SEX_OPTIONS: [SelectOption; 2] = [opt("Female", 0.0), opt("Male", 1.0)];

pub const YES_NO_OPTIONS: [SelectOption; 2] = [opt("No", 0.0), opt("Yes", 1.0)];

pub const CHEST_PAIN_OPTIONS: [SelectOption; 4] = [
    opt(
        "Typical Angina (Pressure or squeezing in the chest(chest pain on exertion))",
        0.0,
    ),
    opt(
        "Atypical Angina (Unusual chest pain not related to exertion)",
        1.0,
    ),
    opt("Non-anginal Pain (Chest pain not related to the heart)", 2.0),
    opt("Asymptomatic (No chest pain)", 3.0),
];

const fn number(key: &'static str, label: &'static str, help: &'static str) -> FormField {
    FormField {
        key,
        label,
        help,
        kind: InputKind::FreeNumber {
            range: None,
            step: 1.0,
        },
        default: 0.0,
    }
}

/// Bounded number field; an untouched widget starts at its minimum.
const fn bounded(
    key: &'static str,
    label: &'static str,
    help: &'static str,
    min: f64,
    max: f64,
) -> FormField {
    FormField {
        key,
        label,
        help,
        kind: InputKind::FreeNumber {
            range: Some((min, max)),
            step: 1.0,
        },
        default: min,
    }
}

const fn slider(
    key: &'static str,
    label: &'static str,
    help: &'static str,
    min: i64,
    max: i64,
    default: f64,
) -> FormField {
    FormField {
        key,
        label,
        help,
        kind: InputKind::IntegerSlider { min, max },
        default,
    }
}

/// Single select; the first option is preselected and every table here encodes it as 0.
const fn select(
    key: &'static str,
    label: &'static str,
    help: &'static str,
    options: &'static [SelectOption],
) -> FormField {
    FormField {
        key,
        label,
        help,
        kind: InputKind::SingleSelect { options },
        default: 0.0,
    }
}

const fn checkbox(key: &'static str, label: &'static str, help: &'static str) -> FormField {
    FormField {
        key,
        label,
        help,
        kind: InputKind::Checkbox,
        default: 0.0,
    }
}

pub const DIABETES_FIELDS: [FormField; 4] = [
    number("Glucose", "Glucose Level", "Enter glucose level"),
    number(
        "BloodPressure",
        "Blood Pressure value",
        "Enter blood pressure value",
    ),
    number("BMI", "BMI value", "Enter Body Mass Index value"),
    number("Age", "Age of the Person", "Enter age of the person"),
];

pub const HEART_DISEASE_FIELDS: [FormField; 7] = [
    bounded("age", "Age", "", 18.0, 100.0),
    select("sex", "Sex", "", &SEX_OPTIONS),
    select("cp", "Chest Pain Type", "", &CHEST_PAIN_OPTIONS),
    bounded("trestbps", "Resting Blood Pressure (mm Hg)", "", 50.0, 300.0),
    bounded("chol", "Serum Cholesterol (mg/dL)", "", 100.0, 600.0),
    bounded("thalach", "Max Heart Rate Achieved", "", 60.0, 220.0),
    select(
        "exang",
        "Exercise Induced Angina(chest pain)",
        "",
        &YES_NO_OPTIONS,
    ),
];

pub const PARKINSONS_FIELDS: [FormField; 6] = [
    select(
        "tremors",
        "Tremors (shaking or trembling)",
        "Involuntary shaking of hands, arms, legs, or other body parts, often noticed at rest.",
        &YES_NO_OPTIONS,
    ),
    select(
        "bradykinesia",
        "Bradykinesia (slowness of movement)",
        "Slowed movements or difficulty initiating movement, common in Parkinson's Disease.",
        &YES_NO_OPTIONS,
    ),
    select(
        "muscle_stiffness",
        "Muscle Stiffness (rigidity)",
        "Feeling of tight or rigid muscles, especially in arms or legs.",
        &YES_NO_OPTIONS,
    ),
    select(
        "balance_issues",
        "Balance Issues",
        "Unsteady gait or frequent loss of balance while standing or walking.",
        &YES_NO_OPTIONS,
    ),
    select(
        "voice_changes",
        "Voice Changes",
        "Changes in voice such as becoming softer, hoarse, or monotone.",
        &YES_NO_OPTIONS,
    ),
    select(
        "facial_expression_changes",
        "Facial Expression Changes",
        "Reduced facial expressions or a 'masked' look, often noticed by others.",
        &YES_NO_OPTIONS,
    ),
];

pub const LUNG_CANCER_FIELDS: [FormField; 8] = [
    select("gender", "Gender", "Select your gender", &SEX_OPTIONS),
    slider("age", "Age", "Enter your age in years", 1, 100, 30.0),
    checkbox("smoking", "Smoking", "Check if you are a regular smoker"),
    checkbox(
        "fatigue",
        "Fatigue",
        "Check if you often feel tired or low on energy",
    ),
    checkbox(
        "wheezing",
        "Wheezing",
        "Check if you experience a whistling sound when breathing",
    ),
    checkbox(
        "coughing",
        "Coughing",
        "Check if you have frequent or chronic cough",
    ),
    checkbox(
        "short_breath",
        "Shortness of Breath",
        "Check if you experience difficulty breathing or feel breathless",
    ),
    checkbox(
        "chest_pain",
        "Chest Pain",
        "Check if you feel pain or discomfort in your chest",
    ),
];

/// Fields of a disease page in declaration (render) order.
pub fn fields(disease: Disease) -> &'static [FormField] {
    match disease {
        Disease::Diabetes => &DIABETES_FIELDS,
        Disease::HeartDisease => &HEART_DISEASE_FIELDS,
        Disease::Parkinsons => &PARKINSONS_FIELDS,
        Disease::LungCancer => &LUNG_CANCER_FIELDS,
    }
}

/// Checkbox spellings; JSON clients send booleans and numbers such as `1.0`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "checked" => Some(true),
        "off" | "false" | "no" => Some(false),
        other => match other.parse::<f64>().ok()? {
            v if v == 1.0 => Some(true),
            v if v == 0.0 => Some(false),
            _ => None,
        },
    }
}

fn flag_code(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Formats a scalar the way a number widget shows it: whole numbers without a fraction.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl FormField {
    /// Coerces a submitted value into the field's scalar.
    ///
    /// A missing or blank value yields the field default, matching an untouched widget.
    pub fn coerce(&self, raw: Option<&str>) -> Result<f64, FormError> {
        let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self.default);
        };

        match self.kind {
            InputKind::FreeNumber { range, step } => {
                let value = self.parse_number(raw)?;
                if step.fract() == 0.0 {
                    self.check_whole(value)?;
                }
                if let Some((min, max)) = range {
                    self.check_range(value, min, max)?;
                }
                Ok(value)
            }
            InputKind::IntegerSlider { min, max } => {
                let value = self.parse_number(raw)?;
                self.check_whole(value)?;
                self.check_range(value, min as f64, max as f64)?;
                Ok(value)
            }
            InputKind::SingleSelect { options } => options
                .iter()
                .find(|o| o.label.eq_ignore_ascii_case(raw))
                .or_else(|| {
                    let code = raw.parse::<f64>().ok()?;
                    options.iter().find(|o| o.code == code)
                })
                .map(|o| o.code)
                .or_else(|| {
                    // No/Yes selects double as booleans.
                    if options != YES_NO_OPTIONS.as_slice() {
                        return None;
                    }
                    parse_flag(raw).map(flag_code)
                })
                .ok_or_else(|| FormError::UnknownOption {
                    label: self.label,
                    value: raw.to_string(),
                }),
            InputKind::Checkbox => {
                parse_flag(raw)
                    .map(flag_code)
                    .ok_or_else(|| FormError::UnknownOption {
                        label: self.label,
                        value: raw.to_string(),
                    })
            }
        }
    }

    /// Renders a coerced scalar back into the string the widget would submit.
    pub fn display(&self, value: f64) -> String {
        match self.kind {
            InputKind::Checkbox if value != 0.0 => "on".to_string(),
            InputKind::Checkbox => String::new(),
            InputKind::SingleSelect { options } => options
                .iter()
                .find(|o| o.code == value)
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| format_number(value)),
            _ => format_number(value),
        }
    }

    fn parse_number(&self, raw: &str) -> Result<f64, FormError> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(FormError::NotANumber { label: self.label })
    }

    fn check_whole(&self, value: f64) -> Result<(), FormError> {
        if value.fract() != 0.0 {
            return Err(FormError::NotAnInteger { label: self.label });
        }
        Ok(())
    }

    fn check_range(&self, value: f64, min: f64, max: f64) -> Result<(), FormError> {
        if value < min || value > max {
            return Err(FormError::OutOfRange {
                label: self.label,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// Coerced widget values of one page for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    disease: Disease,
    values: Vec<(&'static FormField, f64)>,
}

impl FormValues {
    /// Values of a page nobody has touched yet.
    pub fn defaults(disease: Disease) -> Self {
        Self {
            disease,
            values: fields(disease).iter().map(|f| (f, f.default)).collect(),
        }
    }

    /// Coerces a raw submission. Unknown keys are ignored; missing keys take their default.
    ///
    /// # Errors
    /// Returns the first [`FormError`] in field order.
    pub fn from_submission(
        disease: Disease,
        submission: &HashMap<String, String>,
    ) -> Result<Self, FormError> {
        let values = fields(disease)
            .iter()
            .map(|field| {
                let raw = submission.get(field.key).map(String::as_str);
                field.coerce(raw).map(|value| (field, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { disease, values })
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(field, _)| field.key == key)
            .map(|(_, value)| *value)
    }

    /// The values as the strings each widget would submit, for echoing back into the form.
    pub fn to_submission(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|(field, value)| (field.key.to_string(), field.display(*value)))
            .collect()
    }
}
