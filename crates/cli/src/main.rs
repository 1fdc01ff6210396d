use clap::{Parser, Subcommand};
use medpredict_core::{
    config::model_dir_from_env_value, fields, CoreConfig, Disease, FormField, InputKind,
    ModelRegistry, PredictionService,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "medpredict")]
#[command(about = "Disease prediction system CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the disease pages and their form fields
    Pages,
    /// Load the model artifacts and describe them
    Models {
        /// Model directory (defaults to MEDPREDICT_MODEL_DIR, then "Models")
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },
    /// Predict one disease from field values
    Predict {
        /// Disease key or page slug, e.g. heart_disease
        disease: String,
        /// Field values as key=value; omitted fields take their default
        fields: Vec<String>,
        /// Model directory (defaults to MEDPREDICT_MODEL_DIR, then "Models")
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },
}

fn describe_kind(field: &FormField) -> String {
    match field.kind {
        InputKind::FreeNumber { range: None, .. } => "number".to_string(),
        InputKind::FreeNumber {
            range: Some((min, max)),
            ..
        } => format!("number {min}..={max}"),
        InputKind::IntegerSlider { min, max } => format!("slider {min}..={max}"),
        InputKind::SingleSelect { options } => {
            let choices: Vec<String> = options
                .iter()
                .map(|o| format!("{}={}", o.label, o.code))
                .collect();
            format!("select [{}]", choices.join(" | "))
        }
        InputKind::Checkbox => "checkbox".to_string(),
    }
}

fn load_registry(model_dir: Option<PathBuf>) -> Result<ModelRegistry, Box<dyn std::error::Error>> {
    let model_dir = model_dir.unwrap_or_else(|| {
        model_dir_from_env_value(std::env::var("MEDPREDICT_MODEL_DIR").ok())
    });
    let cfg = CoreConfig::new(model_dir, None)?;
    Ok(ModelRegistry::load(&cfg)?)
}

fn parse_fields(pairs: &[String]) -> Result<HashMap<String, String>, String> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| format!("expected key=value, got {pair:?}"))
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Pages) => {
            for disease in Disease::ALL {
                println!("{} ({})", disease.menu_title(), disease.key());
                for field in fields(disease) {
                    println!("  {:<28} {:<40} {}", field.key, field.label, describe_kind(field));
                }
            }
        }
        Some(Commands::Models { model_dir }) => {
            let registry = load_registry(model_dir)?;
            for model in registry.describe() {
                println!(
                    "{}: {} ({}), features: {}",
                    model.disease,
                    model.name,
                    model.kind,
                    model.features.join(", ")
                );
            }
        }
        Some(Commands::Predict {
            disease,
            fields,
            model_dir,
        }) => {
            let disease: Disease = disease.parse()?;
            let submission = parse_fields(&fields)?;
            let service = PredictionService::new(Arc::new(load_registry(model_dir)?));
            let prediction = service.predict_submission(disease, &submission)?;
            println!("Features: {:?}", prediction.features.as_slice());
            println!("{}", prediction.diagnosis.message);
        }
        None => {
            println!("Use 'medpredict --help' for commands");
        }
    }

    Ok(())
}
