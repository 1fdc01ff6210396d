use crate::types::HealthRes;

/// Simple health service for the prediction APIs
///
/// Reports liveness together with how many classifiers the registry holds, so that a load
/// balancer check also notices a server started without its models.
#[derive(Clone, Copy, Debug)]
pub struct HealthService;

impl HealthService {
    /// Builds the health response for a registry holding `models_loaded` classifiers.
    ///
    /// # Returns
    /// A `HealthRes` that is `ok` when all four models are present.
    pub fn check_health(models_loaded: usize) -> HealthRes {
        let ok = models_loaded == crate::types::EXPECTED_MODELS;
        HealthRes {
            ok,
            message: if ok {
                "Disease Prediction System is alive".into()
            } else {
                format!("{models_loaded} of {} models loaded", crate::types::EXPECTED_MODELS)
            },
            models_loaded: models_loaded as u32,
        }
    }
}
