//! JSON API handlers.

use crate::AppState;
use api_shared::{HealthRes, HealthService, ListModelsRes, ModelInfo, PredictReq, PredictRes};
use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
};
use medpredict_core::{CoreError, Disease};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Reports liveness and how many classifiers are loaded.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(
        state.predictions.registry().len(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/models",
    responses(
        (status = 200, description = "Loaded models", body = ListModelsRes)
    )
)]
/// List the loaded classifiers
///
/// # Returns
/// * `Json<ListModelsRes>` - One entry per disease, in menu order
#[axum::debug_handler]
pub async fn list_models(State(state): State<AppState>) -> Json<ListModelsRes> {
    let models = state
        .predictions
        .registry()
        .describe()
        .into_iter()
        .map(|m| ModelInfo {
            disease: m.disease.key().to_string(),
            name: m.name,
            kind: m.kind.to_string(),
            features: m.features,
        })
        .collect();
    Json(ListModelsRes { models })
}

#[utoipa::path(
    post,
    path = "/api/v1/predict/{disease}",
    params(
        ("disease" = String, Path, description = "Disease key or page slug, e.g. heart_disease")
    ),
    request_body = PredictReq,
    responses(
        (status = 200, description = "Prediction", body = PredictRes),
        (status = 400, description = "Malformed field values"),
        (status = 404, description = "Unknown disease"),
        (status = 422, description = "A field failed widget coercion"),
        (status = 500, description = "Internal server error")
    )
)]
/// Predict one disease from widget values
///
/// Runs the same coercion, assembly and decision steps as the HTML form.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if a value is out of range or not a valid option, and
/// `500 Internal Server Error` if the model fails.
#[axum::debug_handler]
pub async fn predict(
    State(state): State<AppState>,
    AxumPath(disease): AxumPath<String>,
    Json(req): Json<PredictReq>,
) -> Result<Json<PredictRes>, (StatusCode, String)> {
    let disease: Disease = disease
        .parse()
        .map_err(|e: CoreError| (StatusCode::NOT_FOUND, e.to_string()))?;
    let submission = req
        .to_submission()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    match state.predictions.predict_submission(disease, &submission) {
        Ok(prediction) => Ok(Json(PredictRes {
            disease: disease.key().to_string(),
            label: prediction.diagnosis.label.as_u8(),
            positive: prediction.diagnosis.is_positive(),
            message: prediction.diagnosis.message.to_string(),
            features: prediction.features.into_inner(),
        })),
        Err(CoreError::Form(err)) => Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
        Err(e) => {
            tracing::error!("Prediction error for {}: {:?}", disease, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()))
        }
    }
}
