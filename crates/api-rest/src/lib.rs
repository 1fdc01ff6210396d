//! # API REST
//!
//! HTTP surface of the disease prediction system.
//!
//! Handles:
//! - Server-rendered HTML pages (home page and one form per disease) with axum
//! - The JSON prediction API with OpenAPI/Swagger documentation
//! - HTTP concerns (form decoding, status codes, CORS, request tracing)
//!
//! Uses `medpredict-core` for all prediction logic and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

pub mod api;
pub mod html;
pub mod pages;

use axum::{
    extract::{Form, State},
    routing::{get, post},
    Router,
};
use medpredict_core::{CoreConfig, CoreResult, Disease, ModelRegistry, Page, PredictionService};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
///
/// Holds the startup configuration and the prediction service wrapping the read-only model
/// registry. Both are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub predictions: PredictionService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, registry: Arc<ModelRegistry>) -> Self {
        Self {
            cfg,
            predictions: PredictionService::new(registry),
        }
    }

    /// Loads the model registry described by `cfg`.
    ///
    /// # Errors
    /// Returns the registry error if any artifact is missing or invalid.
    pub fn load(cfg: CoreConfig) -> CoreResult<Self> {
        let registry = ModelRegistry::load(&cfg)?;
        Ok(Self::new(Arc::new(cfg), Arc::new(registry)))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(api::health, api::list_models, api::predict),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ModelInfo,
        api_shared::ListModelsRes,
        api_shared::PredictReq,
        api_shared::PredictRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let mut app: Router<AppState> = Router::new().route("/", get(pages::home));

    for disease in Disease::ALL {
        let page = Page::Disease(disease);
        app = app.route(
            &page.path(),
            get(move |State(state): State<AppState>| async move {
                pages::render_page(&state, page)
            })
            .post(
                move |State(state): State<AppState>,
                      Form(submission): Form<HashMap<String, String>>| async move {
                    pages::submit(&state, disease, submission)
                },
            ),
        );
    }

    app.route("/health", get(api::health))
        .route("/api/v1/models", get(api::list_models))
        .route("/api/v1/predict/:disease", post(api::predict))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use medpredict_core::{feature_order, Classifier, Label};
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// Positive iff the first feature is above `cut`.
    #[derive(Debug)]
    struct FirstAbove {
        cut: f64,
        n_features: usize,
    }

    impl Classifier for FirstAbove {
        fn kind(&self) -> &'static str {
            "first_above"
        }

        fn n_features(&self) -> usize {
            self.n_features
        }

        fn predict_row(&self, row: &[f64]) -> Label {
            Label::from(row[0] > self.cut)
        }
    }

    fn test_app(temp: &TempDir) -> Router {
        let registry = ModelRegistry::from_classifiers(Disease::ALL.map(|d| {
            let classifier: Arc<dyn Classifier> = Arc::new(FirstAbove {
                cut: 100.0,
                n_features: feature_order(d).len(),
            });
            (d, classifier)
        }))
        .expect("registry");
        let cfg = CoreConfig::new(temp.path().to_path_buf(), None).expect("config");
        router(AppState::new(Arc::new(cfg), Arc::new(registry)))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn test_home_page_lists_menu() {
        let temp = TempDir::new().expect("tempdir");
        let response = test_app(&temp)
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Welcome to Disease Prediction System"));
        assert!(body.contains("Lung Cancer Prediction"));
    }

    #[tokio::test]
    async fn test_disease_page_renders_form() {
        let temp = TempDir::new().expect("tempdir");
        let response = test_app(&temp)
            .oneshot(Request::get("/heart-disease").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Predict Heart Disease"));
        assert!(body.contains("name=\"thalach\""));
        assert!(!body.contains("role=\"status\""));
    }

    #[tokio::test]
    async fn test_diabetes_submission_shows_positive_banner() {
        let temp = TempDir::new().expect("tempdir");
        let response = test_app(&temp)
            .oneshot(form_post(
                "/diabetes",
                "Glucose=150&BloodPressure=80&BMI=30&Age=45",
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("✅ The person is diabetic"));
        assert!(body.contains("value=\"150\""));
    }

    #[tokio::test]
    async fn test_lung_cancer_submission_shows_negative_banner() {
        let temp = TempDir::new().expect("tempdir");
        let response = test_app(&temp)
            .oneshot(form_post("/lung-cancer", "gender=Female&age=30"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("❌ The person is not likely to have Lung Cancer."));
    }

    #[tokio::test]
    async fn test_invalid_submission_rerenders_form() {
        let temp = TempDir::new().expect("tempdir");
        let response = test_app(&temp)
            .oneshot(form_post("/heart-disease", "age=5"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("Age must be between 18 and 100"));
        assert!(body.contains("value=\"5\""));
    }

    #[tokio::test]
    async fn test_json_predict_returns_vector_and_message() {
        let temp = TempDir::new().expect("tempdir");
        let payload = serde_json::json!({
            "fields": {
                "age": 55, "sex": "Male", "cp": "Asymptomatic (No chest pain)",
                "trestbps": 130, "chol": 250, "thalach": 150, "exang": "Yes"
            }
        });
        let request = Request::post("/api/v1/predict/heart_disease")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");
        let response = test_app(&temp).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let res: api_shared::PredictRes =
            serde_json::from_str(&body_text(response).await).expect("json");
        assert_eq!(res.features, vec![55.0, 1.0, 3.0, 130.0, 250.0, 150.0, 1.0]);
        assert_eq!(res.label, 0);
        assert_eq!(res.message, "❌ The person does not have heart disease");
    }

    #[tokio::test]
    async fn test_json_predict_accepts_booleans_for_yes_no_fields() {
        let temp = TempDir::new().expect("tempdir");
        let payload = serde_json::json!({
            "fields": {"tremors": true, "bradykinesia": 1.0, "voice_changes": false}
        });
        let request = Request::post("/api/v1/predict/parkinsons")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");
        let response = test_app(&temp).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let res: api_shared::PredictRes =
            serde_json::from_str(&body_text(response).await).expect("json");
        assert_eq!(res.features, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_json_predict_rejects_fractional_age() {
        let temp = TempDir::new().expect("tempdir");
        let payload = serde_json::json!({"fields": {"age": 55.5}});
        let request = Request::post("/api/v1/predict/heart_disease")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");
        let response = test_app(&temp).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_json_predict_unknown_disease_is_not_found() {
        let temp = TempDir::new().expect("tempdir");
        let request = Request::post("/api/v1/predict/asthma")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request");
        let response = test_app(&temp).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_and_models_report_registry() {
        let temp = TempDir::new().expect("tempdir");
        let app = test_app(&temp);

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let health: api_shared::HealthRes =
            serde_json::from_str(&body_text(response).await).expect("json");
        assert!(health.ok);

        let response = app
            .oneshot(Request::get("/api/v1/models").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let models: api_shared::ListModelsRes =
            serde_json::from_str(&body_text(response).await).expect("json");
        assert_eq!(models.models.len(), 4);
        assert_eq!(models.models[1].disease, "heart_disease");
        assert_eq!(models.models[1].kind, "first_above");
    }
}
