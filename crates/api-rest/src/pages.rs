//! HTML page handlers.
//!
//! One handler per [`Page`] variant. A GET renders the page with untouched widgets; a POST to a
//! disease page is the button press and re-renders the form with the diagnosis banner.

use crate::html::{self, Banner};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Html};
use medpredict_core::{CoreError, Disease, FormValues, Page};
use std::collections::HashMap;

/// Renders `page` as first shown, before any interaction.
pub fn render_page(state: &AppState, page: Page) -> Html<String> {
    let content = match page {
        Page::Home => html::home_content(),
        Page::Disease(disease) => {
            let defaults = FormValues::defaults(disease).to_submission();
            html::form_content(disease, &defaults, None)
        }
    };
    Html(html::layout(page, state.cfg.background_url(), &content))
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    render_page(&state, Page::Home)
}

/// Handles a form submission for `disease`.
///
/// # Returns
/// * `200` with the diagnosis banner on success
/// * `422` with the form re-rendered and an error banner if a value fails coercion
/// * `500` with a generic failure page if the model cannot run
pub fn submit(
    state: &AppState,
    disease: Disease,
    submission: HashMap<String, String>,
) -> (StatusCode, Html<String>) {
    let page = Page::Disease(disease);
    let background = state.cfg.background_url();

    match state.predictions.predict_submission(disease, &submission) {
        Ok(prediction) => {
            let echoed = prediction.values.to_submission();
            let content = html::form_content(
                disease,
                &echoed,
                Some(Banner::Diagnosis(&prediction.diagnosis)),
            );
            (StatusCode::OK, Html(html::layout(page, background, &content)))
        }
        Err(CoreError::Form(err)) => {
            let message = err.to_string();
            let content =
                html::form_content(disease, &submission, Some(Banner::Error(&message)));
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(html::layout(page, background, &content)),
            )
        }
        Err(e) => {
            tracing::error!("Prediction error for {}: {:?}", disease, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(html::layout(page, background, &html::failure_content())),
            )
        }
    }
}
