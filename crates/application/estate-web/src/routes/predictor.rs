use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use estate_core::PredictionResult;
use estate_predictor::{FormInput, FormSpec};

use crate::routes::{page, View};
use crate::{AppState, WebError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/predictor", get(predictor_page).post(predict))
}

#[derive(Template)]
#[template(path = "predictor.html")]
struct PredictorTemplate<'a> {
    form: &'a FormSpec,
    result: Option<PredictionResult>,
    error: Option<String>,
}

async fn predictor_page(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, WebError> {
    let form = FormSpec::build(state.predictor.choices(), None);
    let content = PredictorTemplate {
        form: &form,
        result: None,
        error: None,
    }
    .render()?;
    Ok(page(&headers, View::Predictor, content)?.into_response())
}

async fn predict(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Form(input): Form<FormInput>,
) -> Result<Response, WebError> {
    let form = FormSpec::build(state.predictor.choices(), Some(&input));

    let (status, result, error) = match state.predictor.predict(&input) {
        Ok(result) => (StatusCode::OK, Some(result), None),
        Err(e) => {
            tracing::warn!(error = %e, city = %input.city, "prediction failed");
            (StatusCode::UNPROCESSABLE_ENTITY, None, Some(e.to_string()))
        }
    };

    let content = PredictorTemplate {
        form: &form,
        result,
        error,
    }
    .render()?;
    Ok((status, page(&headers, View::Predictor, content)?).into_response())
}
