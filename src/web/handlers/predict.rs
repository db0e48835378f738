// Prediction handlers: POST /predict (HTML form) and POST /api/predict (JSON).
//
// Both hand the submitted text to the shared Predictor unchanged. Blank
// submissions and bodies that fail to parse are answered directly without
// touching the model, still as a 200 with an Error label. Inference is
// CPU-bound, so it runs on the blocking thread pool.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::inference::{PredictError, PredictionResult, Predictor};
use crate::output::truncate_chars;
use crate::web::AppState;

/// Characters of the submitted text echoed back in `input_preview`.
pub const PREVIEW_CHARS: usize = 240;

const BLANK_INPUT: &str = "please enter text to analyze";

#[derive(Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    news_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub result: PredictionResult,
    pub input_preview: String,
    /// Length of the submitted text in characters
    pub input_length: usize,
}

/// POST /predict: form field `news_text`.
pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Json<PredictResponse> {
    match form {
        Ok(Form(form)) => Json(respond(state.predictor, form.news_text.unwrap_or_default()).await),
        Err(rejection) => Json(rejected(rejection.body_text())),
    }
}

/// POST /api/predict: `{"text": ...}`. A missing or non-string `text` is
/// treated as empty.
pub async fn predict_json(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Json<PredictResponse> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return Json(rejected(rejection.body_text())),
    };
    let text = body
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    Json(respond(state.predictor, text).await)
}

/// Response for a request body that could not be read.
fn rejected(reason: String) -> PredictResponse {
    debug!(reason = %reason, "Rejected prediction request body");
    PredictResponse {
        result: PredictError::MalformedInput(reason).into(),
        input_preview: String::new(),
        input_length: 0,
    }
}

async fn respond(predictor: Arc<Predictor>, text: String) -> PredictResponse {
    let input_preview = truncate_chars(&text, PREVIEW_CHARS);
    let input_length = text.chars().count();

    let result: PredictionResult = if text.trim().is_empty() {
        PredictError::MalformedInput(BLANK_INPUT.to_string()).into()
    } else {
        match tokio::task::spawn_blocking(move || predictor.predict(&text)).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Prediction task failed");
                PredictError::InternalFailure(e.to_string()).into()
            }
        }
    };

    PredictResponse {
        result,
        input_preview,
        input_length,
    }
}
