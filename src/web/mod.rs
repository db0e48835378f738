// Web server: Axum-based prediction API.
//
// Routes:
//   GET  /health       artifact load state
//   POST /predict      form field `news_text`
//   POST /api/predict  JSON body {"text": ...}
//
// The Predictor is built once before the server starts and shared through
// AppState. Handlers never mutate it.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::inference::Predictor;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(predictor: Predictor, port: u16, bind: &str) -> Result<()> {
    if !predictor.is_ready() {
        tracing::warn!("Serving without a complete model; every prediction will return an Error label");
    }

    let state = AppState {
        predictor: Arc::new(predictor),
    };
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("newscheck listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(handlers::predict::predict_form))
        .route("/api/predict", post(handlers::predict::predict_json))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health: always 200; the body says which artifacts are loaded.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.predictor.health())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::features::tfidf::{TfidfParams, TfidfVectorizer};
    use crate::model::logistic::LogisticRegression;

    fn unloaded_router() -> Router {
        build_router(AppState {
            predictor: Arc::new(Predictor::unloaded()),
        })
    }

    fn loaded_router() -> Router {
        let params = TfidfParams {
            max_features: None,
            ngram_range: (1, 1),
            min_df: 1,
            max_df: 1.0,
        };
        let vectorizer = TfidfVectorizer::fit(&["miracle cure", "senate vote"], params).unwrap();
        // vocabulary: cure, miracle, senate, vote
        let classifier = LogisticRegression::from_weights(vec![2.0, 2.0, -2.0, -2.0], 0.0);
        build_router(AppState {
            predictor: Arc::new(Predictor::new(
                Some(Arc::new(vectorizer)),
                Some(Arc::new(classifier)),
            )),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_unloaded() {
        let response = unloaded_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "status": "OK",
                "model": "not loaded",
                "vectorizer": "not loaded",
            })
        );
    }

    #[tokio::test]
    async fn test_api_predict_unloaded_is_error_label() {
        let response = unloaded_router()
            .oneshot(json_request("/api/predict", serde_json::json!({ "text": "Miracle cure" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["label"], "Error");
        assert_eq!(json["probability"], 0.0);
        assert_eq!(json["input_length"], 12);
    }

    #[tokio::test]
    async fn test_api_predict_non_string_text_is_blank() {
        let response = loaded_router()
            .oneshot(json_request("/api/predict", serde_json::json!({ "text": 42 })))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["label"], "Error");
        assert_eq!(json["error"], "please enter text to analyze");
        assert_eq!(json["input_length"], 0);
    }

    #[tokio::test]
    async fn test_form_predict_scores_text() {
        let request = Request::post("/predict")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("news_text=Shocking+miracle+cure"))
            .unwrap();
        let response = loaded_router().oneshot(request).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["label"], "Fake");
        let p = json["probability"].as_f64().unwrap();
        assert!(p > 0.5 && p <= 1.0);
        assert_eq!(json["input_preview"], "Shocking miracle cure");
    }

    #[tokio::test]
    async fn test_malformed_json_is_error_label_with_ok_status() {
        let request = Request::post("/api/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "#))
            .unwrap();
        let response = loaded_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["label"], "Error");
        assert_eq!(json["probability"], 0.0);
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert_eq!(json["input_length"], 0);
    }

    #[tokio::test]
    async fn test_json_without_content_type_is_error_label() {
        let request = Request::post("/api/predict")
            .body(Body::from(r#"{"text": "Miracle cure"}"#))
            .unwrap();
        let response = loaded_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["label"], "Error");
    }

    #[tokio::test]
    async fn test_form_without_content_type_is_error_label() {
        let request = Request::post("/predict")
            .body(Body::from("news_text=Miracle+cure"))
            .unwrap();
        let response = loaded_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["label"], "Error");
        assert_eq!(json["input_preview"], "");
    }

    #[tokio::test]
    async fn test_long_input_preview_is_truncated() {
        let text = "senate ".repeat(100);
        let response = loaded_router()
            .oneshot(json_request("/api/predict", serde_json::json!({ "text": text })))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["input_length"], 700);
        assert_eq!(
            json["input_preview"].as_str().unwrap().chars().count(),
            handlers::predict::PREVIEW_CHARS + 3
        );
        assert_eq!(json["label"], "Real");
    }
}
