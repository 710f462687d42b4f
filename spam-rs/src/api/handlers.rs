//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

use crate::spam::{RawEmail, SpamClassifier};

/// Shared application state
pub struct AppState {
    pub classifier: SpamClassifier,
}

/// Prediction request body; absent fields are empty
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

impl From<PredictRequest> for RawEmail {
    fn from(req: PredictRequest) -> Self {
        RawEmail::new(req.subject, req.body)
    }
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Width of the feature rows the loaded classifier expects
    pub features: usize,
}

/// POST /predict - Classify one email
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected prediction request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("Request body must be a JSON object")),
            )
                .into_response();
        }
    };

    let email = RawEmail::from(req);
    match state.classifier.classify(&email) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(e) => {
            error!("Prediction failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Prediction failed")),
            )
                .into_response()
        }
    }
}

/// GET /health - Liveness and loaded model shape
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: state.classifier.row_width(),
    })
}
