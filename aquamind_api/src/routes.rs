use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::model::Artifacts;
use crate::types::{PredictRequest, PredictResponse};

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<Artifacts>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/predict", post(predict)).with_state(state)
}

// ---------- Errors ----------

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request body: malformed JSON, missing field, non-numeric value.
    #[error(transparent)]
    Rejection(#[from] JsonRejection),
    #[error("prediction failed: {0}")]
    Inference(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Rejection(rej) => (rej.status(), rej.body_text()),
            ApiError::Inference(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

// ---------- Handler ----------

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    // Shape errors surface here, before the scaler is reached.
    let Json(req) = payload?;

    let pred = state
        .artifacts
        .predict(&req.features())
        .map_err(ApiError::Inference)?;

    Ok(Json(PredictResponse {
        predicted_moisture: round3(pred),
    }))
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
