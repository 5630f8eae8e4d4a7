use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::ChainSealError;
use crate::service::NotaryService;
use crate::types::{AnchorReference, VerificationVerdict};

/// API State
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<NotaryService>,
}

/// Response for verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub reference: String,
    pub valid: bool,
    pub recorded_fingerprint: String,
    pub recomputed_fingerprint: String,
    pub timestamp: String,
}

impl From<VerificationVerdict> for VerifyResponse {
    fn from(verdict: VerificationVerdict) -> Self {
        Self {
            reference: verdict.reference.as_str().to_string(),
            valid: verdict.valid,
            recorded_fingerprint: verdict.recorded_fingerprint,
            recomputed_fingerprint: verdict.recomputed_fingerprint.as_hex().to_string(),
            timestamp: verdict.timestamp.to_rfc3339(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub network: String,
}

/// Create REST API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/verify/:reference", post(verify_document))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        network: state.service.network().name().to_string(),
    })
}

/// Verify endpoint: the raw candidate bytes are the request body
async fn verify_document(
    State(state): State<ApiState>,
    Path(reference): Path<String>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, AppError> {
    info!("API: verifying {} bytes against {}", body.len(), reference);

    let reference = AnchorReference::new(reference);
    let verdict = state
        .service
        .verify(body.to_vec(), &reference)
        .await
        .map_err(AppError)?;

    Ok(Json(verdict.into()))
}

/// API error wrapper keeping "reference doesn't exist" apart from
/// "service is down"
pub struct AppError(ChainSealError);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ChainSealError::Input(_) => StatusCode::BAD_REQUEST,
            ChainSealError::InvalidReference { .. } => StatusCode::NOT_FOUND,
            ChainSealError::LedgerService(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
