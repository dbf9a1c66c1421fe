//! Health check endpoint

use axum::{Json, response::IntoResponse};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    message: String,
    status: String,
}

/// GET / - Report that the API is up
pub async fn check() -> impl IntoResponse {
    Json(HealthResponse {
        message: "Pharmacy Prior Authorization API is running".to_string(),
        status: "healthy".to_string(),
    })
}
