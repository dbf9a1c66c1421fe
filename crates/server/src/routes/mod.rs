mod answers;
mod health;

use axum::{
    Router,
    routing::{get, post},
};

/// Build the API routes
pub fn api_routes() -> Router {
    Router::new()
        .route("/", get(health::check))
        .route("/answers", post(answers::create))
}
