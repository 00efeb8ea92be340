use axum::{Json, response::IntoResponse};

// Liveness probe for the hosting platform
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
