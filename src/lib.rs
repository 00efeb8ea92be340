//! Contact form submission endpoint.
//!
//! One POST route takes the site's contact form, rate limits it per caller,
//! validates it and inserts the inquiry into the hosted database. `/health`
//! and `/metrics` sit alongside for the platform.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
    },
    response::Response,
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod client_ip;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod store;
pub mod validation;

use handlers::{SUBMIT_PATH, health_handler, metrics_handler, preflight_handler, submit_handler};
use state::AppState;

pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked, answering with a generic error");
    error::unexpected_error()
}

// Router with the cross-origin headers on every response, panics included.
// Bodies over the limit reach the submit handler as a rejection it answers itself.
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(SUBMIT_PATH, post(submit_handler).options(preflight_handler))
        .layer(body_limit)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                ))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(state)
}
