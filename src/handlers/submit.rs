use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::client_ip::client_identity;
use crate::error::SubmitError;
use crate::metrics::{RATE_LIMIT_ENTRIES, REJECTIONS, REQUEST_LATENCY, REQUEST_TOTAL, SUBMISSIONS_ACCEPTED};
use crate::models::{ContactForm, SubmitSuccess};
use crate::state::AppState;
use crate::validation::{ValidationError, validate};

pub const SUBMIT_PATH: &str = "/submit-contact";

// Browser cross-origin check, answered before anything else runs
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let client = client_identity(&headers);
    info!(client = %client, "Contact form submission received");

    let response = match submit(&state, &client, body).await {
        Ok(()) => {
            SUBMISSIONS_ACCEPTED.inc();
            info!(client = %client, "Contact form submitted");
            (StatusCode::OK, Json(SubmitSuccess::sent())).into_response()
        }
        Err(err) => {
            log_rejection(&client, &err);
            REJECTIONS.with_label_values(&[err.reason()]).inc();
            err.into_response()
        }
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    response
}

// Rate limit, decode, validate, persist - stops at the first failure.
// A body that could not be read still uses up quota.
async fn submit(
    state: &AppState,
    client: &str,
    body: Result<Bytes, BytesRejection>,
) -> Result<(), SubmitError> {
    let allowed = state.rate_limiter.check(client);
    RATE_LIMIT_ENTRIES.set(state.rate_limiter.len() as f64);
    if !allowed {
        return Err(SubmitError::RateLimited);
    }

    let form = ContactForm::from_json(&body?)?;
    let inquiry = validate(&form)?;

    state.store.insert(&inquiry).await?;
    Ok(())
}

fn log_rejection(client: &str, err: &SubmitError) {
    match err {
        SubmitError::RateLimited => warn!(client = %client, "Rate limit exceeded"),
        SubmitError::Invalid(ValidationError::Honeypot) => {
            warn!(client = %client, "Honeypot field filled, likely bot submission")
        }
        SubmitError::Invalid(reason) => warn!(client = %client, %reason, "Validation failed"),
        SubmitError::Malformed(e) => error!(client = %client, "Error processing contact form: {}", e),
        SubmitError::Body(e) => error!(client = %client, "Failed to read request body: {}", e),
        SubmitError::Store(e) => error!(client = %client, "Database insert error: {}", e),
    }
}
