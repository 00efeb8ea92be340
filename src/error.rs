use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;
use crate::store::StoreError;
use crate::validation::ValidationError;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const STORE_FAILED_MESSAGE: &str = "Failed to submit. Please try again.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

// Every way a submission can fail. Only validation text reaches the caller,
// the rest render a fixed message.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unreadable request body: {0}")]
    Body(#[from] BytesRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    // Label for the rejections counter
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitError::RateLimited => "rate_limited",
            SubmitError::Invalid(ValidationError::Honeypot) => "honeypot",
            SubmitError::Invalid(_) => "validation",
            SubmitError::Malformed(_) => "malformed",
            SubmitError::Body(_) => "body",
            SubmitError::Store(_) => "store",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SubmitError::Invalid(_) => StatusCode::BAD_REQUEST,
            SubmitError::Malformed(_) | SubmitError::Body(_) | SubmitError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub fn unexpected_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(UNEXPECTED_MESSAGE)),
    )
        .into_response()
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let message = match &self {
            SubmitError::RateLimited => RATE_LIMITED_MESSAGE.to_string(),
            SubmitError::Invalid(err) => err.to_string(),
            SubmitError::Malformed(_) | SubmitError::Body(_) => UNEXPECTED_MESSAGE.to_string(),
            SubmitError::Store(_) => STORE_FAILED_MESSAGE.to_string(),
        };

        (self.status(), Json(ErrorBody::new(message))).into_response()
    }
}
