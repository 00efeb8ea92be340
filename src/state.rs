use std::sync::Arc;
use crate::rate_limit::RateLimiter;
use crate::store::InquiryStore;

// Largest request body read before giving up on it
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

// app's shared state

pub struct AppState {
    pub store: Arc<dyn InquiryStore>,         // where accepted inquiries go
    pub rate_limiter: Arc<RateLimiter>,       // per-process, lives as long as the process
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn InquiryStore>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            store,
            rate_limiter,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
