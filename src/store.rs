//! Persistence for accepted inquiries.
//!
//! [`RestStore`] talks to a PostgREST endpoint (the hosted database behind
//! the site) with the service role key. [`MemoryStore`] keeps records in
//! process and backs tests and `--dry-run`.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

use crate::models::Inquiry;

pub const DEFAULT_TABLE: &str = "contact_inquiries";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected insert ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("store unavailable")]
    Unavailable,
}

/// Insert-only sink for inquiries. The creation timestamp belongs to the sink.
#[async_trait]
pub trait InquiryStore: Send + Sync {
    async fn insert(&self, inquiry: &Inquiry) -> Result<(), StoreError>;
}

pub struct RestStore {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl RestStore {
    pub fn new(
        base_url: &str,
        service_key: &str,
        table: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            service_key: service_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InquiryStore for RestStore {
    async fn insert(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        let res = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(inquiry)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let body = res.text().await.unwrap_or_default();
        Err(StoreError::Rejected { status, body })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inquiries: Mutex<Vec<Inquiry>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inquiries(&self) -> Vec<Inquiry> {
        self.inquiries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // Make every following insert fail, for exercising the error path
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }
}

#[async_trait]
impl InquiryStore for MemoryStore {
    async fn insert(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable);
        }

        self.inquiries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(inquiry.clone());
        Ok(())
    }
}
