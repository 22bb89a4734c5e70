//! Cover letter service: the single seam between the page and the backend.
//!
//! The orchestrator only sees the `CoverLetterService` trait; the reqwest
//! implementation lives in `http`.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::submission::FormSubmission;

pub use http::HttpCoverLetterService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network response was not ok: {status}")]
    Status { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Failed to build multipart body: {0}")]
    Multipart(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Body of `GET /health`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

#[async_trait]
pub trait CoverLetterService: Send + Sync {
    /// Sends one generation request and returns the letter text.
    /// A single attempt: no retry, no timeout.
    async fn generate(&self, submission: &FormSubmission) -> Result<String, ServiceError>;

    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}
