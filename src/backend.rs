//! Backend abstraction
//!
//! The generation, extraction and comparison services are remote. This module
//! owns their request/response contract and nothing else.

mod error;
mod http;
mod types;

pub use error::{BackendError, BackendErrorKind};
pub use http::HttpBackend;
pub use types::*;

use crate::catalog::Personality;
use async_trait::async_trait;
use std::sync::Arc;

/// Endpoints the orchestrators call.
///
/// Implementations report transport, decode and HTTP-status failures as
/// [`BackendError`]. A structured `error` field in an otherwise readable body
/// is returned inside the response type for the caller to classify.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn personalities(&self) -> Result<Vec<Personality>, BackendError>;

    async fn generate_response(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, BackendError>;

    async fn extract_memory(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError>;

    async fn compare_personalities(
        &self,
        request: &CompareRequest,
    ) -> Result<CompareResponse, BackendError>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn personalities(&self) -> Result<Vec<Personality>, BackendError> {
        (**self).personalities().await
    }

    async fn generate_response(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        (**self).generate_response(request).await
    }

    async fn extract_memory(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError> {
        (**self).extract_memory(request).await
    }

    async fn compare_personalities(
        &self,
        request: &CompareRequest,
    ) -> Result<CompareResponse, BackendError> {
        (**self).compare_personalities(request).await
    }
}

/// Logging wrapper for backends
pub struct LoggingBackend<B> {
    inner: B,
}

impl<B: Backend> LoggingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    fn log<T>(endpoint: &str, start: std::time::Instant, result: &Result<T, BackendError>) {
        let duration = start.elapsed();
        match result {
            Ok(_) => {
                tracing::info!(
                    endpoint,
                    duration_ms = %duration.as_millis(),
                    "Backend request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint,
                    duration_ms = %duration.as_millis(),
                    status = ?e.kind.status_code(),
                    error = %e.message,
                    "Backend request failed"
                );
            }
        }
    }
}

#[async_trait]
impl<B: Backend> Backend for LoggingBackend<B> {
    async fn personalities(&self) -> Result<Vec<Personality>, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.personalities().await;
        Self::log("personalities", start, &result);
        result
    }

    async fn generate_response(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate_response(request).await;
        Self::log("generate_response", start, &result);
        result
    }

    async fn extract_memory(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.extract_memory(request).await;
        Self::log("extract_memory", start, &result);
        result
    }

    async fn compare_personalities(
        &self,
        request: &CompareRequest,
    ) -> Result<CompareResponse, BackendError> {
        let start = std::time::Instant::now();
        let result = self.inner.compare_personalities(request).await;
        Self::log("compare_personalities", start, &result);
        result
    }
}
