//! JSON-over-HTTP backend

use super::types::{
    CompareRequest, CompareResponse, ExtractRequest, ExtractResponse, GenerateRequest,
    GenerateResponse, PersonalitiesResponse,
};
use super::{Backend, BackendError};
use crate::catalog::Personality;
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Backend reached over HTTP at a base URL.
///
/// The client has no request timeout; a hung call keeps its flow (and the
/// request gate) waiting.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

/// Minimal body the backend sends alongside a 5xx
#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)] // Only its presence is checked
    error: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(StatusCode, String), BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::transport(format!("Failed to read response: {e}")))?;

        Ok((status, body))
    }

    /// POST where the backend may report `{error}` with a failure status.
    ///
    /// Any body carrying an `error` field is handed back for the caller to
    /// classify; only an unreadable failure body becomes a status error.
    async fn post_reporting<Req, Resp>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp, BackendError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let (status, body) = self
            .execute(self.client.post(self.url(path)).json(request))
            .await?;

        if !status.is_success() && serde_json::from_str::<ErrorBody>(&body).is_err() {
            return Err(BackendError::status(status.as_u16(), body));
        }

        parse_body(&body)
    }

    /// POST where any failure status carries a plain-text body.
    async fn post_strict<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let (status, body) = self
            .execute(self.client.post(self.url(path)).json(request))
            .await?;

        if !status.is_success() {
            return Err(BackendError::status(status.as_u16(), body));
        }

        parse_body(&body)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body)
        .map_err(|e| BackendError::decode(format!("Failed to parse response: {e}")))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn personalities(&self) -> Result<Vec<Personality>, BackendError> {
        let (status, body) = self
            .execute(self.client.get(self.url("personalities")))
            .await?;

        if !status.is_success() {
            return Err(BackendError::status(status.as_u16(), body));
        }

        let parsed: PersonalitiesResponse = parse_body(&body)?;
        Ok(parsed.personalities)
    }

    async fn generate_response(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, BackendError> {
        self.post_reporting("generate_response", request).await
    }

    async fn extract_memory(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError> {
        self.post_reporting("extract_memory", request).await
    }

    async fn compare_personalities(
        &self,
        request: &CompareRequest,
    ) -> Result<CompareResponse, BackendError> {
        self.post_strict("compare_personalities", request).await
    }
}
