//! Resilient client for the legal-assistant completion API.
//!
//! Every operation returns an [`ApiResult`]: transport failures, bad
//! statuses and decode failures are all classified and retried per the
//! configured policy, and nothing panics or escapes as a raw error.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::error::{ApiResult, AppError};
use crate::retry::{classify_status, with_retry};

use super::types::{
    AiRequest, AiResponse, ChatCompletionBody, DocumentAnalysisBody, HealthStatus,
};

/// The operations page-level callers depend on. Mockable seam for tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LegalAssistant: Send + Sync {
    /// Sends a legal question to the completion endpoint.
    async fn query(&self, request: &AiRequest) -> ApiResult<AiResponse>;

    /// Submits extracted document text for legal analysis.
    async fn analyze_document(&self, text: &str, filename: &str) -> ApiResult<AiResponse>;

    /// Checks remote service health.
    async fn health(&self) -> ApiResult<HealthStatus>;
}

pub struct AiClient {
    client: Client,
    config: ApiConfig,
}

impl AiClient {
    #[tracing::instrument(skip(client, config))]
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// [`LegalAssistant::query`] with caller-supplied cancellation.
    pub async fn query_with_cancel(
        &self,
        request: &AiRequest,
        cancel: &CancellationToken,
    ) -> ApiResult<AiResponse> {
        let body = ChatCompletionBody::from_request(request);
        self.post_json("Chat completion", "/chat/completions", &body, cancel)
            .await
    }

    /// [`LegalAssistant::analyze_document`] with caller-supplied cancellation.
    pub async fn analyze_document_with_cancel(
        &self,
        text: &str,
        filename: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<AiResponse> {
        let body = DocumentAnalysisBody::new(text, filename);
        self.post_json("Document analysis", "/analyze/document", &body, cancel)
            .await
    }

    /// [`LegalAssistant::health`] with caller-supplied cancellation.
    pub async fn health_with_cancel(&self, cancel: &CancellationToken) -> ApiResult<HealthStatus> {
        let url = format!("{}/health", self.config.base_url);
        debug!("GET {}...", url);

        with_retry("Health check", &self.config.retry, cancel, || {
            let client = self.client.clone();
            let url = url.clone();
            let api_key = self.config.api_key.clone();
            async move {
                let response = client
                    .get(&url)
                    .bearer_auth(&api_key)
                    .send()
                    .await
                    .map_err(transport_error)?;
                decode_response(response).await
            }
        })
        .await
    }

    async fn post_json<B, T>(
        &self,
        operation_name: &str,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> ApiResult<T>
    where
        B: Serialize + Clone,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("POST {}...", url);

        with_retry(operation_name, &self.config.retry, cancel, || {
            let client = self.client.clone();
            let url = url.clone();
            let api_key = self.config.api_key.clone();
            let body = body.clone();
            async move {
                let response = client
                    .post(&url)
                    .bearer_auth(&api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(transport_error)?;
                decode_response(response).await
            }
        })
        .await
    }
}

#[async_trait]
impl LegalAssistant for AiClient {
    #[tracing::instrument(skip(self, request))]
    async fn query(&self, request: &AiRequest) -> ApiResult<AiResponse> {
        self.query_with_cancel(request, &CancellationToken::new())
            .await
    }

    #[tracing::instrument(skip(self, text, filename))]
    async fn analyze_document(&self, text: &str, filename: &str) -> ApiResult<AiResponse> {
        self.analyze_document_with_cancel(text, filename, &CancellationToken::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn health(&self) -> ApiResult<HealthStatus> {
        self.health_with_cancel(&CancellationToken::new()).await
    }
}

/// A request that produced no response at all (connection refused, DNS
/// failure, timeout). Always worth retrying.
fn transport_error(err: reqwest::Error) -> AppError {
    AppError::network("Network request failed", true).with_details(err.to_string())
}

/// Classifies non-success statuses and decodes success bodies. Decode
/// failures on a success status are network failures, retried within the
/// remaining budget.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(classify_status(status));
    }

    response.json::<T>().await.map_err(|err| {
        AppError::network("Failed to decode response", true).with_details(err.to_string())
    })
}
