// reqwest-backed transport for the chat-completion gateway
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use super::{ChatCompletionRequest, CompletionTransport, TransportError, UpstreamResponse};
use crate::config::UpstreamConfig;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Build a transport for `endpoint`. `timeout` bounds the whole exchange.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, TransportError> {
        Self::new(&config.endpoint, config.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(
        &self,
        credential: &str,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", credential))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        Ok(UpstreamResponse { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        // Strip the URL so logs stay readable; the endpoint is logged separately.
        TransportError::Request(err.without_url().to_string())
    }
}
