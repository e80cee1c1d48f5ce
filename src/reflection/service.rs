// Reflection Request Service
use std::sync::Arc;
use uuid::Uuid;

use crate::config::UpstreamConfig;
use crate::reflection::error::ReflectError;
use crate::reflection::outcome::{classify, into_reflection};
use crate::reflection::templates::build_prompt;
use crate::reflection::types::{Reflection, ReflectionKind, ReflectionRequest};
use crate::upstream::{ChatCompletionRequest, CompletionTransport};

/// Turns a typed reflection request into one upstream completion call
///
/// Holds no mutable state; share it behind an `Arc` and call `reflect`
/// concurrently.
pub struct ReflectionService {
    credential: Option<String>,
    model: String,
    transport: Arc<dyn CompletionTransport>,
}

impl ReflectionService {
    pub fn new(config: &UpstreamConfig, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            credential: config.api_key.clone(),
            model: config.model.clone(),
            transport,
        }
    }

    /// Whether a gateway credential was supplied at construction
    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Validate the request and build the upstream payload without any I/O
    pub fn prepare(&self, request: &ReflectionRequest) -> Result<ChatCompletionRequest, ReflectError> {
        let kind: ReflectionKind = request.kind.parse()?;
        Ok(self.payload_for(kind, request))
    }

    fn payload_for(&self, kind: ReflectionKind, request: &ReflectionRequest) -> ChatCompletionRequest {
        let prompt = build_prompt(kind, &request.content, request.context.as_ref());
        ChatCompletionRequest::from_prompt(self.model.clone(), prompt)
    }

    #[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4(), kind = %request.kind))]
    pub async fn reflect(&self, request: &ReflectionRequest) -> Result<Reflection, ReflectError> {
        // Type, then credential, then prompt
        let kind: ReflectionKind = request.kind.parse()?;

        let credential = self.credential.as_deref().ok_or_else(|| {
            tracing::error!("Gateway credential is not configured");
            ReflectError::MissingCredential
        })?;

        let payload = self.payload_for(kind, request);

        let response = self
            .transport
            .send(credential, &payload)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gateway request failed");
                ReflectError::from(e)
            })?;

        tracing::debug!(status = response.status, "Gateway responded");
        into_reflection(classify(&response))
    }
}
