use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::upstream::{ChatCompletionRequest, CompletionTransport, TransportError, UpstreamResponse};

/// Canned reply for the scripted transport
#[derive(Debug, Clone)]
pub enum Script {
    Respond(UpstreamResponse),
    Timeout,
    Fail(String),
}

/// Test transport that replays one scripted reply and records every call
pub struct ScriptedTransport {
    script: Script,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, ChatCompletionRequest)>>,
}

impl ScriptedTransport {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(status: u16, body: &str) -> Self {
        Self::new(Script::Respond(UpstreamResponse::new(status, body)))
    }

    /// 200 with a single completion choice
    pub fn completing(text: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        });
        Self::responding(200, &body.to_string())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Credential and payload of the most recent call
    pub fn last_call(&self) -> Option<(String, ChatCompletionRequest)> {
        self.seen.lock().ok().and_then(|seen| seen.last().cloned())
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn send(
        &self,
        credential: &str,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((credential.to_string(), request.clone()));
        }

        match &self.script {
            Script::Respond(response) => Ok(response.clone()),
            Script::Timeout => Err(TransportError::Timeout),
            Script::Fail(reason) => Err(TransportError::Request(reason.clone())),
        }
    }
}
