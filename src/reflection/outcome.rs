// Upstream response classification
//
// classify() turns a raw gateway response into an UpstreamOutcome;
// into_reflection() turns that outcome into what the caller receives.
// Status-code-to-message mapping lives nowhere else.

use crate::reflection::error::ReflectError;
use crate::reflection::types::Reflection;
use crate::upstream::{ChatCompletionResponse, UpstreamResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success(String),
    RateLimited,
    QuotaExhausted,
    Failed { status: u16, body: String },
    /// 2xx without usable completion text
    Malformed(String),
}

pub fn classify(response: &UpstreamResponse) -> UpstreamOutcome {
    match response.status {
        200..=299 => classify_success(&response.body),
        429 => UpstreamOutcome::RateLimited,
        402 => UpstreamOutcome::QuotaExhausted,
        status => UpstreamOutcome::Failed {
            status,
            body: response.body.clone(),
        },
    }
}

fn classify_success(body: &str) -> UpstreamOutcome {
    let parsed: ChatCompletionResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return UpstreamOutcome::Malformed(format!("body is not a completion: {}", e)),
    };

    match parsed.first_text() {
        Some(text) if !text.trim().is_empty() => UpstreamOutcome::Success(text.to_string()),
        Some(_) => UpstreamOutcome::Malformed("first choice has empty content".to_string()),
        None if parsed.choices.is_empty() => {
            UpstreamOutcome::Malformed("response has no choices".to_string())
        }
        None => UpstreamOutcome::Malformed("first choice has no message content".to_string()),
    }
}

/// Map an outcome to the caller-facing result, logging what the caller won't see
pub fn into_reflection(outcome: UpstreamOutcome) -> Result<Reflection, ReflectError> {
    match outcome {
        UpstreamOutcome::Success(reflection) => Ok(Reflection { reflection }),
        UpstreamOutcome::RateLimited => {
            tracing::warn!("Gateway rate limited the request");
            Err(ReflectError::RateLimited)
        }
        UpstreamOutcome::QuotaExhausted => {
            tracing::warn!("Gateway reports usage quota exhausted");
            Err(ReflectError::QuotaExhausted)
        }
        UpstreamOutcome::Failed { status, body } => {
            tracing::error!(status, body = %body, "Gateway error");
            Err(ReflectError::UpstreamFailed { status })
        }
        UpstreamOutcome::Malformed(reason) => {
            tracing::error!(reason = %reason, "Gateway returned an unusable completion");
            Err(ReflectError::MalformedUpstream(reason))
        }
    }
}
