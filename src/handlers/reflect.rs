// handlers/reflect.rs - POST /gentle-ai handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Json,
};

use crate::error::ApiError;
use crate::reflection::{Reflection, ReflectError, ReflectionRequest};
use crate::AppState;

/**
 * POST /gentle-ai - Request a gentle reflection
 *
 * Expected Input:
 * ```json
 * {
 *   "type": "dream_reflection",   // or weekly_reflection, personalized_prompt, grounding_exercise
 *   "content": "string",
 *   "context": { "symbols": ["Water"], "mood": "calm", "emotions": ["hopeful"] }   // optional
 * }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * { "reflection": "..." }
 * ```
 *
 * Failures are `{ "error": "..." }` at 400, 402, 413, 429 or 500.
 *
 * The body is decoded regardless of content type.
 */
pub async fn reflect(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Reflection>, ApiError> {
    let body = body?;
    let request: ReflectionRequest = serde_json::from_slice(&body)
        .map_err(|e| ReflectError::InvalidBody(e.to_string()))
        .map_err(rejected)?;

    let reflection = state
        .reflections
        .reflect(&request)
        .await
        .map_err(rejected)?;

    Ok(Json(reflection))
}

fn rejected(err: ReflectError) -> ApiError {
    if err.is_pre_flight() {
        tracing::warn!(error = %err, "Reflection request rejected before upstream call");
    }
    ApiError::from(err)
}
