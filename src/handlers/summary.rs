// handlers/summary.rs - POST /summaries/weekly handler

use axum::{body::Bytes, extract::rejection::BytesRejection, response::Json};
use chrono::FixedOffset;
use serde::Deserialize;

use crate::error::ApiError;
use crate::summary::{compose_weekly_summary, JournalEntry, MoodLog, WeeklySummary};

#[derive(Debug, Default, Deserialize)]
pub struct WeeklySummaryRequest {
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub mood_logs: Vec<MoodLog>,
    /// Writer's zone as minutes east of UTC; entry dates default to UTC
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl WeeklySummaryRequest {
    fn offset(&self) -> Option<FixedOffset> {
        let minutes = self.utc_offset_minutes.unwrap_or(0);
        FixedOffset::east_opt(minutes.checked_mul(60)?)
    }
}

/// Compose the week text a client sends back as `weekly_reflection` content
pub async fn weekly_summary(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<WeeklySummary>, ApiError> {
    let body = body?;
    let request: WeeklySummaryRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected unparseable weekly summary request");
        ApiError::bad_request("Invalid request body")
    })?;

    let offset = request.offset().ok_or_else(|| {
        tracing::warn!(minutes = ?request.utc_offset_minutes, "Rejected out-of-range UTC offset");
        ApiError::bad_request("Invalid utc_offset_minutes")
    })?;

    tracing::debug!(
        entries = request.entries.len(),
        mood_logs = request.mood_logs.len(),
        "Composing weekly summary"
    );

    Ok(Json(compose_weekly_summary(
        &request.entries,
        &request.mood_logs,
        offset,
    )))
}
