// Reflection request/response types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::reflection::error::ReflectError;

/// The four reflection flavors the service knows how to prompt for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionKind {
    DreamReflection,
    WeeklyReflection,
    PersonalizedPrompt,
    GroundingExercise,
}

impl ReflectionKind {
    pub const ALL: [ReflectionKind; 4] = [
        ReflectionKind::DreamReflection,
        ReflectionKind::WeeklyReflection,
        ReflectionKind::PersonalizedPrompt,
        ReflectionKind::GroundingExercise,
    ];

    /// Wire tag used in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionKind::DreamReflection => "dream_reflection",
            ReflectionKind::WeeklyReflection => "weekly_reflection",
            ReflectionKind::PersonalizedPrompt => "personalized_prompt",
            ReflectionKind::GroundingExercise => "grounding_exercise",
        }
    }
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReflectionKind {
    type Err = ReflectError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ReflectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ReflectError::UnknownRequestType(tag.to_string()))
    }
}

/// Incoming request body: `{ type, content, context? }`
///
/// `type` stays a plain string here so an unrecognized tag is reported by
/// `ReflectionService::reflect` rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflectionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub context: Option<ReflectionContext>,
}

impl ReflectionRequest {
    pub fn new(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: ReflectionContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Optional type-specific details merged into the user prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReflectionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<Vec<String>>,
}

impl ReflectionContext {
    /// Symbols, or None when absent or empty
    pub fn symbols(&self) -> Option<&[String]> {
        non_empty_list(&self.symbols)
    }

    pub fn mood(&self) -> Option<&str> {
        self.mood
            .as_deref()
            .map(str::trim)
            .filter(|mood| !mood.is_empty())
    }

    pub fn emotions(&self) -> Option<&[String]> {
        non_empty_list(&self.emotions)
    }
}

fn non_empty_list(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|items| !items.is_empty())
}

/// System/user prompt pair sent upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Successful response body: `{ reflection }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub reflection: String,
}
