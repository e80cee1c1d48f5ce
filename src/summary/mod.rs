// Weekly activity summary
//
// Produces the pre-aggregated week text that the weekly_reflection prompt
// expects, from journal entries and mood logs the caller already fetched.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub const EMPTY_WEEK: &str = "No journal entries or mood logs this week.";

const EXCERPT_CHARS: usize = 100;
const TOP_EMOTIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    /// Stored rows may carry `null` here
    #[serde(default)]
    pub emotions: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodLog {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub emotions: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub summary: String,
    /// False when there was nothing to reflect on
    pub has_activity: bool,
}

/// Compose the week text. Entry dates are shown in the writer's zone, given by `offset`.
pub fn compose_weekly_summary(
    entries: &[JournalEntry],
    mood_logs: &[MoodLog],
    offset: FixedOffset,
) -> WeeklySummary {
    if entries.is_empty() && mood_logs.is_empty() {
        return WeeklySummary {
            summary: EMPTY_WEEK.to_string(),
            has_activity: false,
        };
    }

    let mut summary = String::from("Weekly Journal Activity:\n\n");

    if !entries.is_empty() {
        summary.push_str("Journal Entries:\n");

        let mut newest_first: Vec<&JournalEntry> = entries.iter().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        for entry in newest_first {
            summary.push_str(&entry_line(entry, offset));
        }
    }

    if !mood_logs.is_empty() {
        summary.push_str("\nMood Logs:\n");

        let moods = tally(mood_logs.iter().filter_map(|log| non_blank(&log.mood)));
        let emotions = tally(
            mood_logs
                .iter()
                .flat_map(|log| listed(&log.emotions).iter().map(String::as_str)),
        );

        summary.push_str(&format!("Most common moods: {}\n", format_counts(&moods, moods.len())));
        summary.push_str(&format!(
            "Most felt emotions: {}\n",
            format_counts(&emotions, TOP_EMOTIONS)
        ));
    }

    WeeklySummary {
        summary,
        has_activity: true,
    }
}

fn entry_line(entry: &JournalEntry, offset: FixedOffset) -> String {
    let title = non_blank(&entry.title).unwrap_or("Untitled");
    let mood = non_blank(&entry.mood).unwrap_or("unspecified");
    let emotions = match listed(&entry.emotions) {
        [] => "none".to_string(),
        names => names.join(", "),
    };

    let mut line = format!(
        "- {}: \"{}\" - Mood: {}, Emotions: {}\n",
        entry.created_at.with_timezone(&offset).format("%b %-d"),
        title,
        mood,
        emotions
    );

    if let Some(content) = non_blank(&entry.content) {
        let excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
        line.push_str(&format!("  Excerpt: \"{}...\"\n", excerpt));
    }

    line
}

fn listed(values: &Option<Vec<String>>) -> &[String] {
    values.as_deref().unwrap_or_default()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Count occurrences, most frequent first; ties keep first-seen order
fn tally<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn format_counts(counts: &[(&str, usize)], limit: usize) -> String {
    counts
        .iter()
        .take(limit)
        .map(|(name, count)| format!("{} ({}x)", name, count))
        .collect::<Vec<_>>()
        .join(", ")
}
