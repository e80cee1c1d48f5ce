// Prompt template table
//
// One entry per ReflectionKind. Each entry pairs a fixed system prompt with a
// pure render function for the user prompt, so adding a flavor means adding a row.

use crate::reflection::types::{PromptPair, ReflectionContext, ReflectionKind};

/// Feeling used by the grounding exercise when the caller sends nothing
pub const DEFAULT_FEELING: &str = "overwhelmed";

type RenderFn = fn(&str, &ReflectionContext) -> String;

pub struct Template {
    pub kind: ReflectionKind,
    pub system: &'static str,
    render: RenderFn,
}

impl Template {
    pub fn render(&self, content: &str, context: &ReflectionContext) -> PromptPair {
        PromptPair {
            system: self.system.to_string(),
            user: (self.render)(content, context),
        }
    }
}

pub static TEMPLATES: [Template; 4] = [
    Template {
        kind: ReflectionKind::DreamReflection,
        system: DREAM_SYSTEM,
        render: render_dream,
    },
    Template {
        kind: ReflectionKind::WeeklyReflection,
        system: WEEKLY_SYSTEM,
        render: render_weekly,
    },
    Template {
        kind: ReflectionKind::PersonalizedPrompt,
        system: PROMPTS_SYSTEM,
        render: render_prompts,
    },
    Template {
        kind: ReflectionKind::GroundingExercise,
        system: GROUNDING_SYSTEM,
        render: render_grounding,
    },
];

/// Look up the template row for a kind
pub fn template_for(kind: ReflectionKind) -> &'static Template {
    // Rows are stored in ReflectionKind declaration order.
    &TEMPLATES[kind as usize]
}

/// Build the prompt pair for a request. Pure and deterministic.
pub fn build_prompt(
    kind: ReflectionKind,
    content: &str,
    context: Option<&ReflectionContext>,
) -> PromptPair {
    let empty = ReflectionContext::default();
    template_for(kind).render(content, context.unwrap_or(&empty))
}

const DREAM_SYSTEM: &str = r#"You are a gentle, compassionate dream interpreter for "dearme", a journaling app.
Speak warmly and with curiosity, like a wise friend sharing thoughts over tea.

Guidelines:
- Keep responses to 2-3 short paragraphs
- Use soft, inviting language and never clinical or frightening terms
- Offer possible meanings without being prescriptive
- Focus on emotions and personal growth themes
- Be encouraging and validating
- Always end with one gentle, open-ended question for the dreamer to reflect on"#;

const WEEKLY_SYSTEM: &str = r#"You are a gentle emotional companion for "dearme", a journaling app.
You summarize a week of emotional patterns with warmth and without judgment.

Guidelines:
- Be observational, never prescriptive
- Use phrases like "I noticed..." or "It seems like..."
- Celebrate small wins and acknowledge difficult emotions with compassion
- Never suggest the user "should" feel differently
- Keep it to 2-3 short paragraphs
- Close with an encouraging note about their self-awareness"#;

const PROMPTS_SYSTEM: &str = r#"You write personalized journaling prompts for "dearme", a gentle journaling app.
Generate exactly 3 prompts based on the user's recent emotional patterns.

Guidelines:
- Make every prompt open-ended and exploratory
- Match the emotional tone: gentle for heavy moods, celebratory for joyful ones
- Focus on self-discovery, not productivity
- Speak directly to the writer using "you"
- Keep each prompt to 1-2 sentences"#;

const GROUNDING_SYSTEM: &str = r#"You are a calm, soothing voice guiding someone through a brief grounding exercise.
This is the comfort mode of "dearme", a gentle journaling app.

Guidelines:
- Use 3-4 steps at most
- Write in the present tense with soft, reassuring language
- Focus on breath, body, and the immediate senses
- Format the steps as a simple numbered list"#;

fn render_dream(content: &str, context: &ReflectionContext) -> String {
    let mut lines = vec![
        "Please offer a gentle reflection on this dream:".to_string(),
        String::new(),
        format!("Dream: {}", content),
    ];
    if let Some(symbols) = context.symbols() {
        lines.push(format!("Symbols noticed: {}", symbols.join(", ")));
    }
    if let Some(mood) = context.mood() {
        lines.push(format!("Dreamer's mood upon waking: {}", mood));
    }
    lines.join("\n")
}

fn render_weekly(content: &str, _context: &ReflectionContext) -> String {
    format!(
        "Please provide a gentle weekly reflection based on these journal entries and moods:\n\n\
         {}\n\n\
         Focus on patterns and growth moments, and offer compassionate observations.",
        content
    )
}

fn render_prompts(content: &str, context: &ReflectionContext) -> String {
    let mut lines = vec![
        "Based on these recent moods and emotions, create 3 personalized journal prompts:"
            .to_string(),
        String::new(),
        format!("Recent moods: {}", content),
    ];
    if let Some(emotions) = context.emotions() {
        lines.push(format!("Frequent emotions: {}", emotions.join(", ")));
    }
    lines.join("\n")
}

fn render_grounding(content: &str, _context: &ReflectionContext) -> String {
    // Blank only picks the default; anything else goes in as sent
    let feeling = if content.trim().is_empty() {
        DEFAULT_FEELING
    } else {
        content
    };
    format!(
        "Create a brief, gentle grounding exercise for someone feeling {}.\n\
         Keep it simple and calming.",
        feeling
    )
}
