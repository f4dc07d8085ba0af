//! Prompts sent to the language model and shaping of what comes back.

use crate::life::LifeStatistics;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const MAX_EVENTS: usize = 5;
const MAX_TITLE_CHARS: usize = 60;
const MAX_DESCRIPTION_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorEvent {
    pub year: i32,
    pub title: String,
    pub description: String,
}

pub fn chat_prompt(stats: Option<&LifeStatistics>, question: &str) -> String {
    let context = match stats {
        Some(stats) => life_context(stats),
        None => "You are a helpful assistant providing insights about life, time, and mortality."
            .to_owned(),
    };
    format!("{context}\n\nUser question: {question}")
}

fn life_context(stats: &LifeStatistics) -> String {
    let mut out = String::from(
        "\nYou are a helpful assistant providing insights about life, time, and mortality based on the user's life data.\n\nUser's Life Data:\n",
    );
    let _ = writeln!(
        out,
        "- Age: {} years, {} months, {} days",
        stats.years_lived, stats.months_lived, stats.days_lived
    );
    let _ = writeln!(
        out,
        "- Weeks lived: {} of {} ({}% lived)",
        group_thousands(stats.weeks_lived),
        group_thousands(stats.total_weeks),
        stats.percentage_lived
    );
    let _ = writeln!(out, "- Weeks remaining: {}", group_thousands(stats.weeks_remaining));
    let _ = writeln!(out, "- Heartbeats: {}", group_thousands(stats.heart_beats));
    let _ = writeln!(out, "- Breaths: {}", group_thousands(stats.breaths));
    let _ = writeln!(out, "- Birth date: {}", stats.birth.format("%-m/%-d/%Y"));
    let _ = writeln!(out, "- Life expectancy: {} years", stats.life_expectancy);
    out.push_str("\nProvide thoughtful, empathetic, and meaningful insights. Be concise but profound.\n");
    out
}

pub fn events_prompt(birth_year: i32, current_year: i32) -> String {
    format!(
        "List exactly 5 major historical events that happened between {birth_year} and {current_year}.
These should be globally significant events like major political changes, technological breakthroughs,
significant cultural moments, or major world events.

Format your response as a JSON array with exactly 5 objects, each with:
- \"year\": the year the event occurred (number)
- \"title\": a brief title (string, max 60 characters)
- \"description\": a concise description (string, max 150 characters)

Return ONLY valid JSON, no additional text. Example format:
[{{\"year\": 2001, \"title\": \"9/11 Attacks\", \"description\": \"Terrorist attacks on the World Trade Center and Pentagon\"}}, ...]"
    )
}

/// Parses the model's event list, tolerating a markdown code fence.
///
/// Keeps the first five entries, ordered by year.
pub fn parse_major_events(text: &str) -> Result<Vec<MajorEvent>, serde_json::Error> {
    let payload = strip_code_fence(text);
    let mut events: Vec<MajorEvent> = serde_json::from_str(&payload)?;
    events.truncate(MAX_EVENTS);
    events.sort_by_key(|event| event.year);
    for event in &mut events {
        clip(&mut event.title, MAX_TITLE_CHARS);
        clip(&mut event.description, MAX_DESCRIPTION_CHARS);
    }
    Ok(events)
}

fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_owned();
    }
    let without_lang = remove_marker(trimmed, "```json");
    remove_marker(&without_lang, "```").trim().to_owned()
}

/// Removes every `marker` along with one newline directly after it.
fn remove_marker(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(marker) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + marker.len()..];
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    out.push_str(rest);
    out
}

fn clip(value: &mut String, max_chars: usize) {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
}

pub fn chat_error_message(message: &str) -> String {
    format!("Error: {message}. Please check your API key and try again.")
}

/// en-US digit grouping, e.g. `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
