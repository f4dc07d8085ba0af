use crate::insights::MajorEvent;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the app keeps between restarts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppData {
    pub notes: BTreeMap<u32, String>,
    pub dark_mode: bool,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LifeRequest {
    pub birth: String,
    pub expectancy: u32,
}

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    pub birth: String,
    pub expectancy: u32,
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteQuery {
    pub birth: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub week: u32,
    pub starts_on: Option<NaiveDateTime>,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: BTreeMap<u32, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub dark_mode: bool,
    pub has_api_key: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub birth: Option<String>,
    pub expectancy: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<MajorEvent>,
}
