use crate::errors::AppError;
use crate::grid::{build_grid, week_start_date, Grid, GridView, MAX_WEEKS};
use crate::insights::{chat_error_message, chat_prompt, events_prompt, parse_major_events};
use crate::life::{
    compute_life_statistics, now_at_offset, parse_birth, LifeStatistics, PlanningHorizon,
    MAX_EXPECTANCY_YEARS,
};
use crate::models::{
    ApiKeyRequest, AppData, ChatMessage, ChatRequest, EventsResponse, GridQuery, LifeRequest,
    NoteQuery, NoteRequest, NoteResponse, NotesResponse, PreferencesResponse,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::{pick_reflection, render_index};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Datelike;
use tracing::{debug, error};

const MAX_NOTE_CHARS: usize = 2_000;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dark_mode = state.data.lock().await.dark_mode;
    Html(render_index(dark_mode, pick_reflection()))
}

pub async fn life_statistics(
    State(state): State<AppState>,
    Json(payload): Json<LifeRequest>,
) -> Result<Json<LifeStatistics>, AppError> {
    let stats = statistics_for(&state, &payload.birth, payload.expectancy)?;
    Ok(Json(stats))
}

pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<Grid>, AppError> {
    let view = query.view.as_deref().unwrap_or("weeks").parse::<GridView>()?;
    let stats = statistics_for(&state, &query.birth, query.expectancy)?;
    let data = state.data.lock().await;
    Ok(Json(build_grid(&stats, view, &data.notes)))
}

pub async fn list_notes(State(state): State<AppState>) -> Json<NotesResponse> {
    let data = state.data.lock().await;
    Json(NotesResponse {
        notes: data.notes.clone(),
    })
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(week): Path<u32>,
    Query(query): Query<NoteQuery>,
) -> Result<Json<NoteResponse>, AppError> {
    check_week(week)?;
    let starts_on = match query.birth.as_deref() {
        Some(birth) => Some(
            week_start_date(parse_birth(birth)?, week)
                .ok_or_else(|| AppError::bad_request("week start is out of range"))?,
        ),
        None => None,
    };
    let data = state.data.lock().await;
    Ok(Json(NoteResponse {
        week,
        starts_on,
        note: data.notes.get(&week).cloned().unwrap_or_default(),
    }))
}

/// Saves a week's note; a blank note removes it.
pub async fn save_note(
    State(state): State<AppState>,
    Path(week): Path<u32>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<NoteResponse>, AppError> {
    check_week(week)?;
    if payload.note.chars().count() > MAX_NOTE_CHARS {
        return Err(AppError::bad_request(format!(
            "note must be at most {MAX_NOTE_CHARS} characters"
        )));
    }

    let mut data = state.data.lock().await;
    if payload.note.trim().is_empty() {
        data.notes.remove(&week);
    } else {
        data.notes.insert(week, payload.note.clone());
    }
    persist_data(&state.config.data_path, &data).await?;

    Ok(Json(NoteResponse {
        week,
        starts_on: None,
        note: data.notes.get(&week).cloned().unwrap_or_default(),
    }))
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<PreferencesResponse> {
    let data = state.data.lock().await;
    Json(preferences(&state, &data))
}

pub async fn toggle_dark_mode(
    State(state): State<AppState>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.dark_mode = !data.dark_mode;
    persist_data(&state.config.data_path, &data).await?;
    Ok(Json(preferences(&state, &data)))
}

pub async fn save_api_key(
    State(state): State<AppState>,
    Json(payload): Json<ApiKeyRequest>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let key = payload.api_key.trim();
    if key.is_empty() {
        return Err(AppError::bad_request("api_key must not be empty"));
    }

    let mut data = state.data.lock().await;
    data.api_key = Some(key.to_owned());
    persist_data(&state.config.data_path, &data).await?;
    Ok(Json(preferences(&state, &data)))
}

pub async fn delete_api_key(
    State(state): State<AppState>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.api_key = None;
    persist_data(&state.config.data_path, &data).await?;
    Ok(Json(preferences(&state, &data)))
}

pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::bad_request("question must not be empty"));
    }

    let api_key = resolve_api_key(&state).await.ok_or_else(|| AppError::bad_request("API key required"))?;
    let stats = match (payload.birth.as_deref(), payload.expectancy) {
        (Some(birth), Some(expectancy)) => Some(statistics_for(&state, birth, expectancy)?),
        _ => None,
    };

    let prompt = chat_prompt(stats.as_ref(), question);
    let content = match state.gemini.generate(&api_key, &prompt).await {
        Ok(text) => text,
        Err(err) => {
            error!("chat request failed: {err}");
            chat_error_message(&err.to_string())
        }
    };

    Ok(Json(ChatMessage {
        role: "assistant".to_owned(),
        content,
    }))
}

/// Five notable events since birth. Failures degrade to an empty list.
pub async fn major_events(
    State(state): State<AppState>,
    Json(payload): Json<LifeRequest>,
) -> Result<Json<EventsResponse>, AppError> {
    let stats = statistics_for(&state, &payload.birth, payload.expectancy)?;
    let Some(api_key) = resolve_api_key(&state).await else {
        debug!("no API key configured, skipping major events");
        return Ok(Json(EventsResponse { events: Vec::new() }));
    };

    let now = now_at_offset(state.config.utc_offset);
    let prompt = events_prompt(stats.birth.year(), now.year());
    let events = match state.gemini.generate(&api_key, &prompt).await {
        Ok(text) => parse_major_events(&text).unwrap_or_else(|err| {
            error!("failed to parse major events: {err}");
            Vec::new()
        }),
        Err(err) => {
            error!("failed to fetch major events: {err}");
            Vec::new()
        }
    };

    Ok(Json(EventsResponse { events }))
}

fn statistics_for(
    state: &AppState,
    birth: &str,
    expectancy: u32,
) -> Result<LifeStatistics, AppError> {
    let birth = parse_birth(birth)?;
    if expectancy > MAX_EXPECTANCY_YEARS {
        return Err(AppError::bad_request(format!(
            "life expectancy must be between 1 and {MAX_EXPECTANCY_YEARS} years"
        )));
    }
    let horizon = PlanningHorizon::new(expectancy)?;

    let now = now_at_offset(state.config.utc_offset);
    if birth > now {
        return Err(AppError::bad_request("birth date cannot be in the future"));
    }

    let stats = compute_life_statistics(birth, horizon, now);
    debug!(
        weeks_lived = stats.weeks_lived,
        total_weeks = stats.total_weeks,
        "computed life statistics"
    );
    Ok(stats)
}

fn check_week(week: u32) -> Result<(), AppError> {
    if week >= MAX_WEEKS {
        return Err(AppError::bad_request(format!(
            "week must be below {MAX_WEEKS}"
        )));
    }
    Ok(())
}

/// The configured key wins over one the user saved.
async fn resolve_api_key(state: &AppState) -> Option<String> {
    if let Some(key) = state.config.gemini_api_key.clone() {
        return Some(key);
    }
    state
        .data
        .lock()
        .await
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
}

fn preferences(state: &AppState, data: &AppData) -> PreferencesResponse {
    PreferencesResponse {
        dark_mode: data.dark_mode,
        has_api_key: state.config.gemini_api_key.is_some() || data.api_key.is_some(),
    }
}
