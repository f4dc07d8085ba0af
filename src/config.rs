use crate::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use chrono::{FixedOffset, Offset, Utc};
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";
/// UTC+5:30.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub utc_offset: FixedOffset,
    pub gemini_api_key: Option<String>,
    pub gemini: GeminiConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parsed(&lookup, "PORT", DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

        let offset_minutes = parsed(&lookup, "LIFE_UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES);
        let utc_offset = fixed_offset(offset_minutes).unwrap_or_else(|| {
            warn!("LIFE_UTC_OFFSET_MINUTES={offset_minutes} is out of range, using default");
            default_offset()
        });

        let gemini = GeminiConfig {
            base_url: lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            timeout: Duration::from_secs(parsed(
                &lookup,
                "GEMINI_TIMEOUT_SECS",
                DEFAULT_TIMEOUT.as_secs(),
            )),
        };

        Self {
            port,
            data_path,
            utc_offset,
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            gemini,
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}, using {default}");
            default
        }),
        None => default,
    }
}

fn fixed_offset(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn default_offset() -> FixedOffset {
    fixed_offset(DEFAULT_UTC_OFFSET_MINUTES).unwrap_or_else(|| Utc.fix())
}
