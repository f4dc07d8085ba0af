use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<AppData>>,
    pub gemini: GeminiClient,
}

impl AppState {
    pub fn new(config: Config, data: AppData, gemini: GeminiClient) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
            gemini,
        }
    }
}
