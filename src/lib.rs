pub mod app;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod gemini;
pub mod grid;
pub mod handlers;
pub mod insights;
pub mod life;
pub mod models;
pub mod population;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use life::{compute_life_statistics, LifeStatistics, PlanningHorizon};
pub use population::population_at_year;
pub use state::AppState;
pub use storage::load_data;
