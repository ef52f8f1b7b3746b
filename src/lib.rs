pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reader;
pub mod state;
pub mod storage;
pub mod transform;
pub mod ui;
pub mod watch;

pub use app::router;
pub use config::Config;
pub use state::AppState;
