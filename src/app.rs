use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chart.svg", get(handlers::chart_svg))
        .route("/api/periods", get(handlers::get_periods))
        .route("/api/windows", get(handlers::get_windows))
        .with_state(state)
}
