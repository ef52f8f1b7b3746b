use crate::chart::render_svg;
use crate::config::ChartProfile;
use crate::errors::AppError;
use crate::models::{PeriodsResponse, WindowPoint, WindowsResponse};
use crate::reader::read_periods;
use crate::state::AppState;
use crate::transform::{max_scale, smooth_profile, windows};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

/// Turn the transform output into the (minute, value) series the chart
/// draws, per the selected profile. The two representations are alternatives
/// and never mixed.
fn chart_series(profile: ChartProfile, points: &[WindowPoint]) -> Vec<(f64, f64)> {
    match profile {
        ChartProfile::Discrete => points
            .iter()
            .map(|point| (point.minute as f64, point.value as f64))
            .collect(),
        ChartProfile::Smooth => smooth_profile(points)
            .into_iter()
            .enumerate()
            .map(|(minute, value)| (minute as f64, value))
            .collect(),
    }
}

async fn render_chart(state: &AppState, profile: ChartProfile) -> String {
    let (periods, _) = read_periods(&state.config).await;
    let points = windows(&periods);
    let scale = max_scale(&points);
    render_svg(&chart_series(profile, &points), scale)
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (periods, source) = read_periods(&state.config).await;
    let points = windows(&periods);
    let scale = max_scale(&points);
    let svg = render_svg(&chart_series(state.config.profile, &points), scale);
    Html(render_index(&svg, source, scale, state.config.profile, &periods))
}

pub async fn get_periods(State(state): State<AppState>) -> Json<PeriodsResponse> {
    let (periods, source) = read_periods(&state.config).await;
    Json(PeriodsResponse {
        source,
        periods: periods.to_vec(),
    })
}

pub async fn get_windows(State(state): State<AppState>) -> Json<WindowsResponse> {
    let (periods, source) = read_periods(&state.config).await;
    let points = windows(&periods);
    let scale = max_scale(&points);
    Json(WindowsResponse {
        source,
        max_scale: scale,
        windows: points,
    })
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    profile: Option<String>,
}

pub async fn chart_svg(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, AppError> {
    let profile = match query.profile.as_deref() {
        Some(value) => ChartProfile::parse(value)
            .ok_or_else(|| AppError::bad_request("profile must be 'discrete' or 'smooth'"))?,
        None => state.config.profile,
    };

    let svg = render_chart(&state, profile).await;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
