use momentum_chart::watch::{poll_sources, Debouncer, DEFAULT_DEBOUNCE};
use momentum_chart::{reader, transform, AppState, Config};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Arc::new(Config::from_env());
    let state = AppState::new(Arc::clone(&config));

    // Watch the source files and refresh the pipeline when they settle.
    // HTTP reads stay fresh per request; this keeps the log telling the
    // story of what the chart currently shows.
    let watcher_config = Arc::clone(&config);
    let debouncer = Debouncer::spawn(DEFAULT_DEBOUNCE, move || {
        let config = Arc::clone(&watcher_config);
        async move {
            let (periods, source) = reader::read_periods(&config).await;
            let points = transform::windows(&periods);
            let scale = transform::max_scale(&points);
            info!(?source, max_scale = scale, "sources changed, momentum refreshed");
        }
    });
    tokio::spawn(poll_sources(
        vec![config.store_path.clone(), config.panel_path.clone()],
        Duration::from_millis(500),
        debouncer,
    ));

    let app = momentum_chart::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
