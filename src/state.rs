use crate::config::Config;
use std::sync::Arc;

/// Shared request state. Only configuration lives here: every render reads
/// the sources fresh, so there is no cached data to share.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}
