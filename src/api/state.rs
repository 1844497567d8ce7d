//! API server state

use std::sync::Arc;

use crate::settings::Settings;

/// State handed to every handler. Cloned per request; the settings are shared.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Resolved service version
    pub fn version(&self) -> &str {
        self.settings.version()
    }
}
