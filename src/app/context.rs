//! Composition-root context handed to the app actor

use crate::config::AppConfig;
use crate::storage::PreferenceStore;

pub struct AppContext {
    pub config: AppConfig,
    pub preferences: PreferenceStore,
    pub dark_mode: bool,
}

impl AppContext {
    pub fn new(config: AppConfig, preferences: PreferenceStore) -> Self {
        let dark_mode = preferences.load_dark_mode().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load theme preference");
            false
        });
        AppContext {
            config,
            preferences,
            dark_mode,
        }
    }

    /// Flip the theme and persist it. A failed write keeps the new theme
    /// for this session.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = self.preferences.save_dark_mode(self.dark_mode) {
            tracing::warn!(error = %e, "Could not save theme preference");
        }
    }
}
