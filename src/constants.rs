//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the tableros API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured base URL
pub const API_URL_ENV: &str = "TABLEROS_API_URL";

/// Resource collection path, relative to the base URL
pub const TABLEROS_PATH: &str = "/tableros/";

/// Key of the tableros collection in the query store
pub const TABLEROS_KEY: &str = "tableros";

/// Records revealed per page of the list
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Attempts made for a list query before reporting failure
pub const DEFAULT_FETCH_ATTEMPTS: u32 = 2;

/// How long the splash screen stays up
pub const DEFAULT_SPLASH_MS: u64 = 1500;

/// UI poll interval, also the tick period sent to the app actor
pub const TICK_MS: u64 = 50;

/// Name of the directory under $HOME holding config and preferences
pub const CONFIG_DIR_NAME: &str = ".tableros";

/// Storage key of the persisted theme flag
pub const THEME_KEY: &str = "dark_mode";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "tableros.log";

/// Earliest accepted manufacture or installation year
pub const MIN_YEAR: i32 = 1900;

/// Application name
pub const APP_NAME: &str = "Tableros TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
