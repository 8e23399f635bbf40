//! # Tableros TUI
//!
//! A terminal client for an electrical panel ("tablero") inventory kept
//! behind a REST API.
//!
//! ## Features
//! - List with search, year filter and incremental loading
//! - Create, edit and delete records with client-side validation
//! - Light/dark theme persisted between runs
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod listing;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod store;
pub mod theme;
pub mod ui;
pub mod validation;

// Re-export commonly used types
pub use app::{AppActor, AppContext, AppState};
pub use config::AppConfig;
pub use listing::{compose, ListView};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{ApiResult, Estado, NewTablero, Tablero, TableroDraft, TableroId};
pub use network::{NetworkActor, TableroGateway};
pub use validation::{validate, ValidationResult};
