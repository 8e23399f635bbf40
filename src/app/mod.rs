//! App layer - screen state machines and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod actor;
pub mod commands;
pub mod context;
pub mod form;
pub mod state;

pub use actor::AppActor;
pub use context::AppContext;
pub use state::AppState;
