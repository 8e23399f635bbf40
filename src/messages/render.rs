//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};

use crate::app::form::TableroForm;
use crate::app::state::{ListStatus, Modal};
use crate::messages::ui_events::{InputMode, Screen};
use crate::models::{Estado, Tablero};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub screen: Screen,
    pub dark_mode: bool,
    pub api_base_url: String,
    pub splash_progress: u16,

    // List
    pub rows: Vec<Tablero>,
    pub filtered_len: usize,
    pub total_len: usize,
    pub has_more: bool,
    pub selected: usize,
    pub search: String,
    pub year_filter: Option<i32>,
    pub input_mode: InputMode,
    pub list_status: ListStatus,
    pub last_fetched: Option<DateTime<Utc>>,

    // Home summary
    pub estado_counts: Vec<(Estado, usize)>,

    // Create / edit
    pub form: TableroForm,

    // Popups
    pub modal: Option<Modal>,
    pub show_help: bool,
}
