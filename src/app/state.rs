//! App state - pure data structure with no I/O logic

use crate::app::context::AppContext;
use crate::app::form::TableroForm;
use crate::constants::TABLEROS_KEY;
use crate::listing::ListView;
use crate::messages::ui_events::{InputMode, ModalKind, Screen};
use crate::messages::RenderState;
use crate::models::{Estado, Tablero, TableroId};
use crate::store::QueryStore;

/// Lifecycle of the list screen
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    LoadingMore,
}

/// Blocking message shown over any screen
#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Info(String),
    Error(String),
    ConfirmDelete { tablero_id: TableroId, nombre: String },
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Modal::ConfirmDelete { .. } => ModalKind::Confirm,
            _ => ModalKind::Message,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub context: AppContext,
    pub screen: Screen,
    pub splash_elapsed_ms: u64,

    // List
    pub store: QueryStore<Vec<Tablero>>,
    pub list: ListView,
    pub list_status: ListStatus,
    pub selected: usize,
    pub input_mode: InputMode,

    // Create / edit
    pub form: TableroForm,

    // Requests
    pub next_request_id: u64,
    pub pending_list: Option<u64>,
    pub pending_mutation: Option<u64>,
    /// The store was invalidated while `pending_list` was in flight
    pub refetch_after_pending: bool,

    // Popups
    pub modal: Option<Modal>,
    pub show_help: bool,
}

impl AppState {
    pub fn new(context: AppContext) -> Self {
        let page_size = context.config.page_size;
        AppState {
            context,
            screen: Screen::Splash,
            splash_elapsed_ms: 0,
            store: QueryStore::new(),
            list: ListView::new(page_size),
            list_status: ListStatus::Idle,
            selected: 0,
            input_mode: InputMode::Normal,
            form: TableroForm::new(),
            next_request_id: 1,
            pending_list: None,
            pending_mutation: None,
            refetch_after_pending: false,
            modal: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Record under the list cursor
    pub fn selected_tablero(&self) -> Option<&Tablero> {
        self.list.visible().get(self.selected).copied()
    }

    /// Splash progress in percent
    pub fn splash_progress(&self) -> u16 {
        let total = self.context.config.splash_ms.max(1);
        ((self.splash_elapsed_ms.min(total) * 100) / total) as u16
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let source = self.list.source();
        let count = |estado: Estado| source.iter().filter(|t| t.estado == estado).count();
        RenderState {
            screen: self.screen,
            dark_mode: self.context.dark_mode,
            api_base_url: self.context.config.api_base_url.clone(),
            splash_progress: self.splash_progress(),
            rows: self.list.visible().into_iter().cloned().collect(),
            filtered_len: self.list.filtered_len(),
            total_len: source.len(),
            has_more: self.list.has_more(),
            selected: self.selected,
            search: self.list.search().to_string(),
            year_filter: self.list.year_filter(),
            input_mode: self.input_mode,
            list_status: self.list_status,
            last_fetched: self.store.get(TABLEROS_KEY).map(|e| e.last_fetched),
            estado_counts: Estado::ALL
                .iter()
                .map(|e| (*e, count(*e)))
                .collect(),
            form: self.form.clone(),
            modal: self.modal.clone(),
            show_help: self.show_help,
        }
    }
}
