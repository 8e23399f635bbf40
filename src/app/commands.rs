//! Command handlers - business logic for processing UI events

use crate::app::form::{FormStatus, TableroForm};
use crate::app::state::{ListStatus, Modal};
use crate::app::AppState;
use crate::constants::{TABLEROS_KEY, TICK_MS};
use crate::messages::ui_events::{InputMode, Screen};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::validation::validate;

impl AppState {
    // ========================
    // Splash & ticks
    // ========================

    /// Advance timers. Finishes the splash and applies a pending
    /// load-more.
    pub fn tick(&mut self) {
        if self.screen == Screen::Splash {
            self.splash_elapsed_ms += TICK_MS;
            if self.splash_elapsed_ms >= self.context.config.splash_ms {
                self.screen = Screen::Home;
            }
        }
        if self.list_status == ListStatus::LoadingMore {
            self.list.load_more();
            self.list_status = ListStatus::Ready;
        }
    }

    pub fn skip_splash(&mut self) {
        if self.screen == Screen::Splash {
            self.splash_elapsed_ms = self.context.config.splash_ms;
            self.screen = Screen::Home;
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn show_home(&mut self) {
        self.screen = Screen::Home;
        self.input_mode = InputMode::Normal;
    }

    pub fn show_list(&mut self) -> Option<NetworkCommand> {
        self.screen = Screen::List;
        self.input_mode = InputMode::Normal;
        self.sync_list()
    }

    /// Fetch the collection unless the store already holds a fresh copy
    /// or a fetch is in flight.
    pub fn sync_list(&mut self) -> Option<NetworkCommand> {
        if self.store.is_fresh(TABLEROS_KEY) || self.pending_list.is_some() {
            return None;
        }
        let id = self.next_id();
        self.pending_list = Some(id);
        self.list_status = ListStatus::Loading;
        Some(NetworkCommand::ListTableros { id })
    }

    pub fn refresh(&mut self) -> Option<NetworkCommand> {
        self.store.invalidate(TABLEROS_KEY);
        self.sync_list()
    }

    // ========================
    // Theme
    // ========================

    pub fn toggle_theme(&mut self) {
        self.context.toggle_theme();
    }

    // ========================
    // List navigation & filters
    // ========================

    pub fn select_next(&mut self) {
        let visible = self.list.visible().len();
        if self.selected + 1 < visible {
            self.selected += 1;
        } else {
            // Reached the bottom: reveal the next page
            self.request_more();
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Schedule `load_more` for the next tick
    pub fn request_more(&mut self) {
        if self.list_status == ListStatus::Ready && self.list.has_more() {
            self.list_status = ListStatus::LoadingMore;
        }
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_char(&mut self, c: char) {
        let mut search = self.list.search().to_string();
        search.push(c);
        self.list.set_search(search);
        self.selected = 0;
    }

    pub fn search_backspace(&mut self) {
        let mut search = self.list.search().to_string();
        if search.pop().is_some() {
            self.list.set_search(search);
            self.selected = 0;
        }
    }

    pub fn cycle_year_filter(&mut self) {
        self.list.cycle_year_filter();
        self.selected = 0;
    }

    pub fn clear_filters(&mut self) {
        self.list.set_search("");
        self.list.set_year_filter(None);
        self.selected = 0;
    }

    // ========================
    // Create / edit
    // ========================

    pub fn new_tablero(&mut self) {
        self.form = TableroForm::new();
        self.screen = Screen::Create;
    }

    pub fn edit_selected(&mut self) {
        if let Some(form) = self.selected_tablero().map(TableroForm::from_tablero) {
            self.form = form;
            self.screen = Screen::Edit;
        }
    }

    pub fn next_field(&mut self) {
        self.form.next_field();
    }

    pub fn prev_field(&mut self) {
        self.form.prev_field();
    }

    pub fn field_char(&mut self, c: char) {
        if self.form.status == FormStatus::Idle {
            self.form.insert_char(c);
        }
    }

    pub fn field_backspace(&mut self) {
        if self.form.status == FormStatus::Idle {
            self.form.backspace();
        }
    }

    pub fn cycle_estado(&mut self) {
        if self.form.status == FormStatus::Idle {
            self.form.cycle_estado();
        }
    }

    /// Validate and submit the form. Nothing is sent when a rule fails.
    pub fn submit_form(&mut self) -> Option<NetworkCommand> {
        if self.form.status == FormStatus::Submitting {
            return None;
        }
        let draft = self.form.draft();
        let result = validate(&draft);
        if !result.valid {
            self.modal = Some(Modal::Error(result.message()));
            return None;
        }
        let payload = draft.to_payload()?;

        let id = self.next_id();
        self.pending_mutation = Some(id);
        self.form.status = FormStatus::Submitting;

        Some(match self.form.editing_id.clone() {
            Some(tablero_id) => NetworkCommand::UpdateTablero {
                id,
                tablero_id,
                payload,
            },
            None => NetworkCommand::CreateTablero { id, payload },
        })
    }

    /// Leave the form. An in-flight submission keeps running but its
    /// outcome no longer touches this screen.
    pub fn cancel_form(&mut self) -> Option<NetworkCommand> {
        if self.form.status == FormStatus::Submitting {
            self.pending_mutation = None;
        }
        self.form = TableroForm::new();
        self.show_list()
    }

    // ========================
    // Delete
    // ========================

    pub fn delete_selected(&mut self) {
        let modal = self.selected_tablero().map(|t| Modal::ConfirmDelete {
            tablero_id: t.id.clone(),
            nombre: t.nombre.clone(),
        });
        if modal.is_some() {
            self.modal = modal;
        }
    }

    pub fn confirm_delete(&mut self) -> Option<NetworkCommand> {
        match self.modal.take() {
            Some(Modal::ConfirmDelete { tablero_id, .. }) => {
                let id = self.next_id();
                self.pending_mutation = Some(id);
                Some(NetworkCommand::DeleteTablero { id, tablero_id })
            }
            other => {
                self.modal = other;
                None
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn dismiss_modal(&mut self) {
        self.modal = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response. May return a follow-up list fetch.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        if response.is_mutation() && response.is_success() {
            self.store.invalidate(TABLEROS_KEY);
            // A list already in flight may predate this write
            if self.pending_list.is_some() {
                self.refetch_after_pending = true;
            }
        }

        match response {
            NetworkResponse::Listed { id, result } => {
                if self.pending_list != Some(id) {
                    tracing::warn!(id, "Discarding stale list response");
                    return None;
                }
                self.pending_list = None;
                self.list_status = ListStatus::Ready;
                let outdated = std::mem::take(&mut self.refetch_after_pending);
                match result.data {
                    Some(records) if result.success => {
                        self.store.put(TABLEROS_KEY, records.clone());
                        self.list.set_source(records);
                        self.selected = 0;
                        if outdated {
                            tracing::debug!(id, "List predates a mutation, refetching");
                            self.store.invalidate(TABLEROS_KEY);
                            return self.sync_if_listing();
                        }
                    }
                    _ => {
                        let message = result
                            .error
                            .unwrap_or_else(|| String::from("No se pudo cargar la lista"));
                        self.modal = Some(Modal::Error(message));
                    }
                }
                None
            }
            NetworkResponse::Created { id, result } | NetworkResponse::Updated { id, result } => {
                if self.pending_mutation != Some(id) {
                    tracing::warn!(id, "Mutation finished after its screen was left");
                    return self.sync_if_listing();
                }
                self.pending_mutation = None;
                self.form.status = FormStatus::Idle;
                if result.success {
                    let message = if self.form.editing_id.is_some() {
                        "Tablero actualizado correctamente"
                    } else {
                        "Tablero creado correctamente"
                    };
                    self.modal = Some(Modal::Info(message.to_string()));
                    self.form = TableroForm::new();
                    self.show_list()
                } else {
                    self.modal = Some(Modal::Error(
                        result.error.unwrap_or_else(|| String::from("Error al guardar")),
                    ));
                    None
                }
            }
            NetworkResponse::Deleted { id, result, .. } => {
                if self.pending_mutation == Some(id) {
                    self.pending_mutation = None;
                    self.modal = Some(if result.success {
                        Modal::Info(String::from("Tablero eliminado"))
                    } else {
                        Modal::Error(
                            result.error.unwrap_or_else(|| String::from("Error al eliminar")),
                        )
                    });
                }
                self.sync_if_listing()
            }
        }
    }

    fn sync_if_listing(&mut self) -> Option<NetworkCommand> {
        if self.screen == Screen::List {
            self.sync_list()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::context::AppContext;
    use crate::app::form::FormField;
    use crate::config::AppConfig;
    use crate::models::{ApiResult, Estado, Tablero, TableroId};
    use crate::storage::PreferenceStore;
    use crate::validation::{CAPACIDAD_POSITIVE, INSTALACION_ORDER};
    use tempfile::TempDir;

    fn state() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PreferenceStore::new(dir.path().join("preferences.yaml"));
        let context = AppContext::new(AppConfig::default(), prefs);
        (dir, AppState::new(context))
    }

    fn tablero(id: i64) -> Tablero {
        Tablero {
            id: TableroId::Int(id),
            nombre: format!("Tablero {}", id),
            ubicacion: "Sala Norte".into(),
            marca: "ABB".into(),
            capacidad_amperios: 100,
            ano_fabricacion: 2020,
            ano_instalacion: 2021,
            estado: Estado::Operativo,
        }
    }

    fn loaded(n: i64) -> (TempDir, AppState) {
        let (dir, mut app) = state();
        let Some(NetworkCommand::ListTableros { id }) = app.show_list() else {
            panic!("expected list fetch");
        };
        let records = (1..=n).map(tablero).collect();
        app.handle_response(NetworkResponse::Listed {
            id,
            result: ApiResult::ok(records),
        });
        (dir, app)
    }

    fn fill_valid(form: &mut TableroForm) {
        form.nombre = "Tablero Norte".into();
        form.ubicacion = "Piso 2".into();
        form.marca = "Siemens".into();
        form.capacidad = "63".into();
        form.ano_fabricacion = "2019".into();
        form.ano_instalacion = "2020".into();
    }

    #[test]
    fn test_splash_ends_after_duration() {
        let (_dir, mut app) = state();
        assert_eq!(app.screen, Screen::Splash);
        let ticks = app.context.config.splash_ms / TICK_MS;
        for _ in 1..ticks {
            app.tick();
        }
        assert_eq!(app.screen, Screen::Splash);
        app.tick();
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.splash_progress(), 100);
    }

    #[test]
    fn test_list_fetch_is_deduplicated() {
        let (_dir, mut app) = state();
        assert!(app.show_list().is_some());
        assert_eq!(app.list_status, ListStatus::Loading);
        app.show_home();
        assert!(app.show_list().is_none());
    }

    #[test]
    fn test_fresh_store_skips_fetch() {
        let (_dir, mut app) = loaded(3);
        assert_eq!(app.list_status, ListStatus::Ready);
        app.show_home();
        assert!(app.show_list().is_none());
        assert!(matches!(app.refresh(), Some(NetworkCommand::ListTableros { .. })));
    }

    #[test]
    fn test_scrolling_past_end_loads_more() {
        let (_dir, mut app) = loaded(25);
        assert_eq!(app.list.visible().len(), 10);
        for _ in 0..9 {
            app.select_next();
        }
        assert_eq!(app.selected, 9);
        assert_eq!(app.list_status, ListStatus::Ready);

        app.select_next();
        assert_eq!(app.list_status, ListStatus::LoadingMore);
        app.tick();
        assert_eq!(app.list_status, ListStatus::Ready);
        assert_eq!(app.list.visible().len(), 20);

        app.select_next();
        assert_eq!(app.selected, 10);
    }

    #[test]
    fn test_zero_capacity_sends_nothing() {
        let (_dir, mut app) = loaded(1);
        app.new_tablero();
        fill_valid(&mut app.form);
        app.form.capacidad = "0".into();

        assert!(app.submit_form().is_none());
        assert_eq!(app.modal, Some(Modal::Error(CAPACIDAD_POSITIVE.to_string())));
        assert_eq!(app.form.status, FormStatus::Idle);
        assert!(app.pending_mutation.is_none());
    }

    #[test]
    fn test_update_with_reversed_years_is_rejected() {
        let (_dir, mut app) = loaded(1);
        app.edit_selected();
        assert_eq!(app.screen, Screen::Edit);
        app.form.ano_fabricacion = "2021".into();
        app.form.ano_instalacion = "2019".into();
        assert!(app.submit_form().is_none());
        assert_eq!(app.modal, Some(Modal::Error(INSTALACION_ORDER.to_string())));
    }

    #[test]
    fn test_create_success_invalidates_and_refetches() {
        let (_dir, mut app) = loaded(2);
        app.new_tablero();
        fill_valid(&mut app.form);

        let Some(NetworkCommand::CreateTablero { id, payload }) = app.submit_form() else {
            panic!("expected create command");
        };
        assert_eq!(payload.capacidad_amperios, 63);
        assert_eq!(app.form.status, FormStatus::Submitting);
        assert!(app.submit_form().is_none());

        let follow_up = app.handle_response(NetworkResponse::Created {
            id,
            result: ApiResult::ok(tablero(3)),
        });
        assert_eq!(app.screen, Screen::List);
        assert!(!app.store.is_fresh(TABLEROS_KEY));
        assert!(matches!(follow_up, Some(NetworkCommand::ListTableros { .. })));
        assert!(matches!(app.modal, Some(Modal::Info(_))));
    }

    #[test]
    fn test_update_error_returns_to_idle() {
        let (_dir, mut app) = loaded(1);
        app.edit_selected();
        app.form.focused = Some(FormField::Marca);
        app.field_char('X');

        let Some(NetworkCommand::UpdateTablero {
            id,
            tablero_id,
            payload,
        }) = app.submit_form()
        else {
            panic!("expected update command");
        };
        assert_eq!(tablero_id, TableroId::Int(1));
        assert_eq!(payload.marca, "ABBX");

        let follow_up = app.handle_response(NetworkResponse::Updated {
            id,
            result: ApiResult::err("Tablero no encontrado"),
        });
        assert!(follow_up.is_none());
        assert_eq!(app.screen, Screen::Edit);
        assert_eq!(app.form.status, FormStatus::Idle);
        assert_eq!(app.modal, Some(Modal::Error("Tablero no encontrado".into())));
        assert!(app.store.is_fresh(TABLEROS_KEY));
    }

    #[test]
    fn test_late_mutation_still_invalidates() {
        let (_dir, mut app) = loaded(1);
        app.new_tablero();
        fill_valid(&mut app.form);
        let Some(NetworkCommand::CreateTablero { id, .. }) = app.submit_form() else {
            panic!("expected create command");
        };
        // Leaving the form issues no fetch: the store is still fresh
        assert!(app.cancel_form().is_none());

        let follow_up = app.handle_response(NetworkResponse::Created {
            id,
            result: ApiResult::ok(tablero(2)),
        });
        assert!(app.modal.is_none());
        assert!(!app.store.is_fresh(TABLEROS_KEY));
        assert!(matches!(follow_up, Some(NetworkCommand::ListTableros { .. })));
    }

    #[test]
    fn test_delete_flow() {
        let (_dir, mut app) = loaded(3);
        app.select_next();
        app.delete_selected();
        assert!(matches!(app.modal, Some(Modal::ConfirmDelete { .. })));

        let Some(NetworkCommand::DeleteTablero { id, tablero_id }) = app.confirm_delete() else {
            panic!("expected delete command");
        };
        assert_eq!(tablero_id, TableroId::Int(2));
        assert!(app.modal.is_none());

        let follow_up = app.handle_response(NetworkResponse::Deleted {
            id,
            tablero_id,
            result: ApiResult::empty(),
        });
        assert_eq!(app.modal, Some(Modal::Info("Tablero eliminado".into())));
        assert!(matches!(follow_up, Some(NetworkCommand::ListTableros { .. })));
    }

    #[test]
    fn test_list_in_flight_during_delete_is_refetched() {
        let (_dir, mut app) = loaded(2);
        app.delete_selected();
        let Some(NetworkCommand::DeleteTablero { id, tablero_id }) = app.confirm_delete() else {
            panic!("expected delete command");
        };
        let Some(NetworkCommand::ListTableros { id: old_list }) = app.refresh() else {
            panic!("expected list fetch");
        };

        // The refresh is still in flight, so the delete cannot fetch again yet
        let follow_up = app.handle_response(NetworkResponse::Deleted {
            id,
            tablero_id,
            result: ApiResult::empty(),
        });
        assert!(follow_up.is_none());

        // The older list still holds the deleted record
        let follow_up = app.handle_response(NetworkResponse::Listed {
            id: old_list,
            result: ApiResult::ok(vec![tablero(1), tablero(2)]),
        });
        assert!(!app.store.is_fresh(TABLEROS_KEY));
        assert!(!app.refetch_after_pending);
        let Some(NetworkCommand::ListTableros { id: new_list }) = follow_up else {
            panic!("expected a refetch after the outdated list");
        };
        assert_eq!(app.list.filtered_len(), 2);

        app.handle_response(NetworkResponse::Listed {
            id: new_list,
            result: ApiResult::ok(vec![tablero(2)]),
        });
        assert!(app.store.is_fresh(TABLEROS_KEY));
        assert_eq!(app.list.filtered_len(), 1);
    }

    #[test]
    fn test_list_error_shows_modal() {
        let (_dir, mut app) = state();
        let Some(NetworkCommand::ListTableros { id }) = app.show_list() else {
            panic!("expected list fetch");
        };
        app.handle_response(NetworkResponse::Listed {
            id,
            result: ApiResult::err("Error 500"),
        });
        assert_eq!(app.modal, Some(Modal::Error("Error 500".into())));
        assert_eq!(app.list_status, ListStatus::Ready);
        assert!(app.pending_list.is_none());
    }

    #[test]
    fn test_search_resets_selection() {
        let (_dir, mut app) = loaded(12);
        app.select_next();
        app.select_next();
        app.search_char('1');
        assert_eq!(app.selected, 0);
        // "Tablero 1", "Tablero 10", "Tablero 11", "Tablero 12"
        assert_eq!(app.list.filtered_len(), 4);
        app.search_backspace();
        assert_eq!(app.list.filtered_len(), 12);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let (dir, mut app) = state();
        assert!(!app.context.dark_mode);
        app.toggle_theme();
        assert!(app.context.dark_mode);
        let reloaded = PreferenceStore::new(dir.path().join("preferences.yaml"));
        assert!(reloaded.load_dark_mode().unwrap());
    }
}
