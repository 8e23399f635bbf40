//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::context::AppContext;
use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        context: AppContext,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(context),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    dispatch(&self.network_tx, self.state.handle_response(response));
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Tick => self.state.tick(),
            UiEvent::SkipSplash => self.state.skip_splash(),

            // Navigation
            UiEvent::ShowHome => self.state.show_home(),
            UiEvent::ShowList => dispatch(&self.network_tx, self.state.show_list()),

            // Home
            UiEvent::ToggleTheme => self.state.toggle_theme(),

            // List
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::LoadMore => self.state.request_more(),
            UiEvent::Refresh => dispatch(&self.network_tx, self.state.refresh()),
            UiEvent::StartSearch => self.state.start_search(),
            UiEvent::StopSearch => self.state.stop_search(),
            UiEvent::SearchChar(c) => self.state.search_char(c),
            UiEvent::SearchBackspace => self.state.search_backspace(),
            UiEvent::CycleYearFilter => self.state.cycle_year_filter(),
            UiEvent::ClearFilters => self.state.clear_filters(),
            UiEvent::NewTablero => self.state.new_tablero(),
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::DeleteSelected => self.state.delete_selected(),

            // Form
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::FieldChar(c) => self.state.field_char(c),
            UiEvent::FieldBackspace => self.state.field_backspace(),
            UiEvent::CycleEstado => self.state.cycle_estado(),
            UiEvent::Submit => dispatch(&self.network_tx, self.state.submit_form()),
            UiEvent::CancelForm => dispatch(&self.network_tx, self.state.cancel_form()),

            // Modal
            UiEvent::ConfirmDelete => dispatch(&self.network_tx, self.state.confirm_delete()),
            UiEvent::DismissModal => self.state.dismiss_modal(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

/// Forward an optional command to the network actor
fn dispatch(network_tx: &mpsc::UnboundedSender<NetworkCommand>, cmd: Option<NetworkCommand>) {
    if let Some(cmd) = cmd {
        let _ = network_tx.send(cmd);
    }
}
