//! Tableros TUI - actor-based inventory client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::path::Path;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use tableros_tui::app::form::{FormField, FormStatus};
use tableros_tui::app::state::{ListStatus, Modal};
use tableros_tui::constants::{APP_NAME, APP_VERSION, TICK_MS};
use tableros_tui::messages::ui_events::{key_to_ui_event, InputMode, Screen};
use tableros_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use tableros_tui::network::{create_client, NetworkActor, TableroGateway};
use tableros_tui::storage::PreferenceStore;
use tableros_tui::theme::Theme;
use tableros_tui::ui::{centered_rect, estado_color, progress_bar, render_input, render_tabs};
use tableros_tui::{AppActor, AppConfig, AppContext};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "tableros.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Using default configuration");
    }
    tracing::info!(api = %config.api_base_url, "Starting {} {}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let gateway = TableroGateway::new(create_client(), &config.api_base_url);
    let network_actor = NetworkActor::new(gateway, config.fetch_attempts, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let context = AppContext::new(config, PreferenceStore::in_config_dir());
    let app_actor = AppActor::new(context, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.screen,
                    current_state.input_mode,
                    current_state.modal.as_ref().map(Modal::kind),
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        } else {
            let _ = ui_tx.send(UiEvent::Tick);
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let theme = Theme::for_mode(state.dark_mode);
    let area = f.area();
    f.render_widget(Block::default().style(theme.base()), area);

    if state.screen == Screen::Splash {
        draw_splash(f, state, &theme, area);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Tab bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, &theme, main_chunks[0]);

    match state.screen {
        Screen::Home => draw_home(f, state, &theme, main_chunks[1]),
        Screen::List => draw_list(f, state, &theme, main_chunks[1]),
        Screen::Create | Screen::Edit => draw_form(f, state, &theme, main_chunks[1]),
        Screen::Splash => {}
    }

    draw_status_bar(f, state, &theme, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, &theme, area);
    }

    if let Some(modal) = &state.modal {
        draw_modal(f, modal, &theme, area);
    }
}

fn draw_splash(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let popup_area = centered_rect(50, 30, area);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(APP_NAME, theme.title())),
        Line::from(Span::styled("Inventario de tableros eléctricos", theme.hint())),
        Line::from(""),
        Line::from(progress_bar(state.splash_progress, 30)),
    ];
    let splash = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_focused()));
    f.render_widget(splash, popup_area);
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let selected = match state.screen {
        Screen::Home => 0,
        _ => 1,
    };
    let tabs = render_tabs(&[" 1:Inicio ", " 2:Tableros "], selected, theme);
    f.render_widget(tabs, area);
}

fn draw_home(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(format!("{} v{}", APP_NAME, APP_VERSION), theme.title())),
        Line::from(""),
        Line::from(format!("Servidor: {}", state.api_base_url)),
        Line::from(format!(
            "Tema: {} (t para cambiar)",
            if state.dark_mode { "oscuro" } else { "claro" }
        )),
        Line::from(""),
    ];

    match state.last_fetched {
        Some(at) => {
            lines.push(Line::from(format!("Tableros registrados: {}", state.total_len)));
            for (estado, count) in &state.estado_counts {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", estado.as_str()),
                        Style::default().fg(estado_color(*estado)),
                    ),
                    Span::raw(count.to_string()),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "Actualizado: {}",
                    at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
                ),
                theme.hint(),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Abre la pestaña Tableros (2) para cargar el inventario.",
                theme.hint(),
            )));
        }
    }

    let home = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(" Perfil "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(home, area);
}

fn draw_list(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Search
            Constraint::Min(3),     // Rows
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    let year = state
        .year_filter
        .map(|y| format!(" | año: {}", y))
        .unwrap_or_default();
    let search_title = format!(" Buscar (/){} ", year);
    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing { theme.border_editing() } else { theme.border() })
        .title(search_title);
    f.render_widget(Paragraph::new(state.search.as_str()).block(search_block), chunks[0]);
    if editing {
        let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
        let cursor_x = (chunks[0].x + state.search.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .title(" Tableros ");

    if state.list_status == ListStatus::Loading && state.rows.is_empty() {
        f.render_widget(Paragraph::new("Cargando tableros...").block(block), chunks[1]);
    } else if state.rows.is_empty() {
        let msg = if state.total_len == 0 {
            "No hay tableros registrados. Pulsa 'n' para crear uno."
        } else {
            "Ningún tablero coincide con la búsqueda."
        };
        f.render_widget(Paragraph::new(msg).style(theme.hint()).block(block), chunks[1]);
    } else {
        let items: Vec<ListItem> = state
            .rows
            .iter()
            .map(|t| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<28}", t.nombre), Style::default().bold()),
                    Span::raw(format!(
                        " {:<20} {:<12} {:>5}A {} ",
                        t.ubicacion, t.marca, t.capacidad_amperios, t.ano_fabricacion
                    )),
                    Span::styled(t.estado.as_str(), Style::default().fg(estado_color(t.estado))),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected())
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(state.selected));
        f.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    let mut footer = format!(" Mostrando {} de {}", state.rows.len(), state.filtered_len);
    match state.list_status {
        ListStatus::Loading => footer.push_str(" | actualizando..."),
        ListStatus::LoadingMore => footer.push_str(" | cargando más..."),
        _ if state.has_more => footer.push_str(" | ↓ para cargar más"),
        _ => {}
    }
    f.render_widget(Paragraph::new(footer).style(theme.hint()), chunks[2]);
}

fn draw_form(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let form = &state.form;
    let title = if state.screen == Screen::Edit {
        " Editar tablero "
    } else {
        " Nuevo tablero "
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .title(title);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let mut constraints: Vec<Constraint> =
        FormField::ALL.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = form.focused() == *field;
        let value = if *field == FormField::Estado {
            format!("< {} >", form.estado.as_str())
        } else {
            form.value(*field).to_string()
        };
        let label = format!(" {} ", field.label());
        f.render_widget(render_input(&value, &label, focused, theme), rows[i]);
        if focused && *field != FormField::Estado && form.status == FormStatus::Idle {
            let r = rows[i];
            let max_x = r.x + r.width.saturating_sub(2);
            let cursor_x = (r.x + value.chars().count() as u16 + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, r.y + 1));
        }
    }

    let status = match form.status {
        FormStatus::Submitting => Span::styled("Guardando...", theme.selected()),
        FormStatus::Idle => Span::styled("Enter para guardar, Esc para volver", theme.hint()),
    };
    f.render_widget(Paragraph::new(Line::from(status)), rows[FormField::ALL.len()]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let status = match state.screen {
        Screen::Home => " 2:tableros | t:tema | ?:ayuda | q:salir ",
        Screen::List if state.input_mode == InputMode::Editing => " Esc/Enter: terminar búsqueda ",
        Screen::List => {
            " /:buscar | y:año | n:nuevo | e:editar | d:eliminar | r:recargar | q:salir "
        }
        Screen::Create | Screen::Edit => " Tab:campo | ←/→:estado | Enter:guardar | Esc:volver ",
        Screen::Splash => "",
    };

    let bar = Paragraph::new(status).style(theme.hint());
    f.render_widget(bar, area);
}

const CONTINUE_HINT: &str = "Pulsa una tecla para continuar";

fn draw_modal(f: &mut Frame, modal: &Modal, theme: &Theme, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let (title, style, body, hint) = match modal {
        Modal::Info(msg) => (" Éxito ", theme.success(), msg.clone(), CONTINUE_HINT),
        Modal::Error(msg) => (" Error ", theme.error(), msg.clone(), CONTINUE_HINT),
        Modal::ConfirmDelete { nombre, .. } => (
            " Eliminar ",
            theme.error(),
            format!("¿Eliminar el tablero \"{}\"?", nombre),
            "y/Enter: eliminar | otra tecla: cancelar",
        ),
    };

    let mut lines: Vec<Line> = body.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, theme.hint())));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(Span::styled(title, style))
        .style(theme.base());

    let popup = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TABLEROS TUI - Atajos de teclado

 NAVEGACIÓN
   1 / 2              Inicio / Tableros
   ↑ / ↓  (k / j)     Mover selección (al final carga más)

 LISTA
   /                  Buscar por nombre, ubicación, marca o estado
   y                  Filtrar por año de fabricación
   Esc                Quitar filtros
   n                  Nuevo tablero
   e / Enter          Editar seleccionado
   d                  Eliminar seleccionado
   r                  Recargar desde el servidor

 FORMULARIO
   Tab / Shift+Tab    Siguiente / anterior campo
   ← / →  (espacio)   Cambiar estado
   Enter              Guardar
   Esc                Volver

 GENERAL
   t                  Cambiar tema (Inicio)
   ?                  Mostrar esta ayuda
   q / Ctrl+C         Salir

 Pulsa cualquier tecla para cerrar...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Ayuda ")
        .style(theme.base());

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
