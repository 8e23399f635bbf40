//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Screens of the application
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Splash,
    Home,
    List,
    Create,
    Edit,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Periodic tick from the UI loop
    Tick,
    SkipSplash,

    // Navigation
    ShowHome,
    ShowList,

    // Home
    ToggleTheme,

    // List
    SelectNext,
    SelectPrev,
    LoadMore,
    Refresh,
    StartSearch,
    StopSearch,
    SearchChar(char),
    SearchBackspace,
    CycleYearFilter,
    ClearFilters,
    NewTablero,
    EditSelected,
    DeleteSelected,

    // Form
    NextField,
    PrevField,
    FieldChar(char),
    FieldBackspace,
    CycleEstado,
    Submit,
    CancelForm,

    // Modal
    ConfirmDelete,
    DismissModal,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode of the list search box
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What kind of modal is on screen, as far as key mapping cares
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ModalKind {
    Message,
    Confirm,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    screen: Screen,
    input_mode: InputMode,
    modal: Option<ModalKind>,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Modals block everything else
    match modal {
        Some(ModalKind::Confirm) => {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('s') | KeyCode::Enter => {
                    Some(UiEvent::ConfirmDelete)
                }
                _ => Some(UiEvent::DismissModal),
            };
        }
        Some(ModalKind::Message) => return Some(UiEvent::DismissModal),
        None => {}
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match screen {
        Screen::Splash => Some(UiEvent::SkipSplash),
        Screen::Home => handle_home_keys(key),
        Screen::List => handle_list_keys(key, input_mode),
        Screen::Create | Screen::Edit => handle_form_keys(key),
    }
}

fn handle_home_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('2') | KeyCode::Tab => Some(UiEvent::ShowList),
        KeyCode::Char('t') => Some(UiEvent::ToggleTheme),
        _ => None,
    }
}

fn handle_list_keys(key: KeyEvent, input_mode: InputMode) -> Option<UiEvent> {
    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('1') | KeyCode::BackTab => Some(UiEvent::ShowHome),
            KeyCode::Char('/') => Some(UiEvent::StartSearch),
            KeyCode::Char('y') => Some(UiEvent::CycleYearFilter),
            KeyCode::Esc => Some(UiEvent::ClearFilters),
            KeyCode::Char('n') => Some(UiEvent::NewTablero),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditSelected),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
            KeyCode::Char('r') => Some(UiEvent::Refresh),
            KeyCode::Char('m') => Some(UiEvent::LoadMore),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopSearch),
            KeyCode::Backspace => Some(UiEvent::SearchBackspace),
            KeyCode::Char(c) => Some(UiEvent::SearchChar(c)),
            _ => None,
        },
    }
}

fn handle_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CancelForm),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Left | KeyCode::Right => Some(UiEvent::CycleEstado),
        KeyCode::Backspace => Some(UiEvent::FieldBackspace),
        KeyCode::Char(c) => Some(UiEvent::FieldChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn plain(code: KeyCode, screen: Screen, input_mode: InputMode) -> Option<UiEvent> {
        key_to_ui_event(press(code), screen, input_mode, None, false)
    }

    #[test]
    fn test_modal_swallows_keys() {
        let ev = key_to_ui_event(
            press(KeyCode::Char('q')),
            Screen::List,
            InputMode::Normal,
            Some(ModalKind::Message),
            false,
        );
        assert_eq!(ev, Some(UiEvent::DismissModal));

        let ev = key_to_ui_event(
            press(KeyCode::Char('y')),
            Screen::List,
            InputMode::Normal,
            Some(ModalKind::Confirm),
            false,
        );
        assert_eq!(ev, Some(UiEvent::ConfirmDelete));
    }

    #[test]
    fn test_form_keys_type_text() {
        let ev = plain(KeyCode::Char('q'), Screen::Create, InputMode::Normal);
        assert_eq!(ev, Some(UiEvent::FieldChar('q')));
        let ev = plain(KeyCode::Esc, Screen::Edit, InputMode::Normal);
        assert_eq!(ev, Some(UiEvent::CancelForm));
    }

    #[test]
    fn test_search_editing_captures_chars() {
        let ev = plain(KeyCode::Char('n'), Screen::List, InputMode::Editing);
        assert_eq!(ev, Some(UiEvent::SearchChar('n')));
        let ev = plain(KeyCode::Char('n'), Screen::List, InputMode::Normal);
        assert_eq!(ev, Some(UiEvent::NewTablero));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let modal = Some(ModalKind::Message);
        let ev = key_to_ui_event(key, Screen::Create, InputMode::Normal, modal, true);
        assert_eq!(ev, Some(UiEvent::Quit));
    }
}
