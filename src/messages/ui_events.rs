//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Tab management
    NewTab,
    CloseTab,
    NextTab,
    PrevTab,
    FocusTab(usize),
    MoveTabLeft,
    MoveTabRight,

    // Focus chain
    CycleFocus,
    FocusAddress,
    FocusSearch,

    // Entry editing
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    Activate,
    StopEditing,

    // Page actions
    Reload,

    // Action menu
    OpenMenu,
    CloseMenu,
    MenuNext,
    MenuPrev,
    MenuSelect,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    editing: bool,
    menu_open: bool,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts work in every mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('t') => return Some(UiEvent::NewTab),
            KeyCode::Char('w') => return Some(UiEvent::CloseTab),
            _ => {}
        }
    }

    // Handle popups first
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if menu_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('m') => Some(UiEvent::CloseMenu),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::MenuPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::MenuNext),
            KeyCode::Enter => Some(UiEvent::MenuSelect),
            _ => None,
        };
    }

    if editing {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::Activate),
            KeyCode::Tab => Some(UiEvent::CycleFocus),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('m') => Some(UiEvent::OpenMenu),
        KeyCode::Char('t') => Some(UiEvent::NewTab),
        KeyCode::Char('x') => Some(UiEvent::CloseTab),
        KeyCode::Char('e') => Some(UiEvent::FocusAddress),
        KeyCode::Char('/') => Some(UiEvent::FocusSearch),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Char('<') => Some(UiEvent::MoveTabLeft),
        KeyCode::Char('>') => Some(UiEvent::MoveTabRight),
        KeyCode::Tab => Some(UiEvent::CycleFocus),
        KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevTab),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextTab),
        KeyCode::Enter => Some(UiEvent::Activate),
        KeyCode::Char(c @ '1'..='9') => Some(UiEvent::FocusTab(c as usize - '1' as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut key = KeyEvent::new(code, modifiers);
        key.kind = KeyEventKind::Press;
        key
    }

    #[test]
    fn test_ctrl_shortcuts_work_while_editing() {
        let key = press(KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, true, false, false), Some(UiEvent::NewTab));
    }

    #[test]
    fn test_chars_go_to_entry_while_editing() {
        let key = press(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(
            key_to_ui_event(key, true, false, false),
            Some(UiEvent::CharInput('t'))
        );
    }

    #[test]
    fn test_digits_focus_tabs() {
        let key = press(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(key_to_ui_event(key, false, false, false), Some(UiEvent::FocusTab(2)));
    }

    #[test]
    fn test_any_key_closes_help() {
        let key = press(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(key_to_ui_event(key, false, false, true), Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_menu_captures_navigation_keys() {
        let key = press(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(key_to_ui_event(key, false, true, false), Some(UiEvent::MenuNext));
        let key = press(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(key_to_ui_event(key, false, true, false), Some(UiEvent::MenuSelect));
    }
}
