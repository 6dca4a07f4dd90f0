use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Re-read the snapshot file and push it to the card
    ReloadSnapshot,
    /// Re-read the configuration file, then push the current snapshot again
    ReloadConfig,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Esc, PageDown, PageUp, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    match key.code {
        Char('r') => return Action::ReloadSnapshot,
        Char('c') => return Action::ReloadConfig,
        Char('m') | Tab => {
            app.toggle_screen();
            return Action::None;
        }
        _ => {}
    }

    if app.screen == Screen::Markup {
        match key.code {
            Up | Char('k') => app.markup_scroll = app.markup_scroll.saturating_sub(1),
            Down | Char('j') => app.markup_scroll = app.markup_scroll.saturating_add(1),
            PageUp => app.markup_scroll = app.markup_scroll.saturating_sub(10),
            PageDown => app.markup_scroll = app.markup_scroll.saturating_add(10),
            Esc => app.toggle_screen(),
            _ => {}
        }
    }

    Action::None
}
