use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::app::{Action, InputMode};

/// Map a crossterm terminal event to an action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Editing => map_key_editing(key),
                InputMode::UploadPath => map_key_prompt(key),
            }
        }
        Event::Paste(text) => Action::Paste(text.clone()),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Action::ScrollDown,
            MouseEventKind::ScrollUp => Action::ScrollUp,
            _ => Action::None,
        },
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('s') | KeyCode::Enter => Action::Summarize,
        KeyCode::Char('t') | KeyCode::Right => Action::NextTone,
        KeyCode::Char('T') | KeyCode::Left => Action::PrevTone,
        KeyCode::Char('l') => Action::LoadSample,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Char('o') | KeyCode::Char('u') => Action::StartUpload,
        KeyCode::Char('i') => Action::StartEditing,
        KeyCode::Char('e') => Action::OpenEditor,
        KeyCode::Char('y') => Action::Copy,
        KeyCode::Char('d') => Action::Download,
        KeyCode::Tab => Action::SwitchPane,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

fn map_key_editing(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        return Action::Summarize;
    }
    match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Enter => Action::InsertChar('\n'),
        KeyCode::Tab => Action::InsertChar('\t'),
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}

fn map_key_prompt(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Cancel,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}
