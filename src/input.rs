//! Key mapping from crossterm events to UI-agnostic inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use duoroom::activities::{ActivityInput, ActivityKind};
use duoroom::app::AppInput;

/// Map a key press for the current screen. `None` for key releases.
pub fn map_key(key: KeyEvent, screen: ActivityKind, composing: bool) -> Option<AppInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppInput::Quit);
    }
    if composing {
        return map_chat_key(key.code);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('k') => ActivityInput::Up,
        KeyCode::Down | KeyCode::Char('j') => ActivityInput::Down,
        KeyCode::Left | KeyCode::Char('h') => ActivityInput::Left,
        KeyCode::Right | KeyCode::Char('l') => ActivityInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => ActivityInput::Primary,
        KeyCode::Esc => ActivityInput::Cancel,
        KeyCode::Char('q') | KeyCode::Char('Q') if screen == ActivityKind::Lobby => {
            return Some(AppInput::Quit)
        }
        KeyCode::Char('t') | KeyCode::Char('T') if screen == ActivityKind::Lobby => {
            return Some(AppInput::CycleTheme)
        }
        KeyCode::Char('c') | KeyCode::Char('C') if screen == ActivityKind::Lobby => {
            return Some(AppInput::OpenChat)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => ActivityInput::Reset,
        KeyCode::Char('b') | KeyCode::Char('B') => ActivityInput::ToggleBot,
        KeyCode::Char('d') | KeyCode::Char('D') => ActivityInput::CycleDifficulty,
        _ => ActivityInput::Other,
    };
    Some(AppInput::Activity(input))
}

/// While the chat composer is open every printable key is text.
fn map_chat_key(code: KeyCode) -> Option<AppInput> {
    match code {
        KeyCode::Enter => Some(AppInput::ChatSend),
        KeyCode::Esc => Some(AppInput::ChatCancel),
        KeyCode::Backspace => Some(AppInput::ChatBackspace),
        KeyCode::Char(c) => Some(AppInput::ChatChar(c)),
        _ => None,
    }
}
