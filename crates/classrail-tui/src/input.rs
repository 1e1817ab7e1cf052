use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Mode};
use crate::keymap::Keymap;
use crate::rail::RailKey;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    StepLeft,
    StepRight,
    Select,       // Activate the focused login button / open the portal / choose a card
    NextButton,   // Tab: cycle login buttons
    LoginGoogle,
    LoginEmail,
    Logout,
    Help,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

impl Action {
    /// What the rail's keyboard adapter sees for this action
    pub fn rail_key(&self) -> RailKey {
        match self {
            Action::StepLeft => RailKey::Left,
            Action::StepRight => RailKey::Right,
            _ => RailKey::Other,
        }
    }
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match &app.mode {
        Mode::EmailPrompt { .. } => return handle_input_mode(key),
        Mode::Help => {
            // Any key closes help
            return Action::ExitMode;
        }
        Mode::Normal => {}
    }

    keymap.lookup(&key)
}

/// Handle key events while typing an email address
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}
