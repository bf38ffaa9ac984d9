//! Input handling for the scan dialog.
//!
//! Two modes: Normal while the dialog is shown, and Confirm before
//! cancelling a running scan or quitting in the middle of one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The current input mode of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode while the dialog is up.
    Normal,
    /// Confirmation mode for actions that stop a scan.
    Confirm(ConfirmAction),
}

/// Actions that require user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Stop the running scan.
    CancelScan,
    /// Quit while a scan is running.
    Quit,
}

/// Commands that can be issued by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application.
    Quit,
    /// Ask the scanner to stop.
    CancelScan,
    /// Hide or re-show the dialog while the scan continues.
    ToggleBackground,
    /// Start the scan again once finished.
    Rescan,
    /// Confirm the current action (in Confirm mode).
    Confirm,
    /// Cancel the current action (in Confirm mode).
    Cancel,
    /// No operation - key was not recognized or not applicable.
    Noop,
}

/// Handle a key event and return the corresponding command.
pub fn handle_key(key: KeyEvent, mode: &InputMode) -> Command {
    match mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Confirm(_) => handle_confirm_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Esc | KeyCode::Char('c') => Command::CancelScan,
        KeyCode::Char('b') | KeyCode::Char(' ') => Command::ToggleBackground,
        KeyCode::Char('r') => Command::Rescan,
        _ => Command::Noop,
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Command {
    match key.code {
        // Confirm action
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Command::Confirm,

        // Cancel action
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Command::Cancel,

        // Any other key is a no-op in confirm mode
        _ => Command::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_normal_mode() {
        let mode = InputMode::Normal;

        assert_eq!(handle_key(key_event(KeyCode::Char('q')), &mode), Command::Quit);
        assert_eq!(handle_key(key_event(KeyCode::Esc), &mode), Command::CancelScan);
        assert_eq!(handle_key(key_event(KeyCode::Char('c')), &mode), Command::CancelScan);
        assert_eq!(
            handle_key(key_event(KeyCode::Char('b')), &mode),
            Command::ToggleBackground
        );
        assert_eq!(handle_key(key_event(KeyCode::Char('r')), &mode), Command::Rescan);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key, &InputMode::Normal), Command::Quit);
    }

    #[test]
    fn test_confirm_mode() {
        let mode = InputMode::Confirm(ConfirmAction::CancelScan);

        assert_eq!(handle_key(key_event(KeyCode::Char('y')), &mode), Command::Confirm);
        assert_eq!(handle_key(key_event(KeyCode::Enter), &mode), Command::Confirm);
        assert_eq!(handle_key(key_event(KeyCode::Char('n')), &mode), Command::Cancel);
        assert_eq!(handle_key(key_event(KeyCode::Esc), &mode), Command::Cancel);
        assert_eq!(handle_key(key_event(KeyCode::Char('q')), &mode), Command::Noop);
    }

    #[test]
    fn test_unrecognized_keys() {
        let mode = InputMode::Normal;
        assert_eq!(handle_key(key_event(KeyCode::Char('z')), &mode), Command::Noop);
        assert_eq!(handle_key(key_event(KeyCode::F(1)), &mode), Command::Noop);
    }
}
