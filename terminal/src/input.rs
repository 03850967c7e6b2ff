use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use log::trace;

use chip8_core::{Chip8Error, Input, InputEvent};

use crate::frontend_error;
use crate::keymap::keymap;

/// # Terminal Input
/// Drains pending key presses from the terminal without blocking.
///
/// Only key-down events are produced. Enter, Escape or Ctrl-C ask the scheduler to quit.
/// Expects the terminal to be in raw mode, which `TerminalDisplay` takes care of.
#[derive(Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput
    }
}

/// Maps a single terminal event, ignoring anything that isn't on the keypad
fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Enter,
            ..
        })
        | Event::Key(KeyEvent {
            code: KeyCode::Esc, ..
        }) => Some(InputEvent::Quit),
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
        }) if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            ..
        }) => keymap(*c).map(InputEvent::KeyDown),
        _ => None,
    }
}

impl Input for TerminalInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, Chip8Error> {
        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0)).map_err(frontend_error)? {
            if let Some(e) = translate(&event::read().map_err(frontend_error)?) {
                events.push(e);
            }
        }
        if !events.is_empty() {
            trace!("input {:?}", events);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_translates_keypad_keys() {
        assert_eq!(translate(&key(KeyCode::Char('v'))), Some(InputEvent::KeyDown(0xF)));
        assert_eq!(translate(&key(KeyCode::Char('X'))), Some(InputEvent::KeyDown(0x0)));
    }

    #[test]
    fn test_ignores_unmapped_keys() {
        assert_eq!(translate(&key(KeyCode::Char(' '))), None);
        assert_eq!(translate(&key(KeyCode::Tab)), None);
        assert_eq!(translate(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_enter_escape_and_ctrl_c_quit() {
        assert_eq!(translate(&key(KeyCode::Enter)), Some(InputEvent::Quit));
        assert_eq!(translate(&key(KeyCode::Esc)), Some(InputEvent::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c), Some(InputEvent::Quit));
    }
}
