use log::trace;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use chip8_core::{Chip8Error, Input, InputEvent};

use crate::keymap::keymap;

/// # Keyboard Input
/// Translates SDL2 keyboard events into keypad events using `keymap`.
///
/// Closing the window or pressing Escape asks the scheduler to quit.
pub struct KeyboardInput {
    events: EventPump,
}

impl KeyboardInput {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, Chip8Error> {
        let events = sdl.event_pump().map_err(Chip8Error::Frontend)?;
        Ok(KeyboardInput { events })
    }
}

/// Maps a single SDL2 event, ignoring anything that isn't on the keypad
fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. }
        | Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(key),
            repeat: false,
            ..
        } => keymap(*key).map(InputEvent::KeyDown),
        Event::KeyUp {
            keycode: Some(key), ..
        } => keymap(*key).map(InputEvent::KeyUp),
        _ => None,
    }
}

impl Input for KeyboardInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, Chip8Error> {
        let events: Vec<InputEvent> = self.events.poll_iter().filter_map(|e| translate(&e)).collect();
        if !events.is_empty() {
            trace!("input {:?}", events);
        }
        Ok(events)
    }
}
