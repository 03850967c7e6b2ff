//! A frontend that draws the Chip-8 screen in a terminal and reads the keypad from stdin.
//!
//! Terminals only report key presses, never releases, so this frontend is meant to be run
//! with `KeypadMode::Latched`.
pub use input::TerminalInput;
pub use keymap::keymap;
pub use screen::TerminalDisplay;

use chip8_core::Chip8Error;

mod input;
mod keymap;
mod screen;

fn frontend_error(e: impl ToString) -> Chip8Error {
    Chip8Error::Frontend(e.to_string())
}
