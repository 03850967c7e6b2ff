pub use display::Display;
pub use input::KeyboardInput;
pub use keymap::keymap;

mod display;
mod input;
mod keymap;
