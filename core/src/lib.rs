pub use chip8::Chip8;
pub use config::{Config, KeypadMode};
pub use errors::{Chip8Error, Fault, LoadError};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use scheduler::{Exit, Input, InputEvent, Renderer, Scheduler};
pub use state::{FrameBuffer, State};

mod chip8;
mod config;
pub mod constants;
mod errors;
mod instruction;
mod opcode;
mod operations;
mod scheduler;
pub mod state;
