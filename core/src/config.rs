use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_INSTRUCTIONS_PER_FRAME, TIMER_FREQUENCY};

/// How long a key stays pressed from the machine's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadMode {
    /// A key is pressed from its key-down event until its key-up event
    Held,
    /// A key is pressed only for the frame in which its key-down event arrived
    Latched,
}

impl Default for KeypadMode {
    fn default() -> Self {
        KeypadMode::Held
    }
}

impl FromStr for KeypadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "held" => Ok(KeypadMode::Held),
            "latched" => Ok(KeypadMode::Latched),
            other => Err(format!(
                "unknown keypad mode '{}', expected 'held' or 'latched'",
                other
            )),
        }
    }
}

impl fmt::Display for KeypadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypadMode::Held => write!(f, "held"),
            KeypadMode::Latched => write!(f, "latched"),
        }
    }
}

/// # Config
/// Runtime settings for a `Chip8` and the `Scheduler` driving it.
///
/// - `instructions_per_frame` how many instructions run between timer ticks
/// - `frame_rate` frames per second; timers tick once per frame
/// - `keypad_mode` whether key presses persist across frames
/// - `seed` fixes the random number generator used by `Cxkk`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub instructions_per_frame: usize,
    pub frame_rate: u32,
    pub keypad_mode: KeypadMode,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_frame: DEFAULT_INSTRUCTIONS_PER_FRAME,
            frame_rate: TIMER_FREQUENCY,
            keypad_mode: KeypadMode::default(),
            seed: None,
        }
    }
}
