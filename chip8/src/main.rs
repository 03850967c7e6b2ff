use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use chip8_core::constants::DEFAULT_INSTRUCTIONS_PER_FRAME;
use chip8_core::{Chip8Error, Config, KeypadMode};

use run::Frontend;

mod run;

/// Runs a CHIP-8 program in an SDL2 window or in the terminal.
///
/// Keypad:
///   1 2 3 4
///   Q W E R
///   A S D F
///   Z X C V
/// Escape quits; so does Enter in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, verbatim_doc_comment)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Instructions executed per frame
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_FRAME)]
    ipf: usize,

    /// Frames per second; the timers tick once per frame
    #[arg(long, default_value_t = 60)]
    frame_rate: u32,

    /// Where to draw the screen and read keys from
    #[arg(long, value_enum, default_value = "sdl")]
    frontend: Frontend,

    /// Whether keys stay pressed while held or only for the frame they went down in
    /// [default: held for sdl, latched for terminal]
    #[arg(long, verbatim_doc_comment)]
    keypad: Option<KeypadMode>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Size of each CHIP-8 pixel in screen pixels
    #[arg(long, default_value_t = 10)]
    scale: usize,

    /// Quit after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            instructions_per_frame: self.ipf,
            frame_rate: self.frame_rate,
            keypad_mode: self
                .keypad
                .unwrap_or_else(|| self.frontend.default_keypad_mode()),
            seed: self.seed,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = run::run(
        &args.rom,
        args.config(),
        args.frontend,
        args.scale,
        args.frames,
    );
    process::exit(exit_code(result));
}

/// Reports a failed run through the logger and picks the process exit status
fn exit_code(result: Result<(), Chip8Error>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(&["chip8", "game.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("game.ch8"));
        assert_eq!(args.scale, 10);
        assert_eq!(args.frames, None);
        assert_eq!(args.frontend, Frontend::Sdl);
        assert_eq!(args.config(), Config::default());
    }

    #[test]
    fn test_terminal_latches_keys_by_default() {
        let args = Args::try_parse_from(&["chip8", "game.ch8", "--frontend", "terminal"]).unwrap();
        assert_eq!(args.frontend, Frontend::Terminal);
        assert_eq!(args.config().keypad_mode, KeypadMode::Latched);

        let args = Args::try_parse_from(&[
            "chip8", "game.ch8", "--frontend", "terminal", "--keypad", "held",
        ])
        .unwrap();
        assert_eq!(args.config().keypad_mode, KeypadMode::Held);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from(&[
            "chip8", "game.ch8", "--ipf", "12", "--keypad", "latched", "--seed", "3",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.instructions_per_frame, 12);
        assert_eq!(config.keypad_mode, KeypadMode::Latched);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(Ok(())), 0);
        assert_eq!(exit_code(Err(Chip8Error::Frontend("no display".into()))), 1);
    }

    #[test]
    fn test_rejects_unknown_keypad_mode() {
        assert!(Args::try_parse_from(&["chip8", "game.ch8", "--keypad", "sticky"]).is_err());
    }
}
