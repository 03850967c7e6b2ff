use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::ValueEnum;
use log::info;

use chip8_core::{Chip8, Chip8Error, Config, Exit, KeypadMode, LoadError, Scheduler};
use chip8_display::{Display, KeyboardInput};
use chip8_terminal::{TerminalDisplay, TerminalInput};

/// Where the screen is drawn and the keypad is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Frontend {
    /// An SDL2 window
    Sdl,
    /// The terminal the emulator was started in
    Terminal,
}

impl Frontend {
    /// Terminals never report key releases, so their keys are latched per frame
    pub fn default_keypad_mode(self) -> KeypadMode {
        match self {
            Frontend::Sdl => KeypadMode::Held,
            Frontend::Terminal => KeypadMode::Latched,
        }
    }
}

/// Loads `rom` and runs it on `frontend` until the user quits or `frames` frames pass
pub fn run(
    rom: &Path,
    config: Config,
    frontend: Frontend,
    scale: usize,
    frames: Option<u64>,
) -> Result<(), Chip8Error> {
    let mut scheduler = Scheduler::new(config.frame_rate);
    if let Some(frames) = frames {
        scheduler = scheduler.with_frame_limit(frames);
    }
    let mut chip8 = Chip8::new(config);

    // Load ROM before taking over the screen so a bad path fails fast
    let file = File::open(rom).map_err(LoadError::Io)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("loaded {}", rom.display());

    let exit = match frontend {
        Frontend::Sdl => {
            let sdl = sdl2_context()?;
            let mut display = Display::new(&sdl, scale)?;
            let mut input = KeyboardInput::new(&sdl)?;
            scheduler.run(&mut chip8, &mut input, &mut display)?
        }
        Frontend::Terminal => {
            // dropped before returning, which hands the terminal back
            let mut display = TerminalDisplay::new()?;
            let mut input = TerminalInput::new();
            scheduler.run(&mut chip8, &mut input, &mut display)?
        }
    };
    match exit {
        Exit::Quit => info!("quit"),
        Exit::FrameLimit => info!("reached frame limit"),
    }
    Ok(())
}

fn sdl2_context() -> Result<sdl2::Sdl, Chip8Error> {
    sdl2::init().map_err(Chip8Error::Frontend)
}
