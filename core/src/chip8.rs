use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, KeypadMode};
use crate::constants::{KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START};
use crate::errors::{LoadError, Result};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random number generator used by `Cxkk`
///  - the `config` it was created with
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction or one frame at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    rng: StdRng,
    config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            rng,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the whole machine
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Puts the machine back into its power-on state, discarding any loaded program
    pub fn reset(&mut self) {
        debug!("resetting machine state");
        self.state = State::new();
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        // read one byte more than fits so oversized images can be told apart
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)
            .map_err(LoadError::Io)?;
        self.load_program(&rom)
    }

    /// Copies a program image into memory at 0x200.
    /// Memory is untouched if the image doesn't fit.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge { size: rom.len() }.into());
        }
        self.state.write_slice(PROGRAM_START as usize, rom)?;
        debug!("loaded {} byte program at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a sound collaborator should currently be beeping
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hexadecimal value of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// Latched keys stay down until the end of the frame they were pressed in,
    /// so a release arriving in the same frame is ignored.
    ///
    /// # Arguments
    /// * `key` the hexadecimal value of the key that was released
    pub fn key_release(&mut self, key: u8) {
        if self.config.keypad_mode == KeypadMode::Latched {
            trace!("key {:#04X} released; held until end of frame", key);
            return;
        }
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.keypad.get_mut(key as usize) {
            Some(slot) => *slot = pressed,
            None => warn!("ignoring key {:#04X}; keys range from 0x0 to {:#X}", key, KEY_COUNT - 1),
        }
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    ///
    /// Unknown opcodes are logged and skipped; every other error is fatal.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.state.read_word(pc as usize)?;
        trace!(
            "{:04X} pc{:04X} i{:04X} v{:02X?}",
            op,
            pc,
            self.state.i,
            self.state.v
        );
        self.state.pc = pc.wrapping_add(2);

        match Instruction::decode(op).execute(&mut self.state, &mut self.rng) {
            Err(e) if !e.is_fatal() => {
                debug!("{} at {:#05X}; skipping", e, pc);
                Ok(())
            }
            result => result,
        }
    }

    /// Runs one frame's worth of work
    /// - executes `instructions_per_frame` instructions
    /// - ticks the timers once
    /// - forgets key presses if keys are latched per frame
    pub fn run_frame(&mut self) -> Result<()> {
        for _ in 0..self.config.instructions_per_frame {
            self.step()?;
        }
        self.tick_timers();
        if self.config.keypad_mode == KeypadMode::Latched {
            self.state.keypad = [false; KEY_COUNT];
        }
        Ok(())
    }

    /// Decrements each non-zero timer by one
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
