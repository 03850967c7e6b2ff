use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SPRITE_SHEET, STACK_SIZE,
};
use crate::errors::Fault;

/// The FrameBuffer is indexed as [row][col]; each pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # State
/// Everything the Chip-8 can see and change.
///
/// ## CPU
/// Registers
/// - (v) 16 8-bit registers (V0..VF)
///     - VF doubles as the carry/borrow/collision flag and is clobbered by
///       any instruction that sets a flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses currently on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz while non-zero
///
/// ## Memory
/// - a stack of 16 return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the hexadecimal font
///     - programs are loaded at 0x200
/// - a 32x64 frame buffer and a flag tracking unsampled changes to it
///
/// ## Input
/// - 16 booleans tracking the pressed status of keys 0..F
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: [bool; KEY_COUNT],
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [false; KEY_COUNT],
        }
    }

    /// Reads the byte at `address`
    pub fn read_byte(&self, address: usize) -> Result<u8, Fault> {
        self.memory
            .get(address)
            .copied()
            .ok_or(Fault::Memory { address })
    }

    /// Reads the big-endian instruction word at `address`
    pub fn read_word(&self, address: usize) -> Result<u16, Fault> {
        let high = u16::from(self.read_byte(address)?);
        let low = u16::from(self.read_byte(address + 1)?);
        Ok(high << 8 | low)
    }

    /// Borrows `len` bytes of memory starting at `address`
    pub fn read_slice(&self, address: usize, len: usize) -> Result<&[u8], Fault> {
        Self::check_range(address, len)?;
        Ok(&self.memory[address..address + len])
    }

    /// Copies `data` into memory starting at `address`.
    /// Nothing is written unless all of `data` fits.
    pub fn write_slice(&mut self, address: usize, data: &[u8]) -> Result<(), Fault> {
        Self::check_range(address, data.len())?;
        self.memory[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Pushes a return address
    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        let slot = self.stack.get_mut(self.sp).ok_or(Fault::StackOverflow)?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recently pushed return address
    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    /// The lowest numbered key that is currently pressed
    pub fn first_pressed_key(&self) -> Option<u8> {
        self.keypad.iter().position(|&pressed| pressed).map(|key| key as u8)
    }

    fn check_range(address: usize, len: usize) -> Result<(), Fault> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(()),
            // report the first address that doesn't exist
            _ => Err(Fault::Memory {
                address: address.max(MEMORY_SIZE),
            }),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
