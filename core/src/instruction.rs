use rand::RngCore;

use crate::errors::{Chip8Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// # Instruction
/// A decoded opcode with its operands pulled out.
///
/// Decoding is total: words that don't name an operation become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1nnn`
    Jump { addr: u16 },
    /// `2nnn`
    Call { addr: u16 },
    /// `3xkk`
    SkipEqImm { x: u8, kk: u8 },
    /// `4xkk`
    SkipNeImm { x: u8, kk: u8 },
    /// `5xy0`
    SkipEqReg { x: u8, y: u8 },
    /// `6xkk`
    LoadImm { x: u8, kk: u8 },
    /// `7xkk`
    AddImm { x: u8, kk: u8 },
    /// `8xy0`
    Move { x: u8, y: u8 },
    /// `8xy1`
    Or { x: u8, y: u8 },
    /// `8xy2`
    And { x: u8, y: u8 },
    /// `8xy3`
    Xor { x: u8, y: u8 },
    /// `8xy4`
    AddReg { x: u8, y: u8 },
    /// `8xy5`
    Sub { x: u8, y: u8 },
    /// `8xy6`
    ShiftRight { x: u8 },
    /// `8xy7`
    SubN { x: u8, y: u8 },
    /// `8xyE`
    ShiftLeft { x: u8 },
    /// `9xy0`
    SkipNeReg { x: u8, y: u8 },
    /// `Annn`
    LoadI { addr: u16 },
    /// `Bnnn`
    JumpV0 { addr: u16 },
    /// `Cxkk`
    Random { x: u8, kk: u8 },
    /// `Dxyn`
    Draw { x: u8, y: u8, n: u8 },
    /// `Ex9E`
    SkipPressed { x: u8 },
    /// `ExA1`
    SkipNotPressed { x: u8 },
    /// `Fx07`
    LoadDelay { x: u8 },
    /// `Fx0A`
    WaitKey { x: u8 },
    /// `Fx15`
    SetDelay { x: u8 },
    /// `Fx18`
    SetSound { x: u8 },
    /// `Fx1E`
    AddI { x: u8 },
    /// `Fx29`
    LoadFont { x: u8 },
    /// `Fx33`
    Bcd { x: u8 },
    /// `Fx55`
    Store { x: u8 },
    /// `Fx65`
    Read { x: u8 },
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Self {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.class() {
            0x0 => match n {
                0x0 => Instruction::Clear,
                0xE => Instruction::Return,
                _ => Instruction::Unknown(op),
            },
            0x1 => Instruction::Jump { addr },
            0x2 => Instruction::Call { addr },
            0x3 => Instruction::SkipEqImm { x, kk },
            0x4 => Instruction::SkipNeImm { x, kk },
            0x5 => Instruction::SkipEqReg { x, y },
            0x6 => Instruction::LoadImm { x, kk },
            0x7 => Instruction::AddImm { x, kk },
            0x8 => match n {
                0x0 => Instruction::Move { x, y },
                0x1 => Instruction::Or { x, y },
                0x2 => Instruction::And { x, y },
                0x3 => Instruction::Xor { x, y },
                0x4 => Instruction::AddReg { x, y },
                0x5 => Instruction::Sub { x, y },
                0x6 => Instruction::ShiftRight { x },
                0x7 => Instruction::SubN { x, y },
                0xE => Instruction::ShiftLeft { x },
                _ => Instruction::Unknown(op),
            },
            0x9 => Instruction::SkipNeReg { x, y },
            0xA => Instruction::LoadI { addr },
            0xB => Instruction::JumpV0 { addr },
            0xC => Instruction::Random { x, kk },
            0xD => Instruction::Draw { x, y, n },
            0xE => match kk {
                0x9E => Instruction::SkipPressed { x },
                0xA1 => Instruction::SkipNotPressed { x },
                _ => Instruction::Unknown(op),
            },
            0xF => match kk {
                0x07 => Instruction::LoadDelay { x },
                0x0A => Instruction::WaitKey { x },
                0x15 => Instruction::SetDelay { x },
                0x18 => Instruction::SetSound { x },
                0x1E => Instruction::AddI { x },
                0x29 => Instruction::LoadFont { x },
                0x33 => Instruction::Bcd { x },
                0x55 => Instruction::Store { x },
                0x65 => Instruction::Read { x },
                _ => Instruction::Unknown(op),
            },
            _ => Instruction::Unknown(op),
        }
    }

    /// Applies the instruction to `state`.
    ///
    /// Expects the pc to already point at the following instruction.
    pub fn execute(self, state: &mut State, rng: &mut dyn RngCore) -> Result<()> {
        match self {
            Instruction::Clear => clr(state),
            Instruction::Return => rts(state)?,
            Instruction::Jump { addr } => jump(state, addr),
            Instruction::Call { addr } => call(state, addr)?,
            Instruction::SkipEqImm { x, kk } => ske(state, x, kk),
            Instruction::SkipNeImm { x, kk } => skne(state, x, kk),
            Instruction::SkipEqReg { x, y } => skre(state, x, y),
            Instruction::LoadImm { x, kk } => load(state, x, kk),
            Instruction::AddImm { x, kk } => add(state, x, kk),
            Instruction::Move { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y),
            Instruction::And { x, y } => and(state, x, y),
            Instruction::Xor { x, y } => xor(state, x, y),
            Instruction::AddReg { x, y } => addr(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::ShiftRight { x } => shr(state, x),
            Instruction::SubN { x, y } => subn(state, x, y),
            Instruction::ShiftLeft { x } => shl(state, x),
            Instruction::SkipNeReg { x, y } => skrne(state, x, y),
            Instruction::LoadI { addr } => loadi(state, addr),
            Instruction::JumpV0 { addr } => jumpi(state, addr),
            Instruction::Random { x, kk } => rand(state, rng, x, kk),
            Instruction::Draw { x, y, n } => draw(state, x, y, n)?,
            Instruction::SkipPressed { x } => skpr(state, x),
            Instruction::SkipNotPressed { x } => skup(state, x),
            Instruction::LoadDelay { x } => moved(state, x),
            Instruction::WaitKey { x } => keyd(state, x),
            Instruction::SetDelay { x } => loads(state, x),
            Instruction::SetSound { x } => ld(state, x),
            Instruction::AddI { x } => addi(state, x),
            Instruction::LoadFont { x } => ldspr(state, x),
            Instruction::Bcd { x } => bcd(state, x)?,
            Instruction::Store { x } => stor(state, x)?,
            Instruction::Read { x } => read(state, x)?,
            Instruction::Unknown(op) => return Err(Chip8Error::UnknownOpcode(op)),
        }
        Ok(())
    }
}
