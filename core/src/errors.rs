use std::io;

use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// Everything that can go wrong while loading or running a program
#[derive(Debug, Error)]
pub enum Chip8Error {
    /// A memory or stack access outside of its valid range. Always fatal.
    #[error("out of bounds: {0}")]
    OutOfBounds(Fault),

    /// An instruction word that doesn't match any known operation.
    /// Reported and skipped rather than stopping the machine.
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("unable to load ROM: {0}")]
    Load(#[from] LoadError),

    /// Failure reported by a rendering or input collaborator
    #[error("frontend error: {0}")]
    Frontend(String),
}

impl Chip8Error {
    /// Whether the machine has to stop running after this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Chip8Error::UnknownOpcode(_))
    }
}

/// The specific range that was violated by an `OutOfBounds` error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("memory address {address:#06X}")]
    Memory { address: usize },

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("ROM is {size} bytes but at most {} fit in memory", MAX_ROM_SIZE)]
    TooLarge { size: usize },
}

impl From<Fault> for Chip8Error {
    fn from(fault: Fault) -> Self {
        Chip8Error::OutOfBounds(fault)
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_opcode_is_not_fatal() {
        assert!(!Chip8Error::UnknownOpcode(0x5121).is_fatal());
    }

    #[test]
    fn test_faults_are_fatal() {
        assert!(Chip8Error::from(Fault::StackOverflow).is_fatal());
        assert!(Chip8Error::from(LoadError::TooLarge { size: 4000 }).is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = Chip8Error::from(Fault::Memory { address: 0x1000 });
        assert_eq!(err.to_string(), "out of bounds: memory address 0x1000");
        assert_eq!(
            Chip8Error::UnknownOpcode(0xE1FF).to_string(),
            "unknown opcode 0xE1FF"
        );
        assert_eq!(
            LoadError::TooLarge { size: 3585 }.to_string(),
            "ROM is 3585 bytes but at most 3584 fit in memory"
        );
    }
}
