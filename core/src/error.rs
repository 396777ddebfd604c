use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading or running a ROM.
///
/// None of these are fatal: the offending instruction is abandoned and the
/// caller decides whether to keep stepping.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("stack overflow: call at {pc:#06X} with {depth} subroutines already nested", depth = crate::constants::STACK_DEPTH)]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {0}")]
    RomUnreadable(#[from] io::Error),

    #[error("unknown opcode {opcode:#06X} at {pc:#06X}")]
    UnknownOpcode { opcode: u16, pc: u16 },
}

impl Chip8Error {
    /// Whether the error came from loading a ROM rather than executing one
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Chip8Error::RomTooLarge { .. } | Chip8Error::RomUnreadable(_)
        )
    }
}
