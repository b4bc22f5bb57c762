use thiserror::Error;

/// Conditions that stop the Chip-8 dead; the machine defines no way to recover from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("memory access of {len} byte(s) at {addr:#05X} is out of bounds")]
    OutOfBounds { addr: usize, len: usize },

    #[error("returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("call stack overflowed")]
    StackOverflow,

    #[error("unable to handle opcode {0:04X}")]
    UnknownOpcode(u16),

    #[error("program is {size} bytes but only {max} bytes fit in memory")]
    ProgramTooLarge { size: usize, max: usize },
}

/// A [`Fault`] raised while executing the instruction at `pc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{fault} (pc {pc:#05X})")]
pub struct CycleFault {
    pub pc: u16,
    #[source]
    pub fault: Fault,
}
