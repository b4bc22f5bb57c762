use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::Fault;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
/// - a call stack of up to `STACK_DEPTH` return addresses
#[derive(Clone)]
pub struct Registers {
    v: [u8; 16],
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    /// Vx; `x` comes from an opcode nibble so only its low 4 bits are used
    pub fn v(&self, x: u8) -> u8 {
        self.v[(x & 0xF) as usize]
    }

    pub fn set_v(&mut self, x: u8, value: u8) {
        self.v[(x & 0xF) as usize] = value;
    }

    /// V0..=Vx
    pub fn v_range(&self, x: u8) -> &[u8] {
        &self.v[..=(x & 0xF) as usize]
    }

    /// Overwrite V0..V(len - 1)
    pub fn set_v_range(&mut self, values: &[u8]) {
        self.v[..values.len()].copy_from_slice(values);
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, i: u16) {
        self.i = i;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    /// Skip over the next instruction
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        let slot = self.stack.get_mut(self.sp).ok_or(Fault::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        self.sp = self.sp.checked_sub(1).ok_or(Fault::StackUnderflow)?;
        Ok(self.stack[self.sp])
    }

    /// Number of return addresses currently on the call stack
    pub fn stack_depth(&self) -> usize {
        self.sp
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
