use crate::constants::{MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Fault;

/// # Memory
/// 4095 bytes of flat, byte addressable memory.
///
/// - `0x000..0x050` holds the sprite sheet
/// - `0x200..` is where programs are loaded
///
/// Every access is bounds checked; the address register is 16 bits wide so
/// instructions indexing off of it can run past the end.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> Result<u8, Fault> {
        Ok(self.read_range(addr, 1)?[0])
    }

    pub fn write(&mut self, addr: u16, byte: u8) -> Result<(), Fault> {
        self.write_range(addr, &[byte])
    }

    pub fn read_range(&self, addr: u16, len: usize) -> Result<&[u8], Fault> {
        let range = Self::checked_range(addr as usize, len)?;
        Ok(&self.bytes[range])
    }

    pub fn write_range(&mut self, addr: u16, data: &[u8]) -> Result<(), Fault> {
        let range = Self::checked_range(addr as usize, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Copy a program into memory at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `program` raw program bytes; rejected if they would run past the end of memory
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Fault> {
        let max = MEMORY_SIZE - PROGRAM_START as usize;
        if program.len() > max {
            return Err(Fault::ProgramTooLarge {
                size: program.len(),
                max,
            });
        }
        self.write_range(PROGRAM_START, program)
    }

    fn checked_range(addr: usize, len: usize) -> Result<std::ops::Range<usize>, Fault> {
        match addr.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(addr..end),
            _ => Err(Fault::OutOfBounds { addr, len }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
