use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::DEFAULT_HISTORY_LENGTH;
use crate::error::{CycleFault, Fault};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::registers::Registers;
use crate::state::{Execution, State};
use crate::timers::{Timer, Timers};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding, one per batch of cycles
///  - the `keypad` with public interfaces for manipulating it
///  - an injected random source for `Cxnn`
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing and rewinding the CPU
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R = StdRng> {
    state: State,
    previous_states: VecDeque<State>,
    history_length: usize,
    keypad: Keypad,
    rng: R,
}

impl Chip8<StdRng> {
    /// A machine whose random numbers are seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random numbers are reproducible
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Chip8<R> {
    pub fn with_rng(rng: R) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::new(),
            history_length: DEFAULT_HISTORY_LENGTH,
            keypad: Keypad::new(),
            rng,
        }
    }

    /// Keep at most `history_length` snapshots for `rewind`; 0 disables rewinding
    pub fn with_history(mut self, history_length: usize) -> Self {
        self.history_length = history_length;
        self.previous_states.truncate(history_length);
        self
    }

    /// Load a program into memory at 0x200
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Fault> {
        self.state.memory.load_program(program)?;
        tracing::debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the hex keypad key 0..F
    /// * `pressed` whether the key is now held down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set_key(key, pressed);
    }

    /// Runs `cycles` CPU cycles back to back, first saving a snapshot to rewind to.
    ///
    /// Stops at the first fault; the machine is left as the faulting cycle found it.
    pub fn run_cycles(&mut self, cycles: u32) -> Result<(), CycleFault> {
        self.save_state();
        for _ in 0..cycles {
            self.step()?;
        }
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - if either timer is running, ticks the timers and does nothing else
    /// - otherwise fetches, decodes and executes the opcode at the pc
    pub fn step(&mut self) -> Result<(), CycleFault> {
        if self.state.timers.is_busy() {
            self.state.timers.tick();
            return Ok(());
        }

        let pc = self.state.registers.pc();
        self.execute_next()
            .map_err(|fault| CycleFault { pc, fault })
    }

    fn execute_next(&mut self) -> Result<(), Fault> {
        let op = self.get_op()?;
        tracing::trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.registers.v_range(0xF),
            self.state.registers.i(),
            self.state.registers.pc()
        );

        self.state.registers.skip();
        let instruction = Instruction::decode(op)?;
        self.state.execute(instruction, &self.keypad, &mut self.rng)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<Opcode, Fault> {
        let bytes = self.state.memory.read_range(self.state.registers.pc(), 2)?;
        Ok(Opcode::from_bytes(bytes[0], bytes[1]))
    }

    /// Restores the snapshot taken before the last batch of cycles, if there is one.
    ///
    /// Returns whether anything was restored.
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.state.draw_flag = true;
                true
            }
            None => false,
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already `history_length` saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.history_length == 0 {
            return;
        }
        if self.previous_states.len() == self.history_length {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state.clone());
    }

    /// The current contents of the screen
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::take(&mut self.state.draw_flag) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the host should be making a sound
    pub fn is_sound_active(&self) -> bool {
        self.state.timers.get(Timer::Sound) > 0
    }

    pub fn execution(&self) -> Execution {
        self.state.execution
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn timers(&self) -> &Timers {
        &self.state.timers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}

impl Default for Chip8<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}
