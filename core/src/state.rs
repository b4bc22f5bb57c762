use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// Whether the CPU is executing normally or parked on an `Fx0A` key wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    Running,
    /// Fx0A is re-executed every cycle until a key is held; the key lands in V`register`
    WaitingForKey { register: u8 },
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - `registers`: V0..VF, I, the program counter and the call stack
/// - `timers`: the delay and sound timers
/// - `execution`: running or waiting on a key
///
/// ## Memory
/// - 4095 bytes of addressable memory
/// - a 64x32 frame buffer storing the contents of the next frame to be drawn
///
/// The keypad and random source are not part of the snapshot;
/// they belong to the host and are left alone when rewinding.
#[derive(Clone)]
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub timers: Timers,
    pub frame_buffer: FrameBuffer,
    pub execution: Execution,
    /// Set whenever `frame_buffer` changes
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        State {
            memory: Memory::new(),
            registers: Registers::new(),
            timers: Timers::new(),
            frame_buffer: FrameBuffer::new(),
            execution: Execution::Running,
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
