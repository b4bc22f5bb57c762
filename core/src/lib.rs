pub use chip8::Chip8;
pub use constants::{DEFAULT_HISTORY_LENGTH, DEFAULT_INSTRUCTIONS_PER_FRAME};
pub use error::{CycleFault, Fault};
pub use frame_buffer::FrameBuffer;
pub use keypad::Keypad;
pub use state::Execution;
pub use timers::Timer;

mod chip8;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
mod state;
pub mod timers;
