/// Number of addressable bytes; the last valid address is `0xFFE`
pub const MEMORY_SIZE: usize = 0xFFF;

/// Programs are loaded at, and execution starts from, this address
pub const PROGRAM_START: u16 = 0x200;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Maximum depth of nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Default number of CPU cycles the host runs per rendered frame
pub const DEFAULT_INSTRUCTIONS_PER_FRAME: u32 = 11;

/// Default number of frame snapshots kept for rewinding (ten seconds at 60Hz)
pub const DEFAULT_HISTORY_LENGTH: usize = 600;

/// Each glyph in the sprite sheet is 5 bytes tall
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Built-in 4x5 glyphs for the hex digits 0..F, resident at address 0x000.
///
/// Each byte is one row of a glyph; only the high nibble is drawn.
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
