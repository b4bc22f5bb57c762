use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Each row is packed into a `u64` with the leftmost pixel (x = 0) in the most
/// significant bit, so a sprite row can be XORed onto the screen in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [u64; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            rows: [0; DISPLAY_HEIGHT],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; DISPLAY_HEIGHT];
    }

    /// Whether the pixel at (x, y) is on; coordinates wrap around the screen
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let column = x % DISPLAY_WIDTH;
        self.rows[y % DISPLAY_HEIGHT] & (1u64 << (DISPLAY_WIDTH - 1 - column)) != 0
    }

    /// The packed rows, top to bottom
    pub fn rows(&self) -> &[u64; DISPLAY_HEIGHT] {
        &self.rows
    }

    /// XORs an 8 pixel wide sprite onto the screen with its top left corner at (x, y).
    /// Pixels that fall off the right or bottom edge wrap around to the opposite side.
    ///
    /// Returns true if any pixel was turned off.
    ///
    /// # Arguments
    /// * `x` the column of the sprite's left edge
    /// * `y` the row of the sprite's top edge
    /// * `sprite` one byte per row, most significant bit leftmost
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let shift = (x % DISPLAY_WIDTH) as u32;
        let mut collided = false;

        for (offset, &byte) in sprite.iter().enumerate() {
            let row = &mut self.rows[(y + offset) % DISPLAY_HEIGHT];
            let mask = (u64::from(byte) << (DISPLAY_WIDTH - 8)).rotate_right(shift);
            collided |= *row & mask != 0;
            *row ^= mask;
        }

        collided
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
