use anyhow::{Context, Result};
use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture
const CHANNELS: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The display only gets a call to `update` when the Chip-8 FrameBuffer changes,
/// but `present` is called every frame; the texture is stretched to fill the window.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    pixels: Vec<u8>,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(anyhow::Error::msg)?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .context("unable to create window")?;
        let canvas = window
            .into_canvas()
            .present_vsync()
            .build()
            .context("unable to create canvas")?;

        Ok(Display {
            canvas,
            pixels: vec![0; DISPLAY_WIDTH * DISPLAY_HEIGHT * CHANNELS],
        })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Unpacking each row's bits, most significant (leftmost pixel) first
    /// - Triplicating each pixel to represent its RGB values
    /// - Mapping on/off to 255/0 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .iter()
            .flat_map(|&row| (0..DISPLAY_WIDTH).rev().map(move |bit| row >> bit & 0x1 == 0x1))
            .flat_map(|on| std::iter::repeat(if on { 255 } else { 0 }).take(CHANNELS))
            .collect()
    }

    /// Replaces the picture shown by subsequent calls to `present`.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn update(&mut self, frame: &FrameBuffer) {
        self.pixels = Display::frame_to_sdl_texture(frame);
    }

    /// Renders the last picture passed to `update` and presents it, waiting for vsync.
    pub fn present(&mut self) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .context("unable to create texture")?;

        let pixels = &self.pixels;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded out past width * CHANNELS
                let row_bytes = DISPLAY_WIDTH * CHANNELS;
                for (y, row) in pixels.chunks(row_bytes).enumerate() {
                    buffer[y * pitch..y * pitch + row_bytes].copy_from_slice(row);
                }
            })
            .map_err(anyhow::Error::msg)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(anyhow::Error::msg)?;
        self.canvas.present();
        Ok(())
    }
}
