use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::Chip8;
use chip8_display::Display;

use crate::keymap::keymap;

/// How many times faster than normal to run while fast forwarding
const FAST_FORWARD_FACTOR: u32 = 4;

/// One frame at 60Hz
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// How long to sleep to stretch a frame that took `elapsed` out to `FRAME_TIME`
fn frame_delay(elapsed: Duration) -> Option<Duration> {
    FRAME_TIME.checked_sub(elapsed).filter(|delay| !delay.is_zero())
}

/// Everything needed to start a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rom: PathBuf,
    pub instructions_per_frame: u32,
    pub title: String,
    pub scale: u32,
    pub seed: Option<u64>,
    pub history: usize,
}

pub fn run(settings: Settings) -> Result<()> {
    let program = std::fs::read(&settings.rom)
        .with_context(|| format!("{} could not be read", settings.rom.display()))?;

    let chip8 = match settings.seed {
        Some(seed) => Chip8::from_seed(seed),
        None => Chip8::new(),
    };
    let mut chip8 = chip8.with_history(settings.history);
    chip8
        .load_program(&program)
        .with_context(|| format!("unable to load {}", settings.rom.display()))?;

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, &settings.title, settings.scale)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    tracing::info!(
        "running {} at {} instructions per frame",
        settings.rom.display(),
        settings.instructions_per_frame
    );

    // Whether frames should run several batches of instructions
    let mut fast_forward: bool = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind: bool = false;
    let mut sound_active = false;

    // Set initial timing
    let mut last_frame: Instant = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.set_key(kc, true),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.set_key(kc, false),
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            chip8.rewind();
        } else {
            let batches = if fast_forward { FAST_FORWARD_FACTOR } else { 1 };
            for _ in 0..batches {
                if let Err(fault) = chip8.run_cycles(settings.instructions_per_frame) {
                    tracing::error!("{}", fault);
                    return Err(fault).context("emulated program crashed");
                }
            }
        }

        if chip8.is_sound_active() != sound_active {
            sound_active = !sound_active;
            tracing::debug!("sound {}", if sound_active { "on" } else { "off" });
        }

        // Present every frame, redrawing the texture only if the frame changed
        if let Some(frame) = chip8.take_frame() {
            display.update(frame);
        }
        display.present()?;

        // Handle timing; vsync may be unavailable or faster than 60Hz
        let elapsed = last_frame.elapsed();
        if !fast_forward {
            if let Some(delay) = frame_delay(elapsed) {
                std::thread::sleep(delay);
            }
        }
        last_frame = Instant::now();
    }

    Ok(())
}
