use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chip8_core::{DEFAULT_HISTORY_LENGTH, DEFAULT_INSTRUCTIONS_PER_FRAME};

use crate::run::{run, Settings};

mod keymap;
mod run;

/// Run a Chip-8 program.
///
/// Keys 1234/QWER/ASDF/ZXCV are the hex keypad; hold Space to fast forward
/// and Escape to rewind.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the program to run
    rom: PathBuf,

    /// Instructions executed per rendered frame
    #[arg(
        default_value_t = DEFAULT_INSTRUCTIONS_PER_FRAME,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    ipf: u32,

    /// Window title; defaults to the program path
    #[arg(short, long)]
    title: Option<String>,

    /// Size of each Chip-8 pixel in screen pixels
    #[arg(short, long, default_value_t = 16)]
    scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames that can be rewound
    #[arg(long, default_value_t = DEFAULT_HISTORY_LENGTH)]
    history: usize,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        let title = args
            .title
            .unwrap_or_else(|| args.rom.display().to_string());
        Settings {
            rom: args.rom,
            instructions_per_frame: args.ipf,
            title,
            scale: args.scale,
            seed: args.seed,
            history: args.history,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(Args::parse().into())
}
