use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use emu8_core::CLOCK_SPEED;

mod buzzer;
mod keymap;
mod run;

/// A Chip-8 interpreter
///
/// Keys 1234/QWER/ASDF/ZXCV form the hex keypad, hold Space to run
/// unthrottled and press Escape to quit.
#[derive(Parser, Debug)]
#[command(name = "emu8", version)]
pub struct Args {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// CPU speed in instructions per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock_speed: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log more; repeat for more detail (-vvv traces every instruction)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG, if set, overrides the -v flags
    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();

    run::run(&args)
}
