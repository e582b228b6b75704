//! rps CLI - Play against, simulate, and inspect the adaptive RPS bot
//!
//! This CLI provides a unified interface for:
//! - Playing the bot interactively on the terminal
//! - Simulating matches against scripted opponents
//! - Inspecting how the recency window scales with session length

use anyhow::Result;
use clap::{Parser, Subcommand};
use rps_entropy::cli::commands::{play, simulate, window};

#[derive(Parser)]
#[command(name = "rps")]
#[command(version, about = "Adaptive Rock/Paper/Scissors bot", long_about = None)]
struct Cli {
    /// Log decision internals (same as RUST_LOG=debug)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the bot on the terminal
    Play(play::PlayArgs),

    /// Simulate matches against a scripted opponent
    Simulate(simulate::SimulateArgs),

    /// Show the recency window length for a session length
    Window(window::WindowArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::Simulate(args) => simulate::execute(args),
        Commands::Window(args) => window::execute(args),
    }
}
