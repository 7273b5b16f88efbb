//! catmouse CLI - Tabular Q-learning for a mouse evading a cat
//!
//! This CLI provides a unified interface for:
//! - Training a learner on the pursuit grid
//! - Inspecting the state encoding and rewards

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catmouse")]
#[command(version, about = "Q-learning for a mouse evading a cat on a grid", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the mouse for a fixed number of time-steps
    Train(Box<catmouse::cli::commands::train::TrainArgs>),

    /// Encode or decode a state and show its reward
    Inspect(catmouse::cli::commands::inspect::InspectArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => catmouse::cli::commands::train::execute(*args),
        Commands::Inspect(args) => catmouse::cli::commands::inspect::execute(args),
    }
}
