//! Ritmo CLI - command-line interface for graph compositions.

mod commands;
mod player;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ritmo")]
#[command(author, version, about = "Ritmo graph composition CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter composition file
    Init(commands::init::InitArgs),

    /// Print the nodes, edges, and delays of a composition
    Show(commands::show::ShowArgs),

    /// Play a composition against the wall clock
    Play(commands::play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Play(args) => commands::play::run(args),
    }
}
