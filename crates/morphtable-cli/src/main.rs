//! morphtable CLI - render, play and preview wavetable notes.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "morphtable")]
#[command(author, version, about = "Morphing wavetable synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a note to a WAV file
    Render(commands::render::RenderArgs),

    /// Play a note on an output device
    Play(commands::play::PlayArgs),

    /// Print preview samples of a waveform or the whole table
    Preview(commands::preview::PreviewArgs),

    /// Show notes, output devices or the resolved configuration
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
