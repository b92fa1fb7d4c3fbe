//! Note table, output devices and configuration display.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use morphtable_config::SynthConfig;
use morphtable_core::Note;
use morphtable_io::{default_output_device, list_output_devices};

#[derive(Args)]
pub struct InfoArgs {
    #[command(subcommand)]
    command: Option<InfoCommand>,
}

#[derive(Subcommand)]
enum InfoCommand {
    /// Print semitone indices, note names and frequencies
    Notes {
        /// First note (name or semitone index)
        #[arg(long, default_value = "C3")]
        from: String,

        /// Last note (name or semitone index)
        #[arg(long, default_value = "C5")]
        to: String,
    },

    /// List output devices
    Devices,

    /// Print the resolved engine configuration as TOML
    Config {
        /// Configuration file to load (defaults are used otherwise)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the configuration to this path as well
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(InfoCommand::Notes {
        from: "C3".to_string(),
        to: "C5".to_string(),
    }) {
        InfoCommand::Notes { from, to } => {
            let from = parse_note(&from)?;
            let to = parse_note(&to)?;
            for line in note_table(from, to) {
                println!("{line}");
            }
        }

        InfoCommand::Devices => {
            let devices = list_output_devices()?;
            if devices.is_empty() {
                println!("No output devices found.");
                return Ok(());
            }

            let default_name = default_output_device()?.map(|d| d.name);
            println!("Output Devices:");
            for (idx, device) in devices.iter().enumerate() {
                let marker = if default_name.as_deref() == Some(device.name.as_str()) {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "  [{}] {} ({} Hz, {} ch){}",
                    idx, device.name, device.default_sample_rate, device.default_channels, marker
                );
            }
            println!();
            println!("Tip: Use device index or partial name with --output:");
            println!("  morphtable play --output 0 --note A4");
        }

        InfoCommand::Config { config, save } => {
            let config = match config {
                Some(path) => SynthConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => SynthConfig::default(),
            };
            print!("{}", config.to_toml()?);
            if let Some(path) = save {
                config.save(&path)?;
                println!();
                println!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Accept either a note name (`A4`) or a raw semitone index (`49`).
fn parse_note(s: &str) -> anyhow::Result<Note> {
    match s.trim().parse::<i32>() {
        Ok(semitone) => Ok(Note::new(semitone)?),
        Err(_) => Ok(Note::from_name(s)?),
    }
}

/// One formatted row per semitone from `from` to `to`, inclusive, in either order.
fn note_table(from: Note, to: Note) -> Vec<String> {
    let (lo, hi) = if from.semitone() <= to.semitone() {
        (from.semitone(), to.semitone())
    } else {
        (to.semitone(), from.semitone())
    };

    let mut lines = vec![format!("{:>5}  {:<5} {:>10}", "Index", "Note", "Hz")];
    lines.extend(
        (lo..=hi)
            .filter_map(|s| Note::new(s).ok())
            .map(|note| {
                format!(
                    "{:>5}  {:<5} {:>10.2}",
                    note.semitone(),
                    note.note_name(),
                    note.frequency()
                )
            }),
    );
    lines
}
