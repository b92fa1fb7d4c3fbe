//! Waveform and wavetable preview output.

use clap::{Args, ValueEnum};
use morphtable_synth::{MultiShapePreview, PreviewResolution, SingleWaveform, WaveTablePreview};

use super::common::SynthArgs;

/// What to preview
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PreviewTarget {
    /// First main waveform
    First,
    /// Last main waveform
    Last,
    /// Every segment of the wavetable
    #[default]
    Table,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// What to preview
    #[arg(short, long, value_enum, default_value_t = PreviewTarget::Table)]
    target: PreviewTarget,

    /// Preview at the note's pitch and sample rate instead of a fixed resolution
    #[arg(long)]
    at_note: bool,

    /// Draw an ASCII plot instead of printing samples
    #[arg(long)]
    plot: bool,

    /// Plot width in columns
    #[arg(long, default_value = "72")]
    width: usize,

    /// Plot height in rows
    #[arg(long, default_value = "15")]
    height: usize,

    #[command(flatten)]
    synth: SynthArgs,
}

pub fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let config = args.synth.resolve_config()?;
    let wavetable = args.synth.wavetable(&config)?;
    let settings = config.to_settings();
    let note = config.note()?;

    let waveform: &SingleWaveform = if args.target == PreviewTarget::Last {
        wavetable.last_main_waveform()
    } else {
        wavetable.first_main_waveform()
    };

    let mut samples: Vec<f32> = match (args.target, args.at_note) {
        (PreviewTarget::Table, false) => {
            WaveTablePreview::new(&wavetable, PreviewResolution::WAVETABLE).collect()
        }
        (PreviewTarget::Table, true) => {
            WaveTablePreview::for_note(&wavetable, note, &settings).collect()
        }
        (_, false) => MultiShapePreview::new(waveform, PreviewResolution::WAVEFORM).collect(),
        (_, true) => MultiShapePreview::for_note(
            waveform,
            note,
            settings.sample_rate_f32(),
            settings.single_waveform_len(),
        )
        .collect(),
    };
    normalize(&mut samples);
    tracing::debug!(samples = samples.len(), target = ?args.target, "preview rendered");

    if args.plot {
        for line in plot(&samples, args.width, args.height) {
            println!("{line}");
        }
    } else {
        for sample in &samples {
            println!("{sample:.6}");
        }
    }

    Ok(())
}

/// Scale `samples` so the largest magnitude is 1. Silence is left alone.
pub fn normalize(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        for s in samples.iter_mut() {
            *s /= peak;
        }
    }
}

/// Render samples in `[-1, 1]` as rows of text, one `*` per column.
pub fn plot(samples: &[f32], width: usize, height: usize) -> Vec<String> {
    let width = width.max(1);
    let height = height.max(2);
    let mut grid = vec![vec![' '; width]; height];
    let mid = (height - 1) / 2;
    grid[mid].fill('-');

    if !samples.is_empty() {
        for col in 0..width {
            let value = samples[col * samples.len() / width].clamp(-1.0, 1.0);
            let row = ((1.0 - value) * 0.5 * (height - 1) as f32).round() as usize;
            grid[row.min(height - 1)][col] = '*';
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}
