//! Offline note rendering to WAV.

use std::path::PathBuf;

use clap::Args;
use morphtable_io::WavSink;

use super::common::SynthArgs;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Bit depth (16, 24 or 32-bit float)
    #[arg(long, default_value = "32", value_parser = ["16", "24", "32"])]
    bits: String,

    #[command(flatten)]
    synth: SynthArgs,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let bits: u16 = args.bits.parse()?;
    let sink = WavSink::new(&args.output).with_bits_per_sample(bits);
    let (mut synth, note) = args.synth.build_synth(sink)?;

    println!("Rendering {note}...");
    synth.note_on(note)?;

    let table = synth.wavetable();
    println!(
        "  {} segments x {} samples, {} channel(s), {} Hz",
        table.total_waveforms_count(),
        synth.settings().single_waveform_len(),
        synth.settings().channels,
        synth.settings().sample_rate,
    );
    println!(
        "  {:.2}s written to {}",
        synth.note_duration_secs(),
        args.output.display()
    );

    Ok(())
}
