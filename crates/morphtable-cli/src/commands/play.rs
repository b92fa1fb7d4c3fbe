//! Live note playback.

use std::time::Duration;

use clap::Args;
use morphtable_io::CpalSink;

use super::common::SynthArgs;

#[derive(Args)]
pub struct PlayArgs {
    /// Output device (index, exact name, or partial name)
    #[arg(short, long)]
    output: Option<String>,

    #[command(flatten)]
    synth: SynthArgs,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let sink = CpalSink::new(args.output.as_deref())?;
    println!("Output: {}", sink.device_name());

    let (mut synth, note) = args.synth.build_synth(sink)?;
    let duration = synth.note_duration_secs();

    println!(
        "Playing {note} ({} segments, {duration:.2}s)...",
        synth.wavetable().total_waveforms_count()
    );
    synth.note_on(note)?;

    // Allow the device buffer to drain past the nominal length.
    let timeout = Duration::from_secs_f32(duration) + Duration::from_secs(1);
    if !synth.sink().wait(timeout) {
        tracing::warn!(timeout_secs = timeout.as_secs_f32(), "playback did not finish");
        synth.sink_mut().stop();
    }

    println!("Done.");
    Ok(())
}
