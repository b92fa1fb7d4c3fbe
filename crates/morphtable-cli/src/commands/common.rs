//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use morphtable_config::SynthConfig;
use morphtable_core::{AmplitudeEnvelope, Detune, Note, WaveformShape};
use morphtable_synth::{PlaybackSink, SingleWaveform, WaveTable, WaveTableSynth};

/// Waveform shapes for CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CliShape {
    #[default]
    Sine,
    Triangle,
    Square,
    Saw,
}

impl From<CliShape> for WaveformShape {
    fn from(shape: CliShape) -> Self {
        match shape {
            CliShape::Sine => WaveformShape::Sine,
            CliShape::Triangle => WaveformShape::Triangle,
            CliShape::Square => WaveformShape::Square,
            CliShape::Saw => WaveformShape::Saw,
        }
    }
}

/// Parse an `OCTAVE:SEMITONE` detune for clap's `value_parser`.
pub fn parse_detune(s: &str) -> Result<Detune, String> {
    let (octave, semitone) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid detune: '{s}' (expected OCTAVE:SEMITONE)"))?;
    let octave: i32 = octave
        .trim()
        .parse()
        .map_err(|_| format!("Invalid octave in detune '{s}'"))?;
    let semitone: i32 = semitone
        .trim()
        .parse()
        .map_err(|_| format!("Invalid semitone in detune '{s}'"))?;
    Detune::new(octave, semitone).map_err(|e| e.to_string())
}

/// Engine, note and wavetable options shared by every note-producing command.
#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    /// Engine configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Note to play, e.g. C3, A#4, Db5 (defaults to the configured note)
    #[arg(short, long)]
    pub note: Option<String>,

    /// Number of crossfade segments (defaults to the configured maximum)
    #[arg(short, long)]
    pub segments: Option<usize>,

    /// Segment length in seconds
    #[arg(long)]
    pub duration: Option<f32>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Output channel count
    #[arg(long)]
    pub channels: Option<u16>,

    /// Shape at the start of the first waveform
    #[arg(long, value_enum, default_value_t = CliShape::Sine)]
    pub first_start: CliShape,

    /// Shape at the end of the first waveform
    #[arg(long, value_enum, default_value_t = CliShape::Sine)]
    pub first_end: CliShape,

    /// Shape at the start of the last waveform
    #[arg(long, value_enum, default_value_t = CliShape::Sine)]
    pub last_start: CliShape,

    /// Shape at the end of the last waveform
    #[arg(long, value_enum, default_value_t = CliShape::Sine)]
    pub last_end: CliShape,

    /// Start detune of the first waveform (OCTAVE:SEMITONE)
    #[arg(long, value_parser = parse_detune, default_value = "0:0", allow_hyphen_values = true)]
    pub first_start_detune: Detune,

    /// End detune of the first waveform (OCTAVE:SEMITONE)
    #[arg(long, value_parser = parse_detune, default_value = "0:0", allow_hyphen_values = true)]
    pub first_end_detune: Detune,

    /// Start detune of the last waveform (OCTAVE:SEMITONE)
    #[arg(long, value_parser = parse_detune, default_value = "0:0", allow_hyphen_values = true)]
    pub last_start_detune: Detune,

    /// End detune of the last waveform (OCTAVE:SEMITONE)
    #[arg(long, value_parser = parse_detune, default_value = "0:0", allow_hyphen_values = true)]
    pub last_end_detune: Detune,

    /// Flat envelope level of the first waveform (0-1)
    #[arg(long)]
    pub first_level: Option<f32>,

    /// Flat envelope level of the last waveform (0-1)
    #[arg(long)]
    pub last_level: Option<f32>,
}

impl SynthArgs {
    /// Load the configuration file (or defaults) and apply command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<SynthConfig> {
        let mut config = match &self.config {
            Some(path) => SynthConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SynthConfig::default(),
        };

        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(channels) = self.channels {
            config.channels = channels;
        }
        if let Some(duration) = self.duration {
            config.waveform_duration_secs = duration;
        }
        if let Some(note) = &self.note {
            config.default_note.clone_from(note);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build the wavetable described by the shape, detune and level options.
    pub fn wavetable(&self, config: &SynthConfig) -> anyhow::Result<WaveTable> {
        let mut wavetable = WaveTable::with_max_waveform_count(config.max_waveform_count);
        wavetable.set_main_waveform(
            0,
            waveform(
                self.first_start,
                self.first_end,
                self.first_start_detune,
                self.first_end_detune,
                self.first_level,
            )?,
        )?;
        wavetable.set_main_waveform(
            1,
            waveform(
                self.last_start,
                self.last_end,
                self.last_start_detune,
                self.last_end_detune,
                self.last_level,
            )?,
        )?;
        if let Some(segments) = self.segments {
            wavetable
                .set_total_waveforms_count(segments)
                .context("Invalid segment count")?;
        }
        Ok(wavetable)
    }

    /// Resolve everything and build a synth feeding `sink`, plus the note to play.
    pub fn build_synth<S: PlaybackSink>(
        &self,
        sink: S,
    ) -> anyhow::Result<(WaveTableSynth<S>, Note)> {
        let config = self.resolve_config()?;
        let note = config.note()?;
        let wavetable = self.wavetable(&config)?;
        let mut synth = WaveTableSynth::new(config.to_settings(), sink);
        synth.set_wavetable(wavetable)?;
        Ok((synth, note))
    }
}

fn waveform(
    start: CliShape,
    end: CliShape,
    start_detune: Detune,
    end_detune: Detune,
    level: Option<f32>,
) -> anyhow::Result<SingleWaveform> {
    let envelope = match level {
        Some(level) => AmplitudeEnvelope::flat(level).context("Invalid envelope level")?,
        None => AmplitudeEnvelope::default(),
    };
    Ok(SingleWaveform::new(
        start.into(),
        end.into(),
        start_detune,
        end_detune,
        envelope,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use morphtable_synth::NullSink;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        synth: SynthArgs,
    }

    fn parse(args: &[&str]) -> SynthArgs {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().synth
    }

    #[test]
    fn detune_parsing() {
        assert_eq!(parse_detune("1:-3").unwrap(), Detune::new(1, -3).unwrap());
        assert_eq!(parse_detune(" 0 : 7 ").unwrap(), Detune::new(0, 7).unwrap());
        assert!(parse_detune("2").is_err());
        assert!(parse_detune("x:1").is_err());
        assert!(parse_detune("5:0").is_err());
    }

    #[test]
    fn defaults_match_library_defaults() {
        let args = parse(&[]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config, SynthConfig::default());

        let wavetable = args.wavetable(&config).unwrap();
        assert_eq!(wavetable.first_main_waveform(), &SingleWaveform::default());
        assert_eq!(wavetable.last_main_waveform(), &SingleWaveform::default());
        assert_eq!(wavetable.total_waveforms_count(), config.max_waveform_count);
    }

    #[test]
    fn overrides_apply() {
        let args = parse(&[
            "--note",
            "A4",
            "--segments",
            "3",
            "--sample-rate",
            "22050",
            "--last-start",
            "saw",
            "--last-end-detune",
            "-1:2",
            "--first-level",
            "0.25",
        ]);
        let (synth, note) = args.build_synth(NullSink).unwrap();
        assert_eq!(note, Note::reference());
        assert_eq!(synth.settings().sample_rate, 22050);

        let table = synth.wavetable();
        assert_eq!(table.total_waveforms_count(), 3);
        assert_eq!(table.last_main_waveform().start_shape(), WaveformShape::Saw);
        assert_eq!(
            table.last_main_waveform().end_detune(),
            Detune::new(-1, 2).unwrap()
        );
        assert_eq!(table.first_main_waveform().envelope().step(0), Some(0.25));
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(parse(&["--note", "H2"]).resolve_config().is_err());
        assert!(parse(&["--sample-rate", "100"]).resolve_config().is_err());
        assert!(parse(&["--segments", "0"]).build_synth(NullSink).is_err());
        assert!(parse(&["--first-level", "1.5"]).build_synth(NullSink).is_err());
    }
}
