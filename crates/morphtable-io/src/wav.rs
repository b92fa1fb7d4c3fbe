//! WAV file export.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavWriter};
use morphtable_core::settings::{DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
use morphtable_synth::{PlaybackSink, RenderBuffer};

use crate::{Error, Result, playable_frames};

/// Channel layout, rate and bit depth of a WAV file.
///
/// 32-bit files hold IEEE float samples; 16- and 24-bit files hold PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// 16, 24 or 32.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Float spec matching the layout of a render.
    pub fn for_render(buffer: &RenderBuffer) -> Self {
        Self {
            channels: u16::try_from(buffer.channel_count()).unwrap_or(u16::MAX),
            sample_rate: buffer.sample_rate(),
            bits_per_sample: 32,
        }
    }

    fn is_float(&self) -> bool {
        self.bits_per_sample == 32
    }

    /// Full-scale value of a PCM sample at this bit depth.
    fn pcm_scale(&self) -> f32 {
        (1i64 << (self.bits_per_sample.clamp(1, 32) - 1)) as f32
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(hound_spec: hound::WavSpec) -> Self {
        Self {
            channels: hound_spec.channels,
            sample_rate: hound_spec.sample_rate,
            bits_per_sample: hound_spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(wav: WavSpec) -> Self {
        let sample_format = if wav.is_float() {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        };
        hound::WavSpec {
            channels: wav.channels,
            sample_rate: wav.sample_rate,
            bits_per_sample: wav.bits_per_sample,
            sample_format,
        }
    }
}

fn check_bits(bits: u16) -> Result<()> {
    match bits {
        16 | 24 | 32 => Ok(()),
        other => Err(Error::UnsupportedBitDepth(other)),
    }
}

/// Write interleaved samples to `path`.
///
/// PCM output is clipped to full scale; float output is written as-is.
pub fn write_wav(path: impl AsRef<Path>, samples: &[f32], spec: WavSpec) -> Result<()> {
    check_bits(spec.bits_per_sample)?;
    let mut writer = WavWriter::create(path, spec.into())?;

    if spec.is_float() {
        samples
            .iter()
            .try_for_each(|&sample| writer.write_sample(sample))?;
    } else {
        let scale = spec.pcm_scale();
        samples.iter().try_for_each(|&sample| {
            writer.write_sample((sample * scale).clamp(-scale, scale - 1.0) as i32)
        })?;
    }

    writer.finalize()?;
    Ok(())
}

/// Read `path` back as interleaved samples in `[-1, 1]`, with its spec.
pub fn read_wav(path: impl AsRef<Path>) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let format = reader.spec().sample_format;
    let spec = WavSpec::from(reader.spec());

    let samples = if format == SampleFormat::Float {
        reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()?
    } else {
        let scale = spec.pcm_scale();
        reader
            .into_samples::<i32>()
            .map(|sample| sample.map(|v| v as f32 / scale))
            .collect::<std::result::Result<Vec<f32>, _>>()?
    };

    Ok((samples, spec))
}

/// Write the first `frames` frames of a render, scaled by `gain`.
pub fn write_render(
    path: impl AsRef<Path>,
    buffer: &RenderBuffer,
    gain: f32,
    frames: usize,
    bits_per_sample: u16,
) -> Result<WavSpec> {
    let spec = WavSpec {
        bits_per_sample,
        ..WavSpec::for_render(buffer)
    };
    let frames = frames.min(buffer.frames());
    let samples: Vec<f32> = buffer.interleaved()[..frames * buffer.channel_count()]
        .iter()
        .map(|s| s * gain)
        .collect();
    write_wav(path, &samples, spec)?;
    Ok(spec)
}

/// Sink that writes each submitted note to a WAV file.
///
/// Every submission overwrites the file, so it always holds the most recent
/// note.
#[derive(Debug, Clone)]
pub struct WavSink {
    path: PathBuf,
    bits_per_sample: u16,
    written: usize,
}

impl WavSink {
    /// Sink writing 32-bit float files to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bits_per_sample: 32,
            written: 0,
        }
    }

    /// Use a different bit depth (16, 24 or 32).
    pub fn with_bits_per_sample(mut self, bits: u16) -> Self {
        self.bits_per_sample = bits;
        self
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of notes written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl PlaybackSink for WavSink {
    type Error = Error;

    fn submit(
        &mut self,
        buffer: &RenderBuffer,
        sample_rate: u32,
        gain: f32,
        duration_secs: f32,
    ) -> Result<()> {
        let frames = playable_frames(buffer, sample_rate, duration_secs);
        let spec = write_render(&self.path, buffer, gain, frames, self.bits_per_sample)?;
        self.written += 1;
        tracing::info!(
            path = %self.path.display(),
            frames,
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            "wrote note"
        );
        Ok(())
    }
}
