//! Playback sinks for the morphtable synthesizer.
//!
//! This crate provides:
//!
//! - **Live playback**: [`CpalSink`] plays each submitted note once on an output device
//! - **WAV export**: [`WavSink`] and [`write_render`] save rendered notes to disk
//! - **Device discovery**: [`list_output_devices`] and [`default_output_device`]
//!
//! Both sinks implement [`PlaybackSink`](morphtable_synth::PlaybackSink), so either
//! can be handed to a [`WaveTableSynth`](morphtable_synth::WaveTableSynth).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use morphtable_core::{Note, SynthSettings};
//! use morphtable_io::WavSink;
//! use morphtable_synth::WaveTableSynth;
//!
//! let sink = WavSink::new("note.wav");
//! let mut synth = WaveTableSynth::new(SynthSettings::default(), sink);
//! synth.note_on(Note::from_name("C3").unwrap()).unwrap();
//! ```

mod playback;
mod stream;
mod wav;

pub use playback::{CpalSink, map_channels};
pub use stream::{AudioDevice, default_output_device, find_output_device, list_output_devices};
pub use wav::{WavSink, WavSpec, read_wav, write_render, write_wav};

/// Errors from the playback sinks and device lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// hound failed to create, write or read a WAV file.
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),

    /// cpal could not enumerate devices, or build or start an output stream.
    #[error("output stream: {0}")]
    Stream(String),

    /// The host has no default output device.
    #[error("no output device available")]
    NoDevice,

    /// No output device matched the requested index or name.
    #[error("output device not found: {0}")]
    DeviceNotFound(String),

    /// WAV bit depth other than 16, 24 or 32.
    #[error("unsupported WAV bit depth {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Number of frames of `buffer` that fit in `duration_secs` at `sample_rate`.
pub(crate) fn playable_frames(
    buffer: &morphtable_synth::RenderBuffer,
    sample_rate: u32,
    duration_secs: f32,
) -> usize {
    let requested = (f64::from(sample_rate) * f64::from(duration_secs.max(0.0))).round() as usize;
    requested.min(buffer.frames())
}
