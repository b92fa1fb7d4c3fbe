//! Engine-wide constants and runtime render settings.
//!
//! Bounds that shape the data model (envelope resolution, detune and playable
//! ranges, the A4 reference) are compile-time constants. Values that only
//! affect rendering (sample rate, channel count, segment length, table depth,
//! output gain) live in [`SynthSettings`] so they can come from a config file.

use core::ops::RangeInclusive;

/// Number of discrete amplitude steps in an envelope (bars in one cycle).
pub const STEP_COUNT: usize = 64;

/// Lowest accepted octave detune.
pub const MIN_OCTAVE_DETUNE: i32 = -4;
/// Highest accepted octave detune.
pub const MAX_OCTAVE_DETUNE: i32 = 4;

/// Lowest accepted semitone detune.
pub const MIN_SEMITONE_DETUNE: i32 = -12;
/// Highest accepted semitone detune.
pub const MAX_SEMITONE_DETUNE: i32 = 12;

/// Lowest playable semitone index.
pub const MIN_PLAYABLE_SEMITONE: i32 = 0;
/// Highest playable semitone index.
pub const MAX_PLAYABLE_SEMITONE: i32 = 87;

/// Frequency ratio between adjacent equal-tempered semitones, `2^(1/12)`.
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Semitone index of the reference note (A4).
pub const REFERENCE_SEMITONE: i32 = 49;

/// Frequency of the reference note in Hz.
pub const REFERENCE_FREQUENCY: f32 = 440.0;

/// Number of editable waveform slots in a wavetable (first and last).
pub const MAIN_WAVEFORM_COUNT: usize = 2;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default number of output channels.
pub const DEFAULT_CHANNELS: u16 = 2;

/// Default duration of one rendered waveform segment, in seconds.
pub const DEFAULT_WAVEFORM_DURATION_SECS: f32 = 0.5;

/// Default (and maximum) number of segments rendered per note.
pub const DEFAULT_WAVEFORM_COUNT: usize = 8;

/// Gain applied by the playback sink to a rendered note.
pub const DEFAULT_OUTPUT_GAIN: f32 = 0.7;

/// Accepted octave detune range.
pub const OCTAVE_DETUNE_RANGE: RangeInclusive<i32> = MIN_OCTAVE_DETUNE..=MAX_OCTAVE_DETUNE;

/// Accepted semitone detune range.
pub const SEMITONE_DETUNE_RANGE: RangeInclusive<i32> = MIN_SEMITONE_DETUNE..=MAX_SEMITONE_DETUNE;

/// Playable semitone range.
pub const PLAYABLE_SEMITONE_RANGE: RangeInclusive<i32> =
    MIN_PLAYABLE_SEMITONE..=MAX_PLAYABLE_SEMITONE;

/// Runtime render settings.
///
/// ## Fields
///
/// - `sample_rate`: Output sample rate in Hz (default: 44100)
/// - `channels`: Number of output channels (default: 2)
/// - `waveform_duration_secs`: Length of one segment in seconds (default: 0.5)
/// - `max_waveform_count`: Upper bound for a table's segment count (default: 8)
/// - `output_gain`: Gain handed to the playback sink (default: 0.7)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthSettings {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Number of output channels.
    pub channels: u16,
    /// Length of one rendered waveform segment, in seconds.
    pub waveform_duration_secs: f32,
    /// Maximum number of segments a wavetable may request.
    pub max_waveform_count: usize,
    /// Gain applied at playback.
    pub output_gain: f32,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            waveform_duration_secs: DEFAULT_WAVEFORM_DURATION_SECS,
            max_waveform_count: DEFAULT_WAVEFORM_COUNT,
            output_gain: DEFAULT_OUTPUT_GAIN,
        }
    }
}

impl SynthSettings {
    /// Sample count of one waveform segment (`sample_rate * waveform_duration`).
    pub fn single_waveform_len(&self) -> usize {
        (self.sample_rate as f64 * self.waveform_duration_secs as f64).round() as usize
    }

    /// Per-channel sample count of the longest possible render.
    pub fn max_output_len(&self) -> usize {
        self.single_waveform_len() * self.max_waveform_count
    }

    /// Sample rate as `f32`, for oscillator arithmetic.
    pub fn sample_rate_f32(&self) -> f32 {
        self.sample_rate as f32
    }
}
