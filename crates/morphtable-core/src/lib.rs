//! Morphtable Core - pitch model, waveform shapes and amplitude envelopes.
//!
//! This crate holds the leaf types of the morphtable wavetable synthesizer:
//!
//! - [`Note`] / [`NoteData`] - semitone index plus detune, converted to Hz
//! - [`Detune`] - octave/semitone offset relative to a played note
//! - [`WaveformShape`] - sine, triangle, square and saw generators
//! - [`AmplitudeEnvelope`] - 64-step piecewise-linear amplitude curve
//! - [`SynthSettings`] and the constants in [`settings`]
//! - [`ParamError`] - the rejection type every validating setter returns
//!
//! Every setter follows the same policy: a rejected value leaves the target
//! unchanged, logs a `tracing` warning, and returns `Err`.
//!
//! # Example
//!
//! ```rust
//! use morphtable_core::{AmplitudeEnvelope, Note, WaveformShape};
//!
//! let note = Note::from_name("A4").unwrap();
//! assert_eq!(note.frequency(), 440.0);
//!
//! let env = AmplitudeEnvelope::flat(1.0).unwrap();
//! let y = WaveformShape::Sine.evaluate_cycles(0.25, env.amplitude_at(0.0));
//! assert!((y - 1.0).abs() < 1e-6);
//! ```

pub mod envelope;
pub mod error;
pub mod math;
pub mod note;
pub mod settings;
pub mod shape;

pub use envelope::AmplitudeEnvelope;
pub use error::ParamError;
pub use math::{crossfade, wrap_phase};
pub use note::{Detune, Note, NoteData};
pub use settings::{STEP_COUNT, SynthSettings};
pub use shape::WaveformShape;
