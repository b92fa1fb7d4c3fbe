//! Morphtable Synth - wavetable synthesis engine
//!
//! This crate renders notes from a two-endpoint wavetable and provides
//! pull-based previews of the same signal for drawing.
//!
//! # Core Components
//!
//! ## Oscillators
//!
//! Buffer-filling oscillators with a linear pitch sweep and amplitude envelope:
//!
//! - [`SingleShapeOscillator`] - one shape, swept from start to end detune
//! - [`MultiShapeOscillator`] - start shape morphing into end shape across the buffer
//!
//! ```rust
//! use morphtable_core::{AmplitudeEnvelope, Detune, Note, WaveformShape};
//! use morphtable_synth::SingleShapeOscillator;
//!
//! let osc = SingleShapeOscillator::new(
//!     WaveformShape::Saw,
//!     Note::from_name("C4").unwrap(),
//!     AmplitudeEnvelope::default(),
//!     Detune::ZERO,
//!     Detune::ZERO,
//!     44100.0,
//! );
//! let mut buf = vec![0.0; 22050];
//! osc.fill_buffer(&mut buf, 0, 22050).unwrap();
//! ```
//!
//! ## Waveforms and Wavetables
//!
//! - [`SingleWaveform`] / [`SingleWaveformData`] - shapes, detunes and envelope of one endpoint
//! - [`WaveTable`] / [`WaveTableData`] - first and last waveform plus a segment count
//!
//! ## Note Rendering
//!
//! - [`WaveTableSynth`] - renders a note into a [`RenderBuffer`] and submits it
//! - [`PlaybackSink`] - where rendered notes go ([`NullSink`], [`RecordingSink`])
//!
//! ## Previews
//!
//! - [`SingleShapePreview`], [`MultiShapePreview`], [`WaveTablePreview`]
//! - [`PreviewResolution`] - cycles and samples per cycle for relative previews
//!
//! # Example: Playing a Note
//!
//! ```rust
//! use morphtable_core::{NoteData, SynthSettings, WaveformShape};
//! use morphtable_synth::{RecordingSink, SingleWaveform, WaveTableSynth};
//!
//! let mut synth = WaveTableSynth::new(SynthSettings::default(), RecordingSink::new());
//! synth
//!     .wavetable_mut()
//!     .set_main_waveform(1, SingleWaveform::with_shape(WaveformShape::Square))
//!     .unwrap();
//!
//! synth
//!     .note_on_data(NoteData {
//!         semitone: 40,
//!         octave_detune: 0,
//!         semitone_detune: 0,
//!     })
//!     .unwrap();
//! assert_eq!(synth.sink().submissions().len(), 1);
//! ```

pub mod buffer;
pub mod error;
pub mod multi_shape;
pub mod oscillator;
pub mod preview;
pub mod sink;
pub mod sweep;
pub mod synth;
pub mod waveform;
pub mod wavetable;

pub use buffer::RenderBuffer;
pub use error::{RenderError, SynthError};
pub use multi_shape::MultiShapeOscillator;
pub use oscillator::SingleShapeOscillator;
pub use preview::{MultiShapePreview, PreviewResolution, SingleShapePreview, WaveTablePreview};
pub use sink::{NullSink, PlaybackSink, RecordingSink, Submission};
pub use sweep::{PhaseSweep, SweepCursor};
pub use synth::WaveTableSynth;
pub use waveform::{SingleWaveform, SingleWaveformData};
pub use wavetable::{WaveTable, WaveTableData};
