//! Single-shape render oscillator with a linear pitch sweep.

use morphtable_core::{AmplitudeEnvelope, Detune, Note, ParamError, WaveformShape};

use crate::error::{RenderError, check_fill};
use crate::sweep::{PhaseSweep, SweepCursor};

/// Renders one [`WaveformShape`] into a caller-owned buffer.
///
/// The pitch glides linearly from the note played with `start_detune` to the
/// note played with `end_detune` over the length of each fill, and the
/// amplitude follows the envelope across the same span. Both frequencies are
/// recomputed whenever the note or a detune changes.
///
/// # Example
///
/// ```rust
/// use morphtable_core::{AmplitudeEnvelope, Detune, Note, WaveformShape};
/// use morphtable_synth::SingleShapeOscillator;
///
/// let osc = SingleShapeOscillator::new(
///     WaveformShape::Sine,
///     Note::reference(),
///     AmplitudeEnvelope::flat(1.0).unwrap(),
///     Detune::ZERO,
///     Detune::new(1, 0).unwrap(),
///     44100.0,
/// );
/// assert_eq!(osc.start_frequency(), 440.0);
/// assert_eq!(osc.end_frequency(), 880.0);
///
/// let mut buf = vec![0.0; 1024];
/// osc.fill_buffer(&mut buf, 0, 1024).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SingleShapeOscillator {
    shape: WaveformShape,
    note: Note,
    envelope: AmplitudeEnvelope,
    start_detune: Detune,
    end_detune: Detune,
    sample_rate: f32,
    start_frequency: f32,
    end_frequency: f32,
}

impl SingleShapeOscillator {
    /// Create an oscillator and compute its sweep frequencies.
    pub fn new(
        shape: WaveformShape,
        note: Note,
        envelope: AmplitudeEnvelope,
        start_detune: Detune,
        end_detune: Detune,
        sample_rate: f32,
    ) -> Self {
        let mut osc = Self {
            shape,
            note,
            envelope,
            start_detune,
            end_detune,
            sample_rate,
            start_frequency: 0.0,
            end_frequency: 0.0,
        };
        osc.update_frequencies();
        osc
    }

    fn update_frequencies(&mut self) {
        self.start_frequency = self.note.with_detune(self.start_detune).frequency();
        self.end_frequency = self.note.with_detune(self.end_detune).frequency();
        tracing::debug!(
            shape = %self.shape,
            start_hz = self.start_frequency,
            end_hz = self.end_frequency,
            "oscillator frequencies updated"
        );
    }

    /// Shape being rendered.
    pub fn shape(&self) -> WaveformShape {
        self.shape
    }

    /// Set the shape.
    pub fn set_shape(&mut self, shape: WaveformShape) {
        self.shape = shape;
    }

    /// Note the sweep is anchored to.
    pub fn note(&self) -> Note {
        self.note
    }

    /// Set the note and recompute both frequencies.
    pub fn set_note(&mut self, note: Note) {
        self.note = note;
        self.update_frequencies();
    }

    /// Amplitude envelope.
    pub fn envelope(&self) -> &AmplitudeEnvelope {
        &self.envelope
    }

    /// Replace the amplitude envelope.
    pub fn set_envelope(&mut self, envelope: AmplitudeEnvelope) {
        self.envelope = envelope;
    }

    /// Detune at the start of the sweep.
    pub fn start_detune(&self) -> Detune {
        self.start_detune
    }

    /// Detune at the end of the sweep.
    pub fn end_detune(&self) -> Detune {
        self.end_detune
    }

    /// Set the start detune and recompute frequencies.
    pub fn set_start_detune(&mut self, detune: Detune) {
        self.start_detune = detune;
        self.update_frequencies();
    }

    /// Set the end detune and recompute frequencies.
    pub fn set_end_detune(&mut self, detune: Detune) {
        self.end_detune = detune;
        self.update_frequencies();
    }

    /// Set the start octave offset. Rejected outside `[-4, 4]`.
    pub fn set_start_octave_detune(&mut self, octave: i32) -> Result<(), ParamError> {
        self.start_detune.set_octave(octave)?;
        self.update_frequencies();
        Ok(())
    }

    /// Set the start semitone offset. Rejected outside `[-12, 12]`.
    pub fn set_start_semitone_detune(&mut self, semitone: i32) -> Result<(), ParamError> {
        self.start_detune.set_semitone(semitone)?;
        self.update_frequencies();
        Ok(())
    }

    /// Set the end octave offset. Rejected outside `[-4, 4]`.
    pub fn set_end_octave_detune(&mut self, octave: i32) -> Result<(), ParamError> {
        self.end_detune.set_octave(octave)?;
        self.update_frequencies();
        Ok(())
    }

    /// Set the end semitone offset. Rejected outside `[-12, 12]`.
    pub fn set_end_semitone_detune(&mut self, semitone: i32) -> Result<(), ParamError> {
        self.end_detune.set_semitone(semitone)?;
        self.update_frequencies();
        Ok(())
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Set the sample rate. Non-positive or non-finite rates are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            tracing::warn!(sample_rate, "ignoring invalid sample rate");
            return;
        }
        self.sample_rate = sample_rate;
    }

    /// Frequency at the first sample of a fill, in Hz.
    pub fn start_frequency(&self) -> f32 {
        self.start_frequency
    }

    /// Frequency the sweep approaches at the end of a fill, in Hz.
    pub fn end_frequency(&self) -> f32 {
        self.end_frequency
    }

    /// Sweep this oscillator traces over `len` samples.
    pub fn sweep(&self, len: usize) -> PhaseSweep {
        PhaseSweep::from_frequencies(
            self.start_frequency,
            self.end_frequency,
            self.sample_rate,
            len,
        )
    }

    /// Render `buffer[start..end]`.
    ///
    /// The full sweep and envelope span the requested range. If the buffer
    /// cannot hold `end` samples nothing is written.
    pub fn fill_buffer(
        &self,
        buffer: &mut [f32],
        start: usize,
        end: usize,
    ) -> Result<(), RenderError> {
        let n = check_fill("oscillator", buffer.len(), start, end)?;
        let sweep = self.sweep(n);
        let mut cursor = SweepCursor::new();
        for out in &mut buffer[start..end] {
            *out = cursor.next_sample(&sweep, self.shape, &self.envelope);
        }
        Ok(())
    }
}
