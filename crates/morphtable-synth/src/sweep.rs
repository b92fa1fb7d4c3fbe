//! Linear frequency sweep shared by the render and preview oscillators.
//!
//! A sweep spans `len` samples. Sample `i` is evaluated at the phase
//! accumulated from the increments of samples `0..i`, where the increment
//! (in cycles per sample) ramps linearly:
//!
//! ```text
//! inc[i]   = start_inc + i * (end_inc - start_inc) / len
//! phase[0] = 0
//! phase[i] = phase[i-1] + inc[i-1]
//! y[i]     = shape(2π * phase[i], envelope(i / len))
//! ```
//!
//! The render path derives the increments from Hz (`f / sample_rate`); the
//! preview path from relative frequency factors over a fixed number of drawn
//! cycles. Both step through the same [`SweepCursor`], so a preview traces
//! exactly what a render writes.

use morphtable_core::{AmplitudeEnvelope, WaveformShape, wrap_phase};

/// Increment ramp over a fixed number of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSweep {
    start_increment: f32,
    slope: f32,
    len: usize,
}

impl PhaseSweep {
    /// Sweep from `start_increment` to `end_increment` (cycles per sample)
    /// over `len` samples.
    pub fn new(start_increment: f32, end_increment: f32, len: usize) -> Self {
        let slope = if len == 0 {
            0.0
        } else {
            (end_increment - start_increment) / len as f32
        };
        Self {
            start_increment,
            slope,
            len,
        }
    }

    /// Sweep covering `len` samples between two frequencies at `sample_rate`.
    pub fn from_frequencies(
        start_frequency: f32,
        end_frequency: f32,
        sample_rate: f32,
        len: usize,
    ) -> Self {
        Self::new(
            start_frequency / sample_rate,
            end_frequency / sample_rate,
            len,
        )
    }

    /// Number of samples in the sweep.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length sweep.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Phase increment applied after sample `index`.
    #[inline]
    pub fn increment_at(&self, index: usize) -> f32 {
        self.slope * index as f32 + self.start_increment
    }

    /// Normalized position of sample `index` within the sweep.
    #[inline]
    pub fn position(&self, index: usize) -> f32 {
        index as f32 / self.len as f32
    }
}

/// Running state over a [`PhaseSweep`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepCursor {
    index: usize,
    phase: f32,
}

impl SweepCursor {
    /// Cursor at the first sample, phase zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next sample.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current phase in cycles, wrapped to `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Rewind to the first sample.
    pub fn reset(&mut self) {
        self.index = 0;
        self.phase = 0.0;
    }

    /// Produce the next sample and advance.
    #[inline]
    pub fn next_sample(
        &mut self,
        sweep: &PhaseSweep,
        shape: WaveformShape,
        envelope: &AmplitudeEnvelope,
    ) -> f32 {
        let amplitude = envelope.amplitude_at(sweep.position(self.index));
        let y = shape.evaluate_cycles(self.phase, amplitude);
        self.phase = wrap_phase(self.phase + sweep.increment_at(self.index));
        self.index += 1;
        y
    }
}
