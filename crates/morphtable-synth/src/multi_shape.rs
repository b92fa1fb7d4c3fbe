//! Two-shape oscillator that morphs across buffer position.

use morphtable_core::{Note, crossfade};

use crate::error::{RenderError, check_fill};
use crate::oscillator::SingleShapeOscillator;
use crate::waveform::SingleWaveform;

/// Renders a [`SingleWaveform`]: its start shape fading into its end shape.
///
/// Both inner oscillators share the note, detunes and envelope; only the shape
/// differs. The end shape is rendered into an internal scratch buffer allocated
/// up front, then combined into the destination:
///
/// ```text
/// dest[i] = start[i] * (1 - i/n) + end[i] * i/n
/// ```
///
/// When both shapes are the same the scratch pass is skipped and the output is
/// exactly the single-shape render.
#[derive(Debug, Clone)]
pub struct MultiShapeOscillator {
    start: SingleShapeOscillator,
    end: SingleShapeOscillator,
    scratch: Vec<f32>,
}

impl MultiShapeOscillator {
    /// Build oscillators for `waveform` at `note`, with room for fills of up
    /// to `max_samples`.
    pub fn new(
        waveform: &SingleWaveform,
        note: Note,
        sample_rate: f32,
        max_samples: usize,
    ) -> Self {
        let oscillator = |shape| {
            SingleShapeOscillator::new(
                shape,
                note,
                waveform.envelope().clone(),
                waveform.start_detune(),
                waveform.end_detune(),
                sample_rate,
            )
        };
        Self {
            start: oscillator(waveform.start_shape()),
            end: oscillator(waveform.end_shape()),
            scratch: vec![0.0; max_samples],
        }
    }

    /// Rebind to a new waveform and note, keeping the scratch allocation.
    pub fn configure(&mut self, waveform: &SingleWaveform, note: Note) {
        for (osc, shape) in [
            (&mut self.start, waveform.start_shape()),
            (&mut self.end, waveform.end_shape()),
        ] {
            osc.set_shape(shape);
            osc.set_envelope(waveform.envelope().clone());
            osc.set_start_detune(waveform.start_detune());
            osc.set_end_detune(waveform.end_detune());
            osc.set_note(note);
        }
    }

    /// Oscillator for the start shape.
    pub fn start_oscillator(&self) -> &SingleShapeOscillator {
        &self.start
    }

    /// Oscillator for the end shape.
    pub fn end_oscillator(&self) -> &SingleShapeOscillator {
        &self.end
    }

    /// Largest fill the scratch buffer supports.
    pub fn max_samples(&self) -> usize {
        self.scratch.len()
    }

    /// Render the morph into `buffer[start..end]`.
    ///
    /// Both the destination and the scratch buffer are checked before anything
    /// is written; an undersized one aborts the whole fill.
    pub fn fill_buffer(
        &mut self,
        buffer: &mut [f32],
        start: usize,
        end: usize,
    ) -> Result<(), RenderError> {
        let n = check_fill("destination", buffer.len(), start, end)?;
        if self.start.shape() == self.end.shape() {
            return self.start.fill_buffer(buffer, start, end);
        }
        check_fill("scratch", self.scratch.len(), 0, n)?;

        self.start.fill_buffer(buffer, start, end)?;
        self.end.fill_buffer(&mut self.scratch, 0, n)?;

        let len = n as f32;
        for (i, (out, &target)) in buffer[start..end]
            .iter_mut()
            .zip(&self.scratch[..n])
            .enumerate()
        {
            *out = crossfade(*out, target, i as f32 / len);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphtable_core::{AmplitudeEnvelope, Detune, WaveformShape};

    fn waveform(start: WaveformShape, end: WaveformShape) -> SingleWaveform {
        SingleWaveform::new(
            start,
            end,
            Detune::ZERO,
            Detune::ZERO,
            AmplitudeEnvelope::flat(1.0).unwrap(),
        )
    }

    #[test]
    fn same_shape_matches_single_oscillator() {
        let wf = waveform(WaveformShape::Triangle, WaveformShape::Triangle);
        let mut multi = MultiShapeOscillator::new(&wf, Note::reference(), 44100.0, 0);
        let mut a = vec![0.0; 2048];
        let mut b = vec![0.0; 2048];
        multi.fill_buffer(&mut a, 0, 2048).unwrap();
        multi.start_oscillator().fill_buffer(&mut b, 0, 2048).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn morph_starts_on_start_shape_and_ends_near_end_shape() {
        let wf = waveform(WaveformShape::Sine, WaveformShape::Square);
        let mut multi = MultiShapeOscillator::new(&wf, Note::reference(), 44100.0, 4096);
        let mut out = vec![0.0; 4096];
        multi.fill_buffer(&mut out, 0, 4096).unwrap();

        let mut sine = vec![0.0; 4096];
        let mut square = vec![0.0; 4096];
        multi.start_oscillator().fill_buffer(&mut sine, 0, 4096).unwrap();
        multi.end_oscillator().fill_buffer(&mut square, 0, 4096).unwrap();

        assert_eq!(out[0], sine[0]);
        assert_eq!(out[10], crossfade(sine[10], square[10], 10.0 / 4096.0));
        assert!((out[4095] - square[4095]).abs() < 1e-3);
    }

    #[test]
    fn small_scratch_aborts_without_writing() {
        let wf = waveform(WaveformShape::Sine, WaveformShape::Saw);
        let mut multi = MultiShapeOscillator::new(&wf, Note::reference(), 44100.0, 10);
        let mut out = vec![3.0; 100];
        let err = multi.fill_buffer(&mut out, 0, 100).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferTooSmall {
                buffer: "scratch",
                ..
            }
        ));
        assert!(out.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn small_destination_aborts_without_writing() {
        let wf = waveform(WaveformShape::Sine, WaveformShape::Saw);
        let mut multi = MultiShapeOscillator::new(&wf, Note::reference(), 44100.0, 100);
        let mut out = vec![3.0; 50];
        assert!(multi.fill_buffer(&mut out, 0, 100).is_err());
        assert!(out.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn configure_rebinds_shapes_and_note() {
        let wf = waveform(WaveformShape::Sine, WaveformShape::Sine);
        let mut multi = MultiShapeOscillator::new(&wf, Note::reference(), 44100.0, 64);
        let mut other = waveform(WaveformShape::Saw, WaveformShape::Square);
        other.set_end_detune(Detune::new(1, 0).unwrap());
        multi.configure(&other, Note::new(37).unwrap());

        assert_eq!(multi.start_oscillator().shape(), WaveformShape::Saw);
        assert_eq!(multi.end_oscillator().shape(), WaveformShape::Square);
        assert_eq!(multi.end_oscillator().start_frequency(), 220.0);
        assert_eq!(multi.end_oscillator().end_frequency(), 440.0);
        assert_eq!(multi.max_samples(), 64);
    }
}
