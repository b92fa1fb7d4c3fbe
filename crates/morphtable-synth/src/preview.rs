//! Pull-based oscillators for drawing waveforms.
//!
//! Previews step through the same [`PhaseSweep`]/[`SweepCursor`] kernel as the
//! render oscillators, one sample per [`tick`](SingleShapePreview::tick), and
//! rewind with `reset()` without reallocating. Built with `for_note`, a preview
//! reproduces a note-on render sample for sample. Built with `new` and a
//! [`PreviewResolution`], it draws a fixed number of cycles of the reference
//! pitch, scaled by the waveform's detune factors, independent of any note.

use morphtable_core::{AmplitudeEnvelope, Detune, Note, SynthSettings, WaveformShape, crossfade};

use crate::oscillator::SingleShapeOscillator;
use crate::sweep::{PhaseSweep, SweepCursor};
use crate::waveform::SingleWaveform;
use crate::wavetable::WaveTable;

/// How many cycles a relative preview draws and how finely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewResolution {
    /// Cycles drawn at zero detune.
    pub cycles: usize,
    /// Samples per undetuned cycle.
    pub lines_per_cycle: usize,
}

impl PreviewResolution {
    /// Resolution used for a single waveform editor.
    pub const WAVEFORM: Self = Self {
        cycles: 20,
        lines_per_cycle: 100,
    };

    /// Resolution used per segment of a wavetable overview.
    pub const WAVETABLE: Self = Self {
        cycles: 16,
        lines_per_cycle: 40,
    };

    /// Samples in one preview, at least one.
    pub fn len(&self) -> usize {
        (self.cycles * self.lines_per_cycle).max(1)
    }

    /// Always false; a preview holds at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn increment(&self, detune: Detune) -> f32 {
        detune.freq_factor() as f32 / self.lines_per_cycle.max(1) as f32
    }
}

impl Default for PreviewResolution {
    fn default() -> Self {
        Self::WAVEFORM
    }
}

/// Preview of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleShapePreview {
    shape: WaveformShape,
    envelope: AmplitudeEnvelope,
    sweep: PhaseSweep,
    cursor: SweepCursor,
}

impl SingleShapePreview {
    /// Relative preview of `shape` gliding between two detunes.
    pub fn new(
        shape: WaveformShape,
        envelope: AmplitudeEnvelope,
        start_detune: Detune,
        end_detune: Detune,
        resolution: PreviewResolution,
    ) -> Self {
        let sweep = PhaseSweep::new(
            resolution.increment(start_detune),
            resolution.increment(end_detune),
            resolution.len(),
        );
        Self::with_sweep(shape, envelope, sweep)
    }

    /// Preview matching `oscillator.fill_buffer` over `len` samples.
    pub fn from_oscillator(oscillator: &SingleShapeOscillator, len: usize) -> Self {
        Self::with_sweep(
            oscillator.shape(),
            oscillator.envelope().clone(),
            oscillator.sweep(len.max(1)),
        )
    }

    fn with_sweep(shape: WaveformShape, envelope: AmplitudeEnvelope, sweep: PhaseSweep) -> Self {
        Self {
            shape,
            envelope,
            sweep,
            cursor: SweepCursor::new(),
        }
    }

    /// Shape being previewed.
    pub fn shape(&self) -> WaveformShape {
        self.shape
    }

    /// Samples in one pass.
    pub fn len(&self) -> usize {
        self.sweep.len()
    }

    /// True for a zero-length preview.
    pub fn is_empty(&self) -> bool {
        self.sweep.is_empty()
    }

    /// Index of the next sample within the pass.
    pub fn sample_index(&self) -> usize {
        self.cursor.index()
    }

    /// Next sample. After the last sample of a pass the preview starts over.
    pub fn tick(&mut self) -> f32 {
        self.advance().1
    }

    /// Rewind to the first sample.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    /// Produce `count` samples, then rewind.
    pub fn tick_all(&mut self, count: usize) -> Vec<f32> {
        let out = (0..count).map(|_| self.tick()).collect();
        self.reset();
        out
    }

    fn advance(&mut self) -> (usize, f32) {
        if self.cursor.index() >= self.sweep.len() {
            self.cursor.reset();
        }
        let index = self.cursor.index();
        let y = self
            .cursor
            .next_sample(&self.sweep, self.shape, &self.envelope);
        (index, y)
    }
}

impl Iterator for SingleShapePreview {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        (self.cursor.index() < self.sweep.len()).then(|| self.tick())
    }
}

/// Preview of a [`SingleWaveform`]: start shape morphing into end shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiShapePreview {
    start: SingleShapePreview,
    end: SingleShapePreview,
}

impl MultiShapePreview {
    /// Relative preview of `waveform`.
    pub fn new(waveform: &SingleWaveform, resolution: PreviewResolution) -> Self {
        let preview = |shape| {
            SingleShapePreview::new(
                shape,
                waveform.envelope().clone(),
                waveform.start_detune(),
                waveform.end_detune(),
                resolution,
            )
        };
        Self {
            start: preview(waveform.start_shape()),
            end: preview(waveform.end_shape()),
        }
    }

    /// Preview of exactly what `waveform` renders at `note` over `len` samples.
    pub fn for_note(waveform: &SingleWaveform, note: Note, sample_rate: f32, len: usize) -> Self {
        let preview = |shape| {
            let osc = SingleShapeOscillator::new(
                shape,
                note,
                waveform.envelope().clone(),
                waveform.start_detune(),
                waveform.end_detune(),
                sample_rate,
            );
            SingleShapePreview::from_oscillator(&osc, len)
        };
        Self {
            start: preview(waveform.start_shape()),
            end: preview(waveform.end_shape()),
        }
    }

    /// Samples in one pass.
    pub fn len(&self) -> usize {
        self.start.len()
    }

    /// True for a zero-length preview.
    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// Next sample. After the last sample of a pass the preview starts over.
    pub fn tick(&mut self) -> f32 {
        self.advance().1
    }

    /// Rewind to the first sample.
    pub fn reset(&mut self) {
        self.start.reset();
        self.end.reset();
    }

    /// Produce `count` samples, then rewind.
    pub fn tick_all(&mut self, count: usize) -> Vec<f32> {
        let out = (0..count).map(|_| self.tick()).collect();
        self.reset();
        out
    }

    fn advance(&mut self) -> (usize, f32) {
        let (index, a) = self.start.advance();
        let (_, b) = self.end.advance();
        if self.start.shape() == self.end.shape() {
            return (index, a);
        }
        let t = index as f32 / self.len() as f32;
        (index, crossfade(a, b, t))
    }
}

impl Iterator for MultiShapePreview {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        (self.start.sample_index() < self.len()).then(|| self.tick())
    }
}

/// Overview of a whole [`WaveTable`].
///
/// Plays one waveform-length pass per segment; in segment `k` of `N` the
/// first and last waveform previews are mixed with weight `k / N`, the same
/// weight a note-on uses.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTablePreview {
    first: MultiShapePreview,
    last: MultiShapePreview,
    segment_count: usize,
    segment: usize,
}

impl WaveTablePreview {
    /// Relative preview of `wavetable`, each segment at `resolution`.
    pub fn new(wavetable: &WaveTable, resolution: PreviewResolution) -> Self {
        Self {
            first: MultiShapePreview::new(wavetable.first_main_waveform(), resolution),
            last: MultiShapePreview::new(wavetable.last_main_waveform(), resolution),
            segment_count: wavetable.total_waveforms_count(),
            segment: 0,
        }
    }

    /// Preview of exactly what a note-on of `note` writes into each channel.
    pub fn for_note(wavetable: &WaveTable, note: Note, settings: &SynthSettings) -> Self {
        let len = settings.single_waveform_len();
        let sample_rate = settings.sample_rate_f32();
        Self {
            first: MultiShapePreview::for_note(
                wavetable.first_main_waveform(),
                note,
                sample_rate,
                len,
            ),
            last: MultiShapePreview::for_note(
                wavetable.last_main_waveform(),
                note,
                sample_rate,
                len,
            ),
            segment_count: wavetable.total_waveforms_count(),
            segment: 0,
        }
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Samples per segment.
    pub fn segment_len(&self) -> usize {
        self.first.len()
    }

    /// Samples in one full pass over every segment.
    pub fn len(&self) -> usize {
        self.segment_len() * self.segment_count
    }

    /// True for a zero-length preview.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the next sample within the full pass.
    pub fn sample_index(&self) -> usize {
        self.segment * self.segment_len() + self.first.start.sample_index()
    }

    /// Next sample. After the last segment the preview starts over.
    pub fn tick(&mut self) -> f32 {
        if self.first.start.sample_index() >= self.segment_len() {
            self.segment += 1;
            if self.segment >= self.segment_count {
                self.segment = 0;
            }
        }
        let (_, a) = self.first.advance();
        let (_, b) = self.last.advance();
        let t = self.segment as f32 / self.segment_count as f32;
        crossfade(a, b, t)
    }

    /// Rewind to the first sample of the first segment.
    pub fn reset(&mut self) {
        self.first.reset();
        self.last.reset();
        self.segment = 0;
    }

    /// Produce `count` samples, then rewind.
    pub fn tick_all(&mut self, count: usize) -> Vec<f32> {
        let out = (0..count).map(|_| self.tick()).collect();
        self.reset();
        out
    }
}

impl Iterator for WaveTablePreview {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        (self.sample_index() < self.len()).then(|| self.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> AmplitudeEnvelope {
        AmplitudeEnvelope::flat(1.0).unwrap()
    }

    #[test]
    fn resolution_lengths() {
        assert_eq!(PreviewResolution::WAVEFORM.len(), 2000);
        assert_eq!(PreviewResolution::WAVETABLE.len(), 640);
        let empty = PreviewResolution {
            cycles: 0,
            lines_per_cycle: 0,
        };
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn undetuned_preview_draws_requested_cycles() {
        let mut preview = SingleShapePreview::new(
            WaveformShape::Sine,
            full(),
            Detune::ZERO,
            Detune::ZERO,
            PreviewResolution::WAVEFORM,
        );
        let samples = preview.tick_all(2000);
        let rising = samples
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        assert_eq!(rising, 19);
        assert_eq!(samples[0], 0.0);
        assert!((samples[25] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tick_all_rewinds() {
        let mut preview = MultiShapePreview::new(
            &SingleWaveform::with_shape(WaveformShape::Saw),
            PreviewResolution::WAVETABLE,
        );
        let a = preview.tick_all(100);
        let b = preview.tick_all(100);
        assert_eq!(a, b);
        assert_eq!(preview.start.sample_index(), 0);
    }

    #[test]
    fn tick_wraps_after_one_pass() {
        let mut preview = SingleShapePreview::new(
            WaveformShape::Triangle,
            full(),
            Detune::ZERO,
            Detune::new(1, 0).unwrap(),
            PreviewResolution {
                cycles: 2,
                lines_per_cycle: 8,
            },
        );
        let first: Vec<f32> = (0..16).map(|_| preview.tick()).collect();
        let second: Vec<f32> = (0..16).map(|_| preview.tick()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn iterator_is_bounded_to_one_pass() {
        let preview = SingleShapePreview::new(
            WaveformShape::Square,
            full(),
            Detune::ZERO,
            Detune::ZERO,
            PreviewResolution::WAVETABLE,
        );
        assert_eq!(preview.count(), 640);

        let table = WaveTable::new();
        let overview = WaveTablePreview::new(&table, PreviewResolution::WAVETABLE);
        assert_eq!(overview.len(), 8 * 640);
        assert_eq!(overview.count(), 8 * 640);
    }

    #[test]
    fn wavetable_iterator_resumes_mid_pass() {
        let mut table = WaveTable::new();
        table.set_total_waveforms_count(3).unwrap();
        let res = PreviewResolution {
            cycles: 1,
            lines_per_cycle: 10,
        };
        let mut overview = WaveTablePreview::new(&table, res);
        for _ in 0..14 {
            overview.tick();
        }
        assert_eq!(overview.sample_index(), 14);
        assert_eq!(overview.by_ref().count(), 30 - 14);
        assert_eq!(overview.sample_index(), 30);
        assert_eq!(overview.next(), None);

        overview.reset();
        assert_eq!(overview.sample_index(), 0);
        assert_eq!(overview.count(), 30);
    }

    #[test]
    fn oscillator_preview_matches_render() {
        let osc = SingleShapeOscillator::new(
            WaveformShape::Saw,
            Note::new(30).unwrap(),
            full(),
            Detune::new(-1, 3).unwrap(),
            Detune::new(2, -5).unwrap(),
            44100.0,
        );
        let mut rendered = vec![0.0; 5000];
        osc.fill_buffer(&mut rendered, 0, 5000).unwrap();
        let previewed: Vec<f32> = SingleShapePreview::from_oscillator(&osc, 5000).collect();
        assert_eq!(previewed, rendered);
    }

    #[test]
    fn wavetable_segments_use_render_weights() {
        let mut table = WaveTable::new();
        table.set_total_waveforms_count(4).unwrap();
        table
            .set_main_waveform(1, SingleWaveform::with_shape(WaveformShape::Square))
            .unwrap();
        let res = PreviewResolution {
            cycles: 1,
            lines_per_cycle: 10,
        };
        let first = MultiShapePreview::new(table.first_main_waveform(), res).tick_all(10);
        let last = MultiShapePreview::new(table.last_main_waveform(), res).tick_all(10);
        let overview: Vec<f32> = WaveTablePreview::new(&table, res).collect();

        for segment in 0..4 {
            let t = segment as f32 / 4.0;
            for i in 0..10 {
                assert_eq!(overview[segment * 10 + i], crossfade(first[i], last[i], t));
            }
        }
    }
}
