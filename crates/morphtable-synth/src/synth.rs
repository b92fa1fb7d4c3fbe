//! Note-on rendering: two waveform cycles crossfaded across segments.

use morphtable_core::{Note, NoteData, ParamError, SynthSettings, crossfade};

use crate::buffer::RenderBuffer;
use crate::error::{RenderError, SynthError};
use crate::multi_shape::MultiShapeOscillator;
use crate::sink::PlaybackSink;
use crate::wavetable::WaveTable;

/// Monophonic wavetable synthesizer.
///
/// Each note-on renders the wavetable's first and last waveform at the new
/// note into two single-cycle buffers of `L = sample_rate * waveform_duration`
/// samples, then writes `N = total_waveforms_count` segments into every output
/// channel. Segment `k` is a flat crossfade of the two buffers:
///
/// ```text
/// t          = k / N
/// out[k*L+i] = first[i] * (1 - t) + last[i] * t
/// ```
///
/// so the first segment is exactly the first waveform and the last one sits at
/// weight `(N - 1) / N`. The finished buffer is handed to the
/// [`PlaybackSink`] with the configured gain and a duration of `N` segments.
///
/// All buffers are allocated at construction and overwritten by each note;
/// there is exactly one render in flight.
///
/// # Example
///
/// ```rust
/// use morphtable_core::{Note, SynthSettings};
/// use morphtable_synth::{RecordingSink, WaveTableSynth};
///
/// let mut synth = WaveTableSynth::new(SynthSettings::default(), RecordingSink::new());
/// synth.note_on(Note::from_name("C4").unwrap()).unwrap();
///
/// let played = synth.sink().last().unwrap();
/// assert_eq!(played.gain, 0.7);
/// assert_eq!(played.duration_secs, 4.0);
/// ```
#[derive(Debug)]
pub struct WaveTableSynth<S> {
    settings: SynthSettings,
    wavetable: WaveTable,
    note: Note,
    first_oscillator: MultiShapeOscillator,
    last_oscillator: MultiShapeOscillator,
    first_buffer: Vec<f32>,
    last_buffer: Vec<f32>,
    output: RenderBuffer,
    sink: S,
}

impl<S: PlaybackSink> WaveTableSynth<S> {
    /// Create a synth with a default wavetable, allocating every render buffer.
    pub fn new(settings: SynthSettings, sink: S) -> Self {
        let len = settings.single_waveform_len();
        let sample_rate = settings.sample_rate_f32();
        let wavetable = WaveTable::with_max_waveform_count(settings.max_waveform_count);
        // C3, the default keyboard note
        let note = Note::new(28).unwrap_or_default();
        let first_oscillator =
            MultiShapeOscillator::new(wavetable.first_main_waveform(), note, sample_rate, len);
        let last_oscillator =
            MultiShapeOscillator::new(wavetable.last_main_waveform(), note, sample_rate, len);
        let output = RenderBuffer::with_capacity(
            usize::from(settings.channels),
            len * wavetable.max_waveform_count(),
            settings.sample_rate,
        );
        Self {
            settings,
            wavetable,
            note,
            first_oscillator,
            last_oscillator,
            first_buffer: vec![0.0; len],
            last_buffer: vec![0.0; len],
            output,
            sink,
        }
    }

    /// Render settings.
    pub fn settings(&self) -> &SynthSettings {
        &self.settings
    }

    /// The wavetable notes are rendered from.
    pub fn wavetable(&self) -> &WaveTable {
        &self.wavetable
    }

    /// Mutable access for editing waveforms and the segment count.
    pub fn wavetable_mut(&mut self) -> &mut WaveTable {
        &mut self.wavetable
    }

    /// Replace the wavetable.
    ///
    /// Rejected when the table allows more segments than the output buffer
    /// was sized for.
    pub fn set_wavetable(&mut self, wavetable: WaveTable) -> Result<(), ParamError> {
        let limit = self.settings.max_waveform_count;
        if wavetable.max_waveform_count() > limit {
            tracing::warn!(
                value = wavetable.max_waveform_count(),
                max = limit,
                "rejected wavetable: too many segments"
            );
            return Err(ParamError::OutOfRange {
                param: "max_waveform_count",
                value: i64::try_from(wavetable.max_waveform_count()).unwrap_or(i64::MAX),
                min: 1,
                max: i64::try_from(limit).unwrap_or(i64::MAX),
            });
        }
        self.wavetable = wavetable;
        Ok(())
    }

    /// Note of the most recent render.
    pub fn note(&self) -> Note {
        self.note
    }

    /// Output of the most recent render.
    pub fn output(&self) -> &RenderBuffer {
        &self.output
    }

    /// Single-cycle render of the first waveform.
    pub fn first_buffer(&self) -> &[f32] {
        &self.first_buffer
    }

    /// Single-cycle render of the last waveform.
    pub fn last_buffer(&self) -> &[f32] {
        &self.last_buffer
    }

    /// The playback sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the playback sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the synth, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Playable length of a render with the current segment count.
    pub fn note_duration_secs(&self) -> f32 {
        self.settings.waveform_duration_secs * self.wavetable.total_waveforms_count() as f32
    }

    /// Render `note` without submitting it.
    pub fn render_note(&mut self, note: Note) -> Result<&RenderBuffer, RenderError> {
        self.render(note)?;
        Ok(&self.output)
    }

    /// Render `note` and submit it to the sink.
    ///
    /// A sink failure is logged and returned; the rendered buffer stays
    /// available through [`output`](Self::output).
    pub fn note_on(&mut self, note: Note) -> Result<(), SynthError<S::Error>> {
        self.render(note)?;
        let duration_secs = self.note_duration_secs();
        self.sink
            .submit(
                &self.output,
                self.settings.sample_rate,
                self.settings.output_gain,
                duration_secs,
            )
            .map_err(|e| {
                tracing::warn!(error = %e, "playback sink rejected buffer");
                SynthError::Sink(e)
            })
    }

    /// Validate a note-on record and play it.
    ///
    /// An invalid record is a no-op: nothing is rendered or submitted.
    pub fn note_on_data(&mut self, data: NoteData) -> Result<(), SynthError<S::Error>> {
        let note = Note::try_from(data)?;
        self.note_on(note)
    }

    fn render(&mut self, note: Note) -> Result<(), RenderError> {
        let len = self.settings.single_waveform_len();
        let segments = self.wavetable.total_waveforms_count();
        let required = len * segments;
        if required > self.output.capacity() {
            tracing::warn!(
                required,
                available = self.output.capacity(),
                "skipping note: output buffer too small"
            );
            return Err(RenderError::BufferTooSmall {
                buffer: "output",
                required,
                available: self.output.capacity(),
            });
        }

        self.note = note;
        tracing::debug!(
            note = %note,
            segments,
            segment_len = len,
            "note on"
        );

        self.first_oscillator
            .configure(self.wavetable.first_main_waveform(), note);
        self.last_oscillator
            .configure(self.wavetable.last_main_waveform(), note);
        self.first_oscillator
            .fill_buffer(&mut self.first_buffer, 0, len)?;
        self.last_oscillator
            .fill_buffer(&mut self.last_buffer, 0, len)?;

        self.output.set_layout(len, segments);
        let first = &self.first_buffer;
        let last = &self.last_buffer;
        for channel in self.output.channels_mut() {
            for (segment, chunk) in channel[..required].chunks_exact_mut(len.max(1)).enumerate() {
                let t = segment as f32 / segments as f32;
                for ((out, &a), &b) in chunk.iter_mut().zip(first).zip(last) {
                    *out = crossfade(a, b, t);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use crate::waveform::SingleWaveform;
    use morphtable_core::{AmplitudeEnvelope, Detune, WaveformShape};

    fn small_settings() -> SynthSettings {
        SynthSettings {
            sample_rate: 8000,
            channels: 2,
            waveform_duration_secs: 0.05,
            max_waveform_count: 8,
            output_gain: 0.7,
        }
    }

    fn sine_to_saw() -> WaveTable {
        let mut table = WaveTable::with_max_waveform_count(8);
        let full = AmplitudeEnvelope::flat(1.0).unwrap();
        table
            .set_main_waveform(
                0,
                SingleWaveform::new(
                    WaveformShape::Sine,
                    WaveformShape::Sine,
                    Detune::ZERO,
                    Detune::ZERO,
                    full.clone(),
                ),
            )
            .unwrap();
        table
            .set_main_waveform(
                1,
                SingleWaveform::new(
                    WaveformShape::Saw,
                    WaveformShape::Square,
                    Detune::ZERO,
                    Detune::new(1, 0).unwrap(),
                    full,
                ),
            )
            .unwrap();
        table
    }

    fn synth() -> WaveTableSynth<RecordingSink> {
        let mut synth = WaveTableSynth::new(small_settings(), RecordingSink::new());
        synth.set_wavetable(sine_to_saw()).unwrap();
        synth
    }

    #[test]
    fn output_has_n_segments_of_single_cycle_length() {
        let mut synth = synth();
        synth.wavetable_mut().set_total_waveforms_count(4).unwrap();
        let buffer = synth.render_note(Note::reference()).unwrap();
        assert_eq!(buffer.segment_len(), 400);
        assert_eq!(buffer.segment_count(), 4);
        assert_eq!(buffer.frames(), 1600);
        assert_eq!(buffer.channel_count(), 2);
    }

    #[test]
    fn first_segment_is_first_waveform() {
        let mut synth = synth();
        synth.render_note(Note::reference()).unwrap();
        let first = synth.first_buffer().to_vec();
        assert_eq!(synth.output().segment(0, 0).unwrap(), first.as_slice());
    }

    #[test]
    fn last_segment_uses_n_minus_one_over_n() {
        let mut synth = synth();
        synth.wavetable_mut().set_total_waveforms_count(5).unwrap();
        synth.render_note(Note::reference()).unwrap();
        let first = synth.first_buffer();
        let last = synth.last_buffer();
        let segment = synth.output().segment(1, 4).unwrap();
        for i in 0..first.len() {
            assert_eq!(segment[i], crossfade(first[i], last[i], 0.8));
        }
    }

    #[test]
    fn single_segment_is_first_waveform_only() {
        let mut synth = synth();
        synth.wavetable_mut().set_total_waveforms_count(1).unwrap();
        synth.render_note(Note::reference()).unwrap();
        assert_eq!(synth.output().frames(), 400);
        assert_eq!(synth.output().channel(0).unwrap(), synth.first_buffer());
    }

    #[test]
    fn channels_are_identical() {
        let mut synth = synth();
        let buffer = synth.render_note(Note::new(40).unwrap()).unwrap();
        assert_eq!(buffer.channel(0), buffer.channel(1));
    }

    #[test]
    fn note_on_submits_with_gain_and_duration() {
        let mut synth = synth();
        synth.wavetable_mut().set_total_waveforms_count(3).unwrap();
        synth.note_on(Note::reference()).unwrap();
        let played = synth.sink().last().unwrap();
        assert_eq!(played.sample_rate, 8000);
        assert_eq!(played.gain, 0.7);
        assert!((played.duration_secs - 0.15).abs() < 1e-6);
        assert_eq!(&played.buffer, synth.output());
    }

    #[test]
    fn invalid_note_record_is_a_no_op() {
        let mut synth = synth();
        synth.note_on(Note::new(30).unwrap()).unwrap();
        let before = synth.output().clone();
        let err = synth
            .note_on_data(NoteData {
                semitone: 88,
                octave_detune: 0,
                semitone_detune: 0,
            })
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidNote(_)));
        assert_eq!(synth.note().semitone(), 30);
        assert_eq!(synth.output(), &before);
        assert_eq!(synth.sink().submissions().len(), 1);
    }

    #[test]
    fn oversized_wavetable_is_rejected() {
        let mut synth = synth();
        assert!(
            synth
                .set_wavetable(WaveTable::with_max_waveform_count(16))
                .is_err()
        );
        assert_eq!(synth.wavetable(), &sine_to_saw());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("device gone")]
    struct DeviceGone;

    struct FailingSink;

    impl PlaybackSink for FailingSink {
        type Error = DeviceGone;

        fn submit(&mut self, _: &RenderBuffer, _: u32, _: f32, _: f32) -> Result<(), DeviceGone> {
            Err(DeviceGone)
        }
    }

    #[test]
    fn sink_error_keeps_render() {
        let mut synth = WaveTableSynth::new(small_settings(), FailingSink);
        let err = synth.note_on(Note::reference()).unwrap_err();
        assert!(matches!(err, SynthError::Sink(DeviceGone)));
        assert_eq!(synth.output().frames(), 8 * 400);
    }
}
