//! Integration tests for morphtable-synth crate.
//!
//! Tests cover note-on rendering end to end, segment crossfades, edits made
//! through data records, and agreement between previews and renders.

use morphtable_core::{
    AmplitudeEnvelope, Detune, Note, NoteData, SynthSettings, WaveformShape, crossfade,
};
use morphtable_synth::{
    RecordingSink, SingleWaveform, SingleWaveformData, WaveTableData, WaveTablePreview,
    WaveTableSynth,
};

fn settings() -> SynthSettings {
    SynthSettings {
        sample_rate: 11025,
        channels: 2,
        waveform_duration_secs: 0.1,
        max_waveform_count: 8,
        output_gain: 0.7,
    }
}

fn synth() -> WaveTableSynth<RecordingSink> {
    WaveTableSynth::new(settings(), RecordingSink::new())
}

fn rising_crossings(buf: &[f32]) -> usize {
    buf.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count()
}

// ---------------------------------------------------------------------------
// 1. Note-on end to end
// ---------------------------------------------------------------------------

#[test]
fn default_table_plays_half_amplitude_sine() {
    let mut synth = synth();
    synth.note_on(Note::reference()).unwrap();

    let played = synth.sink().last().unwrap();
    let left = played.buffer.channel(0).unwrap();
    assert_eq!(left.len(), 8 * 1103);

    let peak = left.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    assert!(peak <= 0.5 + 1e-6 && peak > 0.49, "peak {peak}");

    // 44 cycles per 0.1 s segment at 440 Hz
    let crossings = rising_crossings(played.buffer.segment(0, 0).unwrap());
    assert!((43..=44).contains(&crossings), "got {crossings}");
}

#[test]
fn higher_notes_have_more_cycles() {
    let mut synth = synth();
    synth.note_on(Note::from_name("A3").unwrap()).unwrap();
    let low = rising_crossings(synth.first_buffer());
    synth.note_on(Note::from_name("A5").unwrap()).unwrap();
    let high = rising_crossings(synth.first_buffer());
    assert!(high > 3 * low, "low {low}, high {high}");
}

#[test]
fn each_note_on_retriggers_and_replaces_output() {
    let mut synth = synth();
    synth.note_on(Note::new(20).unwrap()).unwrap();
    synth.note_on(Note::new(60).unwrap()).unwrap();

    let subs = synth.sink().submissions();
    assert_eq!(subs.len(), 2);
    assert_ne!(subs[0].buffer, subs[1].buffer);
    assert_eq!(&subs[1].buffer, synth.output());
    assert_eq!(synth.note().semitone(), 60);
}

// ---------------------------------------------------------------------------
// 2. Segment crossfade
// ---------------------------------------------------------------------------

#[test]
fn segments_step_linearly_from_first_to_last() {
    let mut synth = synth();
    let table = synth.wavetable_mut();
    table
        .set_main_waveform(
            0,
            SingleWaveform::new(
                WaveformShape::Square,
                WaveformShape::Square,
                Detune::ZERO,
                Detune::ZERO,
                AmplitudeEnvelope::flat(1.0).unwrap(),
            ),
        )
        .unwrap();
    table
        .set_main_waveform(
            1,
            SingleWaveform::new(
                WaveformShape::Square,
                WaveformShape::Square,
                Detune::ZERO,
                Detune::ZERO,
                AmplitudeEnvelope::flat(0.0).unwrap(),
            ),
        )
        .unwrap();
    table.set_total_waveforms_count(4).unwrap();

    let out = synth.render_note(Note::reference()).unwrap();
    // Square at full amplitude fading to silence: segment k peaks at 1 - k/4.
    for (k, expected) in [1.0f32, 0.75, 0.5, 0.25].into_iter().enumerate() {
        let seg = out.segment(0, k).unwrap();
        let peak = seg.iter().fold(0.0f32, |m, v| m.max(v.abs()));
        assert_eq!(peak, expected, "segment {k}");
    }
}

#[test]
fn every_segment_matches_its_weight() {
    let mut synth = synth();
    synth
        .wavetable_mut()
        .set_main_waveform(1, SingleWaveform::with_shape(WaveformShape::Saw))
        .unwrap();
    synth.wavetable_mut().set_total_waveforms_count(6).unwrap();
    synth.render_note(Note::new(33).unwrap()).unwrap();

    let first = synth.first_buffer();
    let last = synth.last_buffer();
    for channel in 0..2 {
        for k in 0..6 {
            let t = k as f32 / 6.0;
            let seg = synth.output().segment(channel, k).unwrap();
            for i in (0..seg.len()).step_by(37) {
                assert_eq!(seg[i], crossfade(first[i], last[i], t));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Editing through records
// ---------------------------------------------------------------------------

#[test]
fn wavetable_record_drives_render() {
    let mut synth = synth();
    let mut data = WaveTableData::default();
    data.main_waveforms[0] = SingleWaveformData {
        start_shape: WaveformShape::Triangle,
        end_shape: WaveformShape::Saw,
        end_octave_detune: 1,
        ..SingleWaveformData::default()
    };
    data.total_waveforms_count = 2;
    synth.wavetable_mut().set_data(&data).unwrap();

    synth
        .note_on_data(NoteData {
            semitone: 49,
            octave_detune: -1,
            semitone_detune: 0,
        })
        .unwrap();
    let played = synth.sink().last().unwrap();
    assert_eq!(played.buffer.segment_count(), 2);
    assert!((played.duration_secs - 0.2).abs() < 1e-6);
    assert_eq!(synth.wavetable().data(), data);
}

#[test]
fn rejected_note_record_changes_nothing() {
    let mut synth = synth();
    synth.note_on(Note::reference()).unwrap();
    let before = synth.output().clone();

    for bad in [
        NoteData {
            semitone: -1,
            octave_detune: 0,
            semitone_detune: 0,
        },
        NoteData {
            semitone: 40,
            octave_detune: 5,
            semitone_detune: 0,
        },
        NoteData {
            semitone: 40,
            octave_detune: 0,
            semitone_detune: -13,
        },
    ] {
        assert!(synth.note_on_data(bad).is_err());
    }
    assert_eq!(synth.output(), &before);
    assert_eq!(synth.note(), Note::reference());
    assert_eq!(synth.sink().submissions().len(), 1);
}

// ---------------------------------------------------------------------------
// 4. Preview agreement
// ---------------------------------------------------------------------------

#[test]
fn wavetable_preview_for_note_matches_rendered_channel() {
    let mut synth = synth();
    let mut last = SingleWaveform::with_shape(WaveformShape::Square);
    last.set_end_shape(WaveformShape::Triangle);
    last.set_start_detune(Detune::new(0, 7).unwrap());
    synth.wavetable_mut().set_main_waveform(1, last).unwrap();
    synth.wavetable_mut().set_total_waveforms_count(3).unwrap();

    let note = Note::new(45).unwrap();
    let preview: Vec<f32> =
        WaveTablePreview::for_note(synth.wavetable(), note, synth.settings()).collect();
    synth.render_note(note).unwrap();
    assert_eq!(preview.as_slice(), synth.output().channel(0).unwrap());
}
