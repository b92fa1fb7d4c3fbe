//! Criterion benchmarks for morphtable-synth components
//!
//! Run with: cargo bench -p morphtable-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use morphtable_core::{AmplitudeEnvelope, Detune, Note, SynthSettings, WaveformShape};
use morphtable_synth::{
    MultiShapeOscillator, NullSink, PreviewResolution, SingleShapeOscillator, SingleWaveform,
    WaveTablePreview, WaveTableSynth,
};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK_SIZES: &[usize] = &[512, 4096, 22050];

// ============================================================================
// Oscillator benchmarks
// ============================================================================

fn bench_single_shape_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("SingleShapeOscillator");

    for shape in WaveformShape::ALL {
        for &block_size in BLOCK_SIZES {
            let osc = SingleShapeOscillator::new(
                shape,
                Note::reference(),
                AmplitudeEnvelope::default(),
                Detune::ZERO,
                Detune::new(1, 0).unwrap(),
                SAMPLE_RATE,
            );
            let mut buf = vec![0.0f32; block_size];

            group.bench_with_input(
                BenchmarkId::new(shape.name(), block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        osc.fill_buffer(&mut buf, 0, size).unwrap();
                        black_box(buf[size - 1])
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_multi_shape_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("MultiShapeOscillator");

    let mut waveform = SingleWaveform::with_shape(WaveformShape::Saw);
    waveform.set_end_shape(WaveformShape::Triangle);

    for &block_size in BLOCK_SIZES {
        let mut osc =
            MultiShapeOscillator::new(&waveform, Note::reference(), SAMPLE_RATE, block_size);
        let mut buf = vec![0.0f32; block_size];

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    osc.fill_buffer(&mut buf, 0, size).unwrap();
                    black_box(buf[size - 1])
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Note-on benchmarks
// ============================================================================

fn bench_note_on(c: &mut Criterion) {
    let mut group = c.benchmark_group("WaveTableSynth");

    for segments in [1usize, 8] {
        let mut synth = WaveTableSynth::new(SynthSettings::default(), NullSink);
        synth
            .wavetable_mut()
            .set_main_waveform(1, SingleWaveform::with_shape(WaveformShape::Square))
            .unwrap();
        synth
            .wavetable_mut()
            .set_total_waveforms_count(segments)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("note_on", segments),
            &segments,
            |b, _| {
                b.iter(|| {
                    synth.note_on(black_box(Note::reference())).unwrap();
                })
            },
        );
    }

    group.finish();
}

fn bench_wavetable_preview(c: &mut Criterion) {
    let mut synth = WaveTableSynth::new(SynthSettings::default(), NullSink);
    synth
        .wavetable_mut()
        .set_main_waveform(0, SingleWaveform::with_shape(WaveformShape::Saw))
        .unwrap();
    let mut preview = WaveTablePreview::new(synth.wavetable(), PreviewResolution::WAVETABLE);
    let len = preview.len();

    c.bench_function("WaveTablePreview/tick_all", |b| {
        b.iter(|| black_box(preview.tick_all(len)))
    });
}

criterion_group!(
    benches,
    bench_single_shape_fill,
    bench_multi_shape_fill,
    bench_note_on,
    bench_wavetable_preview,
);

criterion_main!(benches);
