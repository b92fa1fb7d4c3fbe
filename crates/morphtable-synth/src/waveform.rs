//! Edited waveform: a start/end shape pair with detunes and an envelope.

use morphtable_core::{AmplitudeEnvelope, Detune, ParamError, STEP_COUNT, WaveformShape};

/// Plain waveform record, as produced by an editor.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleWaveformData {
    /// Shape at the start of the cycle.
    pub start_shape: WaveformShape,
    /// Shape at the end of the cycle.
    pub end_shape: WaveformShape,
    /// Octave detune at the start of the sweep.
    pub start_octave_detune: i32,
    /// Semitone detune at the start of the sweep.
    pub start_semitone_detune: i32,
    /// Octave detune at the end of the sweep.
    pub end_octave_detune: i32,
    /// Semitone detune at the end of the sweep.
    pub end_semitone_detune: i32,
    /// Envelope steps, each in `[0, 1]`.
    pub amplitude_envelope: [f32; STEP_COUNT],
}

impl Default for SingleWaveformData {
    fn default() -> Self {
        SingleWaveform::default().data()
    }
}

/// One timbral endpoint of a wavetable.
///
/// The start shape morphs into the end shape across the rendered cycle while
/// the pitch glides from `start_detune` to `end_detune`. The default is a
/// plain sine at half amplitude with no detune.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleWaveform {
    start_shape: WaveformShape,
    end_shape: WaveformShape,
    start_detune: Detune,
    end_detune: Detune,
    envelope: AmplitudeEnvelope,
}

impl SingleWaveform {
    /// Build a waveform from validated parts.
    pub fn new(
        start_shape: WaveformShape,
        end_shape: WaveformShape,
        start_detune: Detune,
        end_detune: Detune,
        envelope: AmplitudeEnvelope,
    ) -> Self {
        Self {
            start_shape,
            end_shape,
            start_detune,
            end_detune,
            envelope,
        }
    }

    /// Waveform with the same shape at both ends and a flat envelope.
    pub fn with_shape(shape: WaveformShape) -> Self {
        Self {
            start_shape: shape,
            end_shape: shape,
            ..Self::default()
        }
    }

    /// Shape at the start of the cycle.
    pub fn start_shape(&self) -> WaveformShape {
        self.start_shape
    }

    /// Shape at the end of the cycle.
    pub fn end_shape(&self) -> WaveformShape {
        self.end_shape
    }

    /// Set the start shape.
    pub fn set_start_shape(&mut self, shape: WaveformShape) {
        self.start_shape = shape;
    }

    /// Set the end shape.
    pub fn set_end_shape(&mut self, shape: WaveformShape) {
        self.end_shape = shape;
    }

    /// Detune at the start of the sweep.
    pub fn start_detune(&self) -> Detune {
        self.start_detune
    }

    /// Detune at the end of the sweep.
    pub fn end_detune(&self) -> Detune {
        self.end_detune
    }

    /// Replace the start detune.
    pub fn set_start_detune(&mut self, detune: Detune) {
        self.start_detune = detune;
    }

    /// Replace the end detune.
    pub fn set_end_detune(&mut self, detune: Detune) {
        self.end_detune = detune;
    }

    /// Set the start octave offset. Rejected outside `[-4, 4]`.
    pub fn set_start_octave_detune(&mut self, octave: i32) -> Result<(), ParamError> {
        self.start_detune.set_octave(octave)
    }

    /// Set the start semitone offset. Rejected outside `[-12, 12]`.
    pub fn set_start_semitone_detune(&mut self, semitone: i32) -> Result<(), ParamError> {
        self.start_detune.set_semitone(semitone)
    }

    /// Set the end octave offset. Rejected outside `[-4, 4]`.
    pub fn set_end_octave_detune(&mut self, octave: i32) -> Result<(), ParamError> {
        self.end_detune.set_octave(octave)
    }

    /// Set the end semitone offset. Rejected outside `[-12, 12]`.
    pub fn set_end_semitone_detune(&mut self, semitone: i32) -> Result<(), ParamError> {
        self.end_detune.set_semitone(semitone)
    }

    /// Amplitude envelope.
    pub fn envelope(&self) -> &AmplitudeEnvelope {
        &self.envelope
    }

    /// Replace the amplitude envelope.
    pub fn set_envelope(&mut self, envelope: AmplitudeEnvelope) {
        self.envelope = envelope;
    }

    /// Set one envelope step. Rejected for bad indices or values outside `[0, 1]`.
    pub fn set_envelope_step(&mut self, index: usize, value: f32) -> Result<(), ParamError> {
        self.envelope.set_step(index, value)
    }

    /// Copy out the plain record.
    pub fn data(&self) -> SingleWaveformData {
        SingleWaveformData {
            start_shape: self.start_shape,
            end_shape: self.end_shape,
            start_octave_detune: self.start_detune.octave(),
            start_semitone_detune: self.start_detune.semitone(),
            end_octave_detune: self.end_detune.octave(),
            end_semitone_detune: self.end_detune.semitone(),
            amplitude_envelope: *self.envelope.steps(),
        }
    }

    /// Apply a record through the validating setters.
    ///
    /// Fields are applied independently: valid ones are written even when
    /// another is rejected. The envelope is replaced only if every step is
    /// valid. Returns the first rejection.
    pub fn set_data(&mut self, data: &SingleWaveformData) -> Result<(), ParamError> {
        self.start_shape = data.start_shape;
        self.end_shape = data.end_shape;
        let results = [
            self.set_start_octave_detune(data.start_octave_detune),
            self.set_start_semitone_detune(data.start_semitone_detune),
            self.set_end_octave_detune(data.end_octave_detune),
            self.set_end_semitone_detune(data.end_semitone_detune),
            AmplitudeEnvelope::from_steps(data.amplitude_envelope)
                .map(|envelope| self.envelope = envelope),
        ];
        results.into_iter().collect()
    }
}

impl TryFrom<&SingleWaveformData> for SingleWaveform {
    type Error = ParamError;

    fn try_from(data: &SingleWaveformData) -> Result<Self, Self::Error> {
        Ok(Self {
            start_shape: data.start_shape,
            end_shape: data.end_shape,
            start_detune: Detune::new(data.start_octave_detune, data.start_semitone_detune)?,
            end_detune: Detune::new(data.end_octave_detune, data.end_semitone_detune)?,
            envelope: AmplitudeEnvelope::from_steps(data.amplitude_envelope)?,
        })
    }
}

impl From<&SingleWaveform> for SingleWaveformData {
    fn from(waveform: &SingleWaveform) -> Self {
        waveform.data()
    }
}
