//! Piecewise-linear amplitude envelope over one waveform cycle.

use crate::error::{ParamError, check_index, check_range_f32};
use crate::settings::STEP_COUNT;

/// A fixed-resolution amplitude envelope.
///
/// Holds [`STEP_COUNT`] amplitudes in `[0, 1]`. Reading at a normalized
/// position `x` interpolates linearly between the two surrounding steps:
///
/// ```text
/// step  = STEP_COUNT * x
/// lower = floor(step)
/// upper = min(ceil(step), STEP_COUNT - 1)
/// a(x)  = env[lower] + (env[upper] - env[lower]) * fract(step)
/// ```
///
/// Past the last step the envelope holds its final value, so `x = 1.0`
/// (and anything in the last step's span) stays inside the table.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeEnvelope {
    steps: [f32; STEP_COUNT],
}

impl Default for AmplitudeEnvelope {
    fn default() -> Self {
        Self::flat_unchecked(0.5)
    }
}

impl AmplitudeEnvelope {
    /// Envelope with every step at `level`.
    pub fn flat(level: f32) -> Result<Self, ParamError> {
        check_range_f32("amplitude", level, 0.0, 1.0)?;
        Ok(Self::flat_unchecked(level))
    }

    const fn flat_unchecked(level: f32) -> Self {
        Self {
            steps: [level; STEP_COUNT],
        }
    }

    /// Build from a full step array. Every value must lie in `[0, 1]`.
    pub fn from_steps(steps: [f32; STEP_COUNT]) -> Result<Self, ParamError> {
        for &value in &steps {
            check_range_f32("amplitude", value, 0.0, 1.0)?;
        }
        Ok(Self { steps })
    }

    /// Build from a slice, which must hold exactly [`STEP_COUNT`] values.
    pub fn from_slice(values: &[f32]) -> Result<Self, ParamError> {
        let steps: [f32; STEP_COUNT] = values.try_into().map_err(|_| {
            tracing::warn!(
                len = values.len(),
                expected = STEP_COUNT,
                "rejected envelope of wrong length"
            );
            ParamError::IndexOutOfRange {
                param: "amplitude_envelope",
                index: values.len(),
                len: STEP_COUNT,
            }
        })?;
        Self::from_steps(steps)
    }

    /// Step amplitudes.
    pub fn steps(&self) -> &[f32; STEP_COUNT] {
        &self.steps
    }

    /// Amplitude of step `index`, if in range.
    pub fn step(&self, index: usize) -> Option<f32> {
        self.steps.get(index).copied()
    }

    /// Set a single step. Rejects bad indices and values outside `[0, 1]`.
    pub fn set_step(&mut self, index: usize, value: f32) -> Result<(), ParamError> {
        check_index("amplitude_envelope", index, STEP_COUNT)?;
        check_range_f32("amplitude", value, 0.0, 1.0)?;
        self.steps[index] = value;
        Ok(())
    }

    /// Interpolated amplitude at normalized cycle position `x`.
    ///
    /// `x` is clamped to `[0, 1]`.
    #[inline]
    pub fn amplitude_at(&self, x: f32) -> f32 {
        let step = STEP_COUNT as f32 * x.clamp(0.0, 1.0);
        let lower = (step as usize).min(STEP_COUNT - 1);
        let upper = (lower + 1).min(STEP_COUNT - 1);
        let frac = step - lower as f32;
        let lo = self.steps[lower];
        if frac <= 0.0 || upper == lower {
            return lo;
        }
        lo + (self.steps[upper] - lo) * frac
    }
}
