//! Analytic waveform shapes.
//!
//! Each shape is a periodic function of a phase `x` in radians (period 2π)
//! scaled by an envelope amplitude. `x` does not need to be wrapped.

use core::f32::consts::{FRAC_2_PI, PI, TAU};
use core::fmt;
use core::str::FromStr;

use libm::{asinf, floorf, sinf};

/// Waveform shape selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveformShape {
    /// `a * sin(x)`
    #[default]
    Sine,
    /// `(2/π) * a * asin(sin(x))`
    Triangle,
    /// `a * sign(sin(x))`, zero where `sin(x)` is zero.
    Square,
    /// `(2/π) * a * atan(cot(x/2))`, a falling ramp from `+a` to `-a`.
    Saw,
}

impl WaveformShape {
    /// All shapes, in selector order.
    pub const ALL: [Self; 4] = [Self::Sine, Self::Triangle, Self::Square, Self::Saw];

    /// Evaluate the shape at phase `x` (radians) with the given amplitude.
    ///
    /// The saw's `atan(cot(x/2))` has no value where `tan(x/2) = 0`; there it
    /// returns `+amplitude`, the limit approached from the right, i.e. the top
    /// of the ramp right after the falling edge.
    #[inline]
    pub fn evaluate(self, x: f32, amplitude: f32) -> f32 {
        match self {
            Self::Sine => amplitude * sinf(x),
            Self::Triangle => FRAC_2_PI * amplitude * asinf(sinf(x).clamp(-1.0, 1.0)),
            Self::Square => {
                let s = sinf(x);
                if s > 0.0 {
                    amplitude
                } else if s < 0.0 {
                    -amplitude
                } else {
                    0.0
                }
            }
            Self::Saw => {
                // atan(cot(θ)) = π/2 - θ for θ in [0, π)
                let half = x * 0.5;
                let mut theta = half - PI * floorf(half / PI);
                if theta < 0.0 {
                    theta += PI;
                }
                if theta >= PI {
                    theta = 0.0;
                }
                amplitude * (1.0 - FRAC_2_PI * theta)
            }
        }
    }

    /// Evaluate at a normalized phase in cycles (1.0 = one period).
    #[inline]
    pub fn evaluate_cycles(self, phase: f32, amplitude: f32) -> f32 {
        self.evaluate(TAU * phase, amplitude)
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Saw => "saw",
        }
    }
}

impl fmt::Display for WaveformShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveformShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Self::Sine),
            "triangle" | "tri" => Ok(Self::Triangle),
            "square" | "sqr" => Ok(Self::Square),
            "saw" | "sawtooth" => Ok(Self::Saw),
            other => Err(format!("unknown waveform shape: {other}")),
        }
    }
}
