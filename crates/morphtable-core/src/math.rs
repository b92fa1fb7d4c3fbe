//! Small numeric helpers shared by the render and preview paths.

/// Linear crossfade: `a * (1 - t) + b * t`.
///
/// `t = 0` yields `a`, `t = 1` yields `b`.
#[inline]
pub fn crossfade(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Wrap a phase in cycles to `[0, 1)`.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - libm::floorf(phase);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
