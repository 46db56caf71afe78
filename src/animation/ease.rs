/// Easing curve applied to normalized transition progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity mapping, kept for side-by-side comparison output.
    Linear,
    /// Half-cosine ease-in-out, `(1 - cos(t * pi)) / 2`.
    ///
    /// Slope is zero at both endpoints and maximal (pi/2) at `t = 0.5`, which
    /// is what removes the hard start/stop of a linear crossfade.
    CosineInOut,
}

impl Ease {
    /// Map progress `t` through the curve. Inputs are clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let p = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::CosineInOut => 0.5 - 0.5 * (p * std::f64::consts::PI).cos(),
        }
    }
}

/// Effect intensity over a transition: the parabola `4 * t * (1 - t)`.
///
/// Zero at both endpoints, peaking at exactly `1.0` when `t = 0.5`, so
/// blur/shake strength ramps up mid-transition and fully releases at the ends.
pub fn pulse_intensity(t: f64) -> f64 {
    let p = t.clamp(0.0, 1.0);
    4.0 * p * (1.0 - p)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
