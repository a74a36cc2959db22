//! Sampled keyframe curves
//!
//! Designers author a handful of `(time, value)` keys; gameplay code samples
//! the curve at arbitrary times. Times outside the key range clamp to the
//! first/last key.

use serde::{Deserialize, Serialize};

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// How values between two keys are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveInterpolation {
    /// Straight line between neighbouring keys
    #[default]
    Linear,
    /// Cubic Hermite with tangents estimated from neighbouring keys
    Smooth,
}

/// Errors raised while building a curve
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("a curve needs at least one keyframe")]
    Empty,

    #[error("keyframe {index} is not finite (time {time}, value {value})")]
    NonFinite { index: usize, time: f32, value: f32 },
}

#[derive(Deserialize)]
struct RawCurve {
    keys: Vec<Keyframe>,
    #[serde(default)]
    interpolation: CurveInterpolation,
}

/// A piecewise curve over sorted keyframes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct SampledCurve {
    keys: Vec<Keyframe>,
    interpolation: CurveInterpolation,
}

impl TryFrom<RawCurve> for SampledCurve {
    type Error = CurveError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        Self::with_interpolation(raw.keys, raw.interpolation)
    }
}

impl SampledCurve {
    /// Build a linearly interpolated curve
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        Self::with_interpolation(keys, CurveInterpolation::Linear)
    }

    /// Build a curve with an explicit interpolation mode
    pub fn with_interpolation(
        mut keys: Vec<Keyframe>,
        interpolation: CurveInterpolation,
    ) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        if let Some((index, key)) = keys
            .iter()
            .enumerate()
            .find(|(_, k)| !k.time.is_finite() || !k.value.is_finite())
        {
            return Err(CurveError::NonFinite {
                index,
                time: key.time,
                value: key.value,
            });
        }

        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self {
            keys,
            interpolation,
        })
    }

    /// A straight line from `(0, start)` to `(1, end)`
    pub fn linear(start: f32, end: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)],
            interpolation: CurveInterpolation::Linear,
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn interpolation(&self) -> CurveInterpolation {
        self.interpolation
    }

    /// Sample the curve at `time`
    pub fn evaluate(&self, time: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];

        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; the bounds checks above guarantee 1..len
        let upper = self.keys.partition_point(|k| k.time <= time);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];

        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        let t = (time - a.time) / span;

        match self.interpolation {
            CurveInterpolation::Linear => a.value + (b.value - a.value) * t,
            CurveInterpolation::Smooth => {
                let m0 = self.tangent(upper - 1) * span;
                let m1 = self.tangent(upper) * span;
                hermite(a.value, m0, b.value, m1, t)
            }
        }
    }

    /// Finite-difference slope at key `index`
    fn tangent(&self, index: usize) -> f32 {
        let prev = self.keys[index.saturating_sub(1)];
        let next = self.keys[(index + 1).min(self.keys.len() - 1)];
        let dt = next.time - prev.time;
        if dt <= f32::EPSILON {
            0.0
        } else {
            (next.value - prev.value) / dt
        }
    }
}

fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * t3 - 3.0 * t2 + 1.0) * p0
        + (t3 - 2.0 * t2 + t) * m0
        + (-2.0 * t3 + 3.0 * t2) * p1
        + (t3 - t2) * m1
}
