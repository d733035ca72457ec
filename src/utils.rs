use fastrand::Rng;
use fastrand_contrib::RngExt;
use nalgebra::DVector;

use crate::{core::Bounds, Float};

/// The Euclidean norm $`\|x\|_2`$ of a vector.
pub fn norm(x: &[Float]) -> Float {
    x.iter().map(|xi| xi * xi).sum::<Float>().sqrt()
}

/// Returns the index of the smallest value, or [`None`] if `values` is empty.
///
/// Ties resolve to the first occurrence. `NaN` entries are skipped, unless every entry is `NaN`,
/// in which case the first index is returned.
pub fn arg_min(values: &[Float]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best: Option<(usize, Float)> = None;
    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, min_value)| value < min_value) {
            best = Some((i, value));
        }
    }
    Some(best.map_or(0, |(i, _)| i))
}

/// Returns the index of the smallest value among the entries flagged as feasible.
///
/// If `feasible_only` is `false`, every entry is considered (equivalent to [`arg_min`]). Returns
/// [`None`] when no entry qualifies. Ties resolve to the first occurrence.
pub fn arg_min_feasible(values: &[Float], feasible: &[bool], feasible_only: bool) -> Option<usize> {
    let mut best: Option<(usize, Float)> = None;
    for (i, (&value, &is_feasible)) in values.iter().zip(feasible).enumerate() {
        if feasible_only && !is_feasible {
            continue;
        }
        if best.map_or(true, |(_, min_value)| value < min_value) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

/// Checks that no constraint in a list of individual constraint values is violated (positive).
pub fn is_feasible(constraint_values: &[Float]) -> bool {
    constraint_values.iter().all(|&c| c <= 0.0)
}

/// Hard clamp of `value` into `[lower, upper]`.
pub fn clip(value: Float, lower: Float, upper: Float) -> Float {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// Clamp of `value` into `[lower, upper]` which, instead of pinning an out-of-range value to the
/// boundary, moves it to the midpoint between the violated boundary and `previous`.
///
/// In-range values pass through unchanged.
pub fn clip_to_midpoint(value: Float, lower: Float, upper: Float, previous: Float) -> Float {
    if value < lower {
        (lower + previous) / 2.0
    } else if value > upper {
        (upper + previous) / 2.0
    } else {
        value
    }
}

/// The logistic function $`\sigma(v) = 1 / (1 + e^{-v})`$.
pub fn sigmoid(v: Float) -> Float {
    1.0 / (1.0 + Float::exp(-v))
}

/// Stochastic binarization of a velocity component.
///
/// Returns `1.0` if $`\sigma(v) \geq r`$ and `0.0` otherwise, where `r` is a uniform random
/// number in `[0, 1)`.
pub fn sigmoid_threshold(v: Float, r: Float) -> Float {
    if sigmoid(v) < r {
        0.0
    } else {
        1.0
    }
}

/// Maps a uniform random number in `[0, 1)` to a fair bit.
pub fn random_bit(r: Float) -> Float {
    if r < 0.5 {
        0.0
    } else {
        1.0
    }
}

pub(crate) fn generate_random_vector_in_limits(bounds: &Bounds, rng: &mut Rng) -> DVector<Float> {
    DVector::from_iterator(bounds.len(), bounds.iter().map(|b| b.get_uniform(rng)))
}

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in a range
    fn range(&mut self, lower: Float, upper: Float) -> Float;
    /// Get a random value in the range [0, 1)
    fn float(&mut self) -> Float;
    /// Get a random Normal value
    fn normal(&mut self, mu: Float, sigma: Float) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        if lower >= upper {
            return lower;
        }
        self.f64_range(lower..upper)
    }
    #[cfg(feature = "f32")]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        if lower >= upper {
            return lower;
        }
        self.f32_range(lower..upper)
    }
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
    #[cfg(not(feature = "f32"))]
    fn normal(&mut self, mu: Float, sigma: Float) -> Float {
        self.f64_normal(mu, sigma)
    }
    #[cfg(feature = "f32")]
    fn normal(&mut self, mu: Float, sigma: Float) -> Float {
        self.f32_normal(mu, sigma)
    }
}
