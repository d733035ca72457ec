use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use crate::{
    utils::{clip, clip_to_midpoint, SampleFloat},
    Float,
};

/// A closed interval `[lower, upper]` limiting one coordinate of a location or velocity.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bound {
    lower: Float,
    upper: Float,
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Bound {
    /// Create a new [`Bound`]. The caller is responsible for `lower <= upper`, see
    /// [`Config::from_model`](`crate::core::Config::from_model`) for the validated path.
    pub const fn new(lower: Float, upper: Float) -> Self {
        Self { lower, upper }
    }
    /// A bound symmetric around zero, `[-half_width, half_width]`.
    pub fn symmetric(half_width: Float) -> Self {
        Self::new(-half_width.abs(), half_width.abs())
    }
    /// Get a value in the uniform distribution between `lower` and `upper`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        rng.range(self.lower, self.upper)
    }
    /// Checks whether the given `value` is inside the bound (inclusive).
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Returns the lower bound.
    pub const fn lower(&self) -> Float {
        self.lower
    }
    /// Returns the upper bound.
    pub const fn upper(&self) -> Float {
        self.upper
    }
    /// The width `upper - lower` of the interval.
    pub fn width(&self) -> Float {
        self.upper - self.lower
    }
    /// Checks if the given value is equal to one of the bounds.
    pub fn at_bound(&self, value: Float) -> bool {
        value == self.lower || value == self.upper
    }
    /// Hard clamp into the interval.
    pub fn clip(&self, value: Float) -> Float {
        clip(value, self.lower, self.upper)
    }
    /// Out-of-range values are moved halfway between the crossed boundary and `previous`.
    pub fn clip_to_midpoint(&self, value: Float, previous: Float) -> Float {
        clip_to_midpoint(value, self.lower, self.upper, previous)
    }
}

/// A list of [`Bound`]s, one per dimension.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Zip per-dimension lower and upper limits into a list of [`Bound`]s. Extra entries of the
    /// longer slice are ignored.
    pub fn from_limits(lower: &[Float], upper: &[Float]) -> Self {
        Self(
            lower
                .iter()
                .zip(upper)
                .map(|(&lb, &ub)| Bound::new(lb, ub))
                .collect(),
        )
    }
    /// Velocity-style bounds `[-w_i, w_i]` where `w_i` is the width of each bound in `self`.
    pub fn spans(&self) -> Self {
        Self(self.iter().map(|b| Bound::symmetric(b.width())).collect())
    }
    /// Checks whether every coordinate of `x` is inside its bound.
    pub fn contains_vec(&self, x: &[Float]) -> bool {
        x.iter().zip(self.iter()).all(|(&xi, b)| b.contains(xi))
    }
    /// Hard clamp of every coordinate of `x`.
    pub fn clip_vec(&self, x: &[Float]) -> Vec<Float> {
        x.iter().zip(self.iter()).map(|(&xi, b)| b.clip(xi)).collect()
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(value: Vec<Bound>) -> Self {
        Self(value)
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bounds {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
