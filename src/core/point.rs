use std::fmt::Display;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::{traits::OptModel, Float};

/// The penalty added to the constraint violation of an infeasible location.
pub const PUNISHMENT: Float = 1e6;

/// A location in parameter space together with its penalized fitness.
///
/// The fitness is the objective value if the location is feasible, and
/// `violation + `[`PUNISHMENT`] otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    /// The location
    pub x: DVector<Float>,
    /// The fitness at `x` (`+inf` until evaluated)
    pub fx: Float,
    /// Whether `x` satisfies all constraints
    pub feasible: bool,
}
impl Default for Point {
    fn default() -> Self {
        Self {
            x: DVector::zeros(0),
            fx: Float::INFINITY,
            feasible: false,
        }
    }
}
impl Point {
    /// Evaluate the fitness of the point under the penalty method.
    ///
    /// The objective is only evaluated if the location is feasible.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if either model evaluation fails.
    pub fn evaluate<U, E>(
        &mut self,
        model: &dyn OptModel<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        let violation = model.constraint_violation(self.x.as_slice(), user_data)?;
        if violation > 0.0 {
            self.fx = violation + PUNISHMENT;
            self.feasible = false;
        } else {
            self.fx = model.objective(self.x.as_slice(), user_data)?;
            self.feasible = true;
        }
        Ok(())
    }
    /// Compare two points by their fitness.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.fx.total_cmp(&other.fx)
    }
    /// The dimension of the location.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x: {:?}, f(x): {}{}",
            self.x.as_slice(),
            self.fx,
            if self.feasible { "" } else { " (infeasible)" }
        )
    }
}

impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self {
            x: value,
            ..Default::default()
        }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        DVector::from_vec(value).into()
    }
}
impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        DVector::from_column_slice(value).into()
    }
}
