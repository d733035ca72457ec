use serde::{Deserialize, Serialize};

use crate::{traits::OptModel, Float};

use super::{Bounds, Error};

/// The per-solve configuration read once from the [`OptModel`] before the swarm is created.
///
/// This struct contains basic information that every [`Solver`](crate::traits::Solver) needs to
/// run: the number of free parameters, the (validated) bounds, the generation cap and the fitness
/// tolerance.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// The dimension of the minimization problem.
    pub dimension: usize,
    /// Bounds on the location, [`None`] if the model gives none.
    pub location_bounds: Option<Bounds>,
    /// Bounds on the velocity, [`None`] if the model gives none.
    pub velocity_bounds: Option<Bounds>,
    /// The maximum number of generations.
    pub max_steps: usize,
    /// The fitness tolerance used for early termination.
    pub tol_fitness: Float,
    /// Optional parameter names
    pub parameter_names: Option<Vec<String>>,
}

impl Config {
    /// Read and validate the dimension, bounds, generation cap and tolerance of a model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroDimension`] for a model without parameters,
    /// [`Error::DimensionMismatch`] if a non-empty limit array does not have length
    /// [`OptModel::dimension`] (or only one of a min/max pair is given), and
    /// [`Error::InvalidBound`] if some lower limit exceeds its upper limit.
    pub fn from_model<U, E>(model: &dyn OptModel<U, E>) -> Result<Self, Error<E>> {
        let dimension = model.dimension();
        if dimension == 0 {
            return Err(Error::ZeroDimension);
        }
        let location_bounds = Self::read_bounds(
            dimension,
            ("minimum location", model.min_location()),
            ("maximum location", model.max_location()),
        )?;
        let velocity_bounds = Self::read_bounds(
            dimension,
            ("minimum velocity", model.min_velocity()),
            ("maximum velocity", model.max_velocity()),
        )?;
        Ok(Self {
            dimension,
            location_bounds,
            velocity_bounds,
            max_steps: model.max_iterations(),
            tol_fitness: model.tol_fitness(),
            parameter_names: None,
        })
    }

    fn read_bounds<E>(
        dimension: usize,
        lower: (&'static str, Vec<Float>),
        upper: (&'static str, Vec<Float>),
    ) -> Result<Option<Bounds>, Error<E>> {
        let ((lower_name, lower), (upper_name, upper)) = (lower, upper);
        if lower.is_empty() && upper.is_empty() {
            return Ok(None);
        }
        for (name, limits) in [(lower_name, &lower), (upper_name, &upper)] {
            if limits.len() != dimension {
                return Err(Error::DimensionMismatch {
                    name,
                    expected: dimension,
                    found: limits.len(),
                });
            }
        }
        if let Some((index, (&lb, &ub))) = lower
            .iter()
            .zip(&upper)
            .enumerate()
            .find(|(_, (lb, ub))| lb > ub || lb.is_nan() || ub.is_nan())
        {
            return Err(Error::InvalidBound {
                index,
                lower: lb,
                upper: ub,
            });
        }
        Ok(Some(Bounds::from_limits(&lower, &upper)))
    }

    /// Sets the names of the parameters. This is only used for printing and debugging purposes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the number of names is not equal to the number of
    /// free parameters.
    pub fn with_parameter_names<E>(&mut self, names: &[String]) -> Result<&mut Self, Error<E>> {
        if names.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                name: "parameter names",
                expected: self.dimension,
                found: names.len(),
            });
        }
        self.parameter_names = Some(names.to_vec());
        Ok(self)
    }

    /// Set the maximum number of generations, overriding [`OptModel::max_iterations`].
    pub fn with_max_steps(&mut self, max_steps: usize) -> &mut Self {
        self.max_steps = max_steps;
        self
    }
}
