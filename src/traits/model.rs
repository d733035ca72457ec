use std::convert::Infallible;

use crate::Float;

/// A trait which describes a (possibly constrained) minimization problem over $`\mathbb{R}^n`$ or
/// $`\{0, 1\}^n`$.
///
/// Only the objective and the dimension are required. Everything else is an optional capability
/// with a stated default:
///
/// | method | default |
/// |---|---|
/// | [`constraint_violation`](`OptModel::constraint_violation`) | `0` (unconstrained) |
/// | [`min_location`](`OptModel::min_location`) / [`max_location`](`OptModel::max_location`) | empty |
/// | [`min_velocity`](`OptModel::min_velocity`) / [`max_velocity`](`OptModel::max_velocity`) | empty |
/// | [`max_iterations`](`OptModel::max_iterations`) | `1000` |
/// | [`tol_fitness`](`OptModel::tol_fitness`) | `-99999` |
///
/// Such a model may also take a `user_data: &mut U` field which can be used to pass external
/// arguments to the model during minimization, or can be modified by the model itself. The
/// generic `E` represents any error that might be returned during evaluation.
pub trait OptModel<U = (), E = Infallible> {
    /// The objective value at a (feasible) location `x`.
    ///
    /// A `NaN` value never becomes a personal or global best unless no other value has been
    /// seen yet, and it is replaced by the first number that follows.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the evaluation never fails.
    fn objective(&self, x: &[Float], user_data: &mut U) -> Result<Float, E>;

    /// The total constraint violation at `x`. Positive values mark `x` as infeasible and their
    /// magnitude is the amount of violation; values `<= 0` are feasible. Equality constraints
    /// should be expressed as inequalities with some tolerance.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`OptModel::objective`] for more
    /// information.
    #[allow(unused_variables)]
    fn constraint_violation(&self, x: &[Float], user_data: &mut U) -> Result<Float, E> {
        Ok(0.0)
    }

    /// The number of free parameters `n`.
    fn dimension(&self) -> usize;

    /// Lower limit of each location coordinate (empty if unbounded).
    fn min_location(&self) -> Vec<Float> {
        Vec::new()
    }

    /// Upper limit of each location coordinate (empty if unbounded).
    fn max_location(&self) -> Vec<Float> {
        Vec::new()
    }

    /// Lower limit of each velocity coordinate (empty if unbounded).
    fn min_velocity(&self) -> Vec<Float> {
        Vec::new()
    }

    /// Upper limit of each velocity coordinate (empty if unbounded).
    fn max_velocity(&self) -> Vec<Float> {
        Vec::new()
    }

    /// The maximum number of generations.
    fn max_iterations(&self) -> usize {
        1000
    }

    /// Once a feasible solution has been found, the solve stops as soon as the best fitness is at
    /// or below this value. The default is low enough to never trigger on typical problems.
    fn tol_fitness(&self) -> Float {
        -99999.0
    }
}
