use fastrand::Rng;

use crate::core::{Config, Error, Summary};

use super::OptModel;

/// A trait representing a generational minimization algorithm.
///
/// The state of a run lives in the status `S`, which is owned by the
/// [`Minimizer`](crate::core::Minimizer) and passed in explicitly, as is the single random number
/// generator of the run. A solver itself only holds its hyper-parameters, so one instance can be
/// reused for any number of independent solves.
pub trait Solver<S, U, E> {
    /// Create and evaluate the initial population.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the solver's requirements on the [`Config`] are not met or if a
    /// model evaluation fails.
    fn initialize(
        &mut self,
        model: &dyn OptModel<U, E>,
        config: &Config,
        status: &mut S,
        rng: &mut Rng,
        user_data: &mut U,
    ) -> Result<(), Error<E>>;
    /// Run one generation (`i_step` counts from zero). Implementations must leave `status`
    /// untouched if an evaluation fails.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Model`] if a model evaluation fails.
    fn step(
        &mut self,
        i_step: usize,
        model: &dyn OptModel<U, E>,
        config: &Config,
        status: &mut S,
        rng: &mut Rng,
        user_data: &mut U,
    ) -> Result<(), Error<E>>;
    /// Runs any termination/convergence checks after a generation and returns `true` if the
    /// algorithm has converged. Implementations should also update the status here if converged.
    fn check_for_termination(&mut self, config: &Config, status: &mut S) -> bool;
    /// Runs any steps needed by the [`Solver`] after the loop ends, regardless of whether it
    /// converged.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if any final evaluation fails.
    #[allow(unused_variables)]
    fn postprocessing(&mut self, config: &Config, status: &mut S) -> Result<(), Error<E>> {
        Ok(())
    }
    /// Generates a new [`Summary`] from the current state of the run.
    fn summarize(&self, config: &Config, status: &S) -> Summary;
}
