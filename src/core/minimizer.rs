use std::sync::Arc;

use fastrand::Rng;
use parking_lot::RwLock;

use crate::traits::{AbortSignal, Observer, OptModel, Solver, Status};

use super::{Config, Error, NopAbortSignal, Summary};

/// The main struct used for running [`Solver`]s on [`OptModel`]s.
///
/// The minimizer owns the [`Status`] of the run and the single [`Rng`] which every random draw of
/// the solver comes from. Seeding it with [`Minimizer::with_seed`] makes a run reproducible.
pub struct Minimizer<S: Status, U, E> {
    /// The [`Status`] of the last (or current) run, usually read after minimization.
    pub status: S,
    solver: Box<dyn Solver<S, U, E>>,
    observers: Vec<Arc<RwLock<dyn Observer<S, U>>>>,
    abort_signal: Box<dyn AbortSignal>,
    rng: Rng,
    max_steps: Option<usize>,
    parameter_names: Option<Vec<String>>,
}

impl<S: Status, U, E> Minimizer<S, U, E> {
    /// Creates a new [`Minimizer`] with the given (boxed) [`Solver`] and an unseeded [`Rng`].
    pub fn new(solver: Box<dyn Solver<S, U, E>>) -> Self {
        Self {
            status: S::default(),
            solver,
            observers: Vec::default(),
            abort_signal: NopAbortSignal.boxed(),
            rng: Rng::new(),
            max_steps: None,
            parameter_names: None,
        }
    }
    /// Seed the random number generator used for the run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }
    /// Use the given random number generator for the run.
    pub fn with_rng(mut self, rng: Rng) -> Self {
        self.rng = rng;
        self
    }
    /// Override the model's [`OptModel::max_iterations`].
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
    /// Set names used when displaying the [`Summary`].
    pub fn with_parameter_names<I: IntoIterator<Item = T>, T: Into<String>>(
        mut self,
        names: I,
    ) -> Self {
        self.parameter_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
    /// Set the [`AbortSignal`] checked after every generation.
    pub fn with_abort_signal(mut self, abort_signal: Box<dyn AbortSignal>) -> Self {
        self.abort_signal = abort_signal;
        self
    }
    /// Adds a single [`Observer`] to the [`Minimizer`].
    pub fn with_observer(mut self, observer: Arc<RwLock<dyn Observer<S, U>>>) -> Self {
        self.observers.push(observer);
        self
    }
    /// Minimize the given [`OptModel`].
    ///
    /// This method reads the model's configuration once, runs [`Solver::initialize`], and then
    /// runs [`Solver::step`] for at most `max_steps` generations. After each generation every
    /// [`Observer`] is called, and the loop ends early if [`Solver::check_for_termination`]
    /// reports convergence, an observer breaks, or the [`AbortSignal`] fires. Finally,
    /// [`Solver::postprocessing`] is run and a [`Summary`] of the run is returned.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model's configuration is invalid for the solver, or
    /// [`Error::Model`] if an evaluation fails. The [`Minimizer::status`] then holds the last
    /// fully completed generation.
    pub fn minimize(
        &mut self,
        model: &dyn OptModel<U, E>,
        user_data: &mut U,
    ) -> Result<Summary, Error<E>> {
        self.status.reset();
        self.abort_signal.reset();
        let mut config = Config::from_model(model)?;
        if let Some(max_steps) = self.max_steps {
            config.with_max_steps(max_steps);
        }
        if let Some(names) = &self.parameter_names {
            config.with_parameter_names::<E>(names)?;
        }
        self.solver.initialize(
            model,
            &config,
            &mut self.status,
            &mut self.rng,
            user_data,
        )?;
        let mut current_step = 0;
        let mut converged = false;
        let mut observer_termination = false;
        while current_step < config.max_steps {
            self.solver.step(
                current_step,
                model,
                &config,
                &mut self.status,
                &mut self.rng,
                user_data,
            )?;
            current_step += 1;
            for observer in &self.observers {
                if observer
                    .write()
                    .callback(current_step, &mut self.status, user_data)
                    .is_break()
                {
                    observer_termination = true;
                }
            }
            converged = self.solver.check_for_termination(&config, &mut self.status);
            if converged || observer_termination || self.abort_signal.is_aborted() {
                break;
            }
        }
        self.solver.postprocessing(&config, &mut self.status)?;
        if !converged {
            if self.abort_signal.is_aborted() {
                self.status.update_message("Abort signal received");
            } else if observer_termination {
                self.status.update_message("Observer requested termination");
            } else {
                self.status.update_message("MAX ITERS");
            }
        }
        Ok(self.solver.summarize(&config, &self.status))
    }
}
