use serde::{de::DeserializeOwned, Serialize};

/// A trait which holds the state of a [`Solver`](`crate::traits::Solver`) between generations.
pub trait Status: Clone + Default + Serialize + DeserializeOwned {
    /// Resets the status to its default state. This is called at the beginning of every
    /// [`Minimizer::minimize`](`crate::core::Minimizer::minimize`) run.
    fn reset(&mut self);
    /// Returns the convergence flag of the minimization.
    fn converged(&self) -> bool;
    /// Returns the message of the minimization.
    fn message(&self) -> &str;
    /// Sets the message of the minimization.
    fn update_message(&mut self, message: &str);
}
