use std::ops::ControlFlow;

use super::Status;

/// A trait which holds a [`callback`](`Observer::callback`) function that can be used to inspect
/// (or modify) a [`Solver`](`crate::traits::Solver`)'s [`Status`] during a minimization.
///
/// Observers are shared with the [`Minimizer`](`crate::core::Minimizer`) as
/// `Arc<parking_lot::RwLock<_>>` so they can be read back after the run.
pub trait Observer<S: Status, U> {
    /// A function that is called after every generation. Returning [`ControlFlow::Break`] stops
    /// the minimization after the current generation.
    fn callback(&mut self, step: usize, status: &mut S, user_data: &mut U) -> ControlFlow<()>;
}
