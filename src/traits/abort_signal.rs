/// A trait for abort signals.
///
/// A [`Minimizer`](`crate::core::Minimizer`) checks its signal after every generation, at the same
/// point as the termination test, and stops early if the signal has fired.
pub trait AbortSignal {
    /// Return `true` if the user has requested to abort the calculation.
    fn is_aborted(&self) -> bool;
    /// Abort the calculation. Make `is_aborted()` return `true`.
    fn abort(&self);
    /// Reset the abort signal. Make `is_aborted()` return `false`.
    fn reset(&self);
    /// Return a boxed version of the signal.
    fn boxed(self) -> Box<Self>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}
