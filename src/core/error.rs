use thiserror::Error;

use crate::Float;

/// Errors which can end a solve early.
///
/// The generic `E` is the error type of the user's [`OptModel`](`crate::traits::OptModel`); it is
/// passed through unchanged in [`Error::Model`].
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The model declared no free parameters.
    #[error("the model must have at least one dimension")]
    ZeroDimension,
    /// A per-dimension array does not have the model's dimension.
    #[error("{name} has length {found}, but the model has {expected} dimensions")]
    DimensionMismatch {
        /// What was being checked
        name: &'static str,
        /// The model's dimension
        expected: usize,
        /// The length actually supplied
        found: usize,
    },
    /// A lower limit is larger than its upper limit.
    #[error("bound #{index} is empty: lower limit {lower} > upper limit {upper}")]
    InvalidBound {
        /// The offending dimension
        index: usize,
        /// The lower limit
        lower: Float,
        /// The upper limit
        upper: Float,
    },
    /// The solver needs bounds which the model does not provide.
    #[error("the model does not provide {0} bounds")]
    MissingBounds(&'static str),
    /// A warm-start value for a binary solver is neither `0` nor `1`.
    #[error("initial state #{index} = {value} is not a binary value")]
    InvalidInitialState {
        /// The offending dimension
        index: usize,
        /// The supplied value
        value: Float,
    },
    /// A swarm needs at least one particle.
    #[error("the swarm must contain at least one particle")]
    EmptySwarm,
    /// The model's objective or constraint evaluation failed.
    #[error("model evaluation failed: {0}")]
    Model(E),
}
