/// Module containing [`AbortSignal`](`crate::traits::AbortSignal`) implementations
pub mod abort_signals;
/// Module containing the [`Bound`] and [`Bounds`] types
pub mod bound;
/// Module containing the per-solve [`Config`]
pub mod config;
/// Module containing the crate [`Error`] type
pub mod error;
/// Module containing the [`Minimizer`] driver
pub mod minimizer;
/// Module containing the [`Point`] type and the penalty method
pub mod point;
/// Module containing the [`Summary`] of a run
pub mod summary;

pub use abort_signals::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use bound::{Bound, Bounds};
pub use config::Config;
pub use error::Error;
pub use minimizer::Minimizer;
pub use point::{Point, PUNISHMENT};
pub use summary::Summary;
