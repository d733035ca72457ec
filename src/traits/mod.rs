/// Module containing the [`AbortSignal`] trait
pub mod abort_signal;
/// Module containing the [`OptModel`] trait
pub mod model;
/// Module containing the [`Observer`] trait
pub mod observer;
/// Module containing the [`Solver`] trait
pub mod solver;
/// Module containing the [`Status`] trait
pub mod status;

pub use abort_signal::AbortSignal;
pub use model::OptModel;
pub use observer::Observer;
pub use solver::Solver;
pub use status::Status;
