//! `hypso` provides two particle swarm optimizers for constrained problems which are solved
//! without any gradient information: a real-valued hybrid PSO with crossover and Gaussian
//! mutation ([`HybridPSO`](`solvers::particles::HybridPSO`)) and a binary PSO operating on
//! `{0, 1}` vectors ([`BinaryPSO`](`solvers::particles::BinaryPSO`)).
//!
//! The user implements the [`OptModel`](`traits::OptModel`) trait on some struct which supplies
//! an objective $`f(\mathbb{R}^n) \to \mathbb{R}`$, an optional constraint violation
//! $`g(\mathbb{R}^n) \to \mathbb{R}`$ (positive values are infeasible), box bounds, and the
//! iteration budget. Constraints are handled with a penalty method: the fitness of an infeasible
//! location is its violation plus a large constant, so any feasible candidate beats every
//! infeasible one.
//!
//! # Table of Contents
//! - [Quick Start](#quick-start)
//! - [Reproducibility](#reproducibility)
//! - [Logging](#logging)
//!
//! # Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//! use hypso::prelude::*;
//! use hypso::solvers::particles::HybridPSO;
//!
//! struct Problem;
//! impl OptModel for Problem {
//!     fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
//!         Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2))
//!     }
//!     fn constraint_violation(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
//!         // x + y <= 2
//!         Ok((x[0] + x[1] - 2.0).max(0.0))
//!     }
//!     fn dimension(&self) -> usize {
//!         2
//!     }
//!     fn min_location(&self) -> Vec<Float> {
//!         vec![-5.0, -5.0]
//!     }
//!     fn max_location(&self) -> Vec<Float> {
//!         vec![5.0, 5.0]
//!     }
//!     fn max_iterations(&self) -> usize {
//!         300
//!     }
//! }
//!
//! fn main() -> Result<(), hypso::Error<Infallible>> {
//!     let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(30))).with_seed(0);
//!     let summary = m.minimize(&Problem, &mut ())?;
//!     assert!(summary.feasible);
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! # Reproducibility
//!
//! Every random draw of a solve (initial swarm, velocity coefficients, crossover and mutation
//! pools, Gaussian mutation, sigmoid thresholds) comes from the single [`fastrand::Rng`] owned by
//! the [`Minimizer`](`core::Minimizer`). Two solves started with the same seed on the same model
//! produce identical trajectories.
//!
//! # Logging
//!
//! Progress is reported through [`tracing`] events (`debug` for every generation, `info`/`warn`
//! at the end of a solve). Install any subscriber to see them.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the driver, bounds, points, configuration and result types
pub mod core;
/// Module containing [`Observer`](`traits::Observer`)s
pub mod observers;
/// Module containing the swarm solvers
pub mod solvers;
/// Module containing reference models for testing the solvers
pub mod test_functions;
/// Module containing the traits which connect models, solvers and observers
pub mod traits;
/// Module containing numeric helpers used by the swarm update rules
pub mod utils;

pub use crate::core::Error;
pub use nalgebra::DVector;

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled)
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled)
#[cfg(feature = "f32")]
pub type Float = f32;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::core::{Bound, Bounds, Minimizer, Point, Summary};
    pub use crate::traits::{OptModel, Solver, Status};
    pub use crate::Float;
}
