/// Module containing the shifted sphere test function.
pub mod sphere;
pub use sphere::ShiftedSphere;

/// Module containing the Beale-type test function.
pub mod beale;
pub use beale::Beale;

/// Module containing a quadratic program with linear inequality constraints.
pub mod constrained_quadratic;
pub use constrained_quadratic::ConstrainedQuadratic;

/// Module containing the G01 benchmark problem.
pub mod g01;
pub use g01::G01;

/// Module containing the G11 benchmark problem.
pub mod g11;
pub use g11::G11;

/// Module containing the G13 benchmark problem.
pub mod g13;
pub use g13::G13;
