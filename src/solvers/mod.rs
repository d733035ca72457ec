/// Particle swarm solvers over real-valued and binary search spaces
pub mod particles;
