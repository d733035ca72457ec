use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    core::{Config, Error, Point, Summary},
    traits::{OptModel, Status},
    utils::arg_min,
    Float,
};

/// A particle with a position, velocity, and best known position
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmParticle {
    /// The current position of the particle and its fitness
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The personal best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point,
}
impl SwarmParticle {
    /// The PSO velocity update
    ///
    /// ```math
    /// v' = w v + r_1 c_1 (p - x) + r_2 c_2 (g - x)
    /// ```
    /// where $`p`$ is this particle's personal best and $`g`$ the global best location. The
    /// result is not bounded.
    pub fn pulled_velocity(
        &self,
        gbest: &DVector<Float>,
        inertia: Float,
        c1: Float,
        c2: Float,
        r1: Float,
        r2: Float,
    ) -> DVector<Float> {
        let x = &self.position.x;
        self.velocity.scale(inertia)
            + (&self.best.x - x).scale(r1 * c1)
            + (gbest - x).scale(r2 * c2)
    }
}

/// A strict improvement of a best fitness. A `NaN` best is replaced by any number.
fn improves(new: Float, old: Float) -> bool {
    new < old || (old.is_nan() && !new.is_nan())
}

/// A candidate location and velocity for one particle, built by a generation before it is
/// evaluated.
pub(crate) type Candidate = (DVector<Float>, DVector<Float>);

/// The state of a swarm between generations.
///
/// The swarm size is fixed by [`SwarmStatus::populate`]; every later generation replaces the
/// locations and velocities of all particles at once through [`SwarmStatus::advance`]. Personal
/// and global bests only ever move to strictly smaller fitness values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The particles of the swarm
    pub particles: Vec<SwarmParticle>,
    /// The global best position found by all particles
    pub gbest: Point,
    /// Whether any particle has ever satisfied all constraints
    pub feasible: bool,
    /// An indicator of whether the fitness tolerance was reached
    pub converged: bool,
    /// A message containing information about the condition of the swarm or convergence
    pub message: String,
    /// The number of completed generations (not counting initialization)
    pub generation: usize,
    /// The number of objective evaluations
    pub n_objective_evals: usize,
    /// The number of constraint evaluations
    pub n_constraint_evals: usize,
}

impl SwarmStatus {
    /// The number of particles in the swarm.
    pub fn swarm_size(&self) -> usize {
        self.particles.len()
    }
    /// The current fitness of every particle.
    pub fn fitness(&self) -> Vec<Float> {
        self.particles.iter().map(|p| p.position.fx).collect()
    }
    /// The personal best fitness of every particle.
    pub fn personal_best_fitness(&self) -> Vec<Float> {
        self.particles.iter().map(|p| p.best.fx).collect()
    }
    /// The current location of every particle.
    pub fn positions(&self) -> Vec<DVector<Float>> {
        self.particles.iter().map(|p| p.position.x.clone()).collect()
    }
    /// Returns `true` once a feasible location has been seen and the global best fitness is at
    /// or below `tol_fitness`.
    pub fn tolerance_reached(&self, tol_fitness: Float) -> bool {
        self.feasible && self.gbest.fx - tol_fitness <= 0.0
    }
    pub(crate) fn check_tolerance(&mut self, tol_fitness: Float) -> bool {
        if self.tolerance_reached(tol_fitness) {
            self.converged = true;
            self.update_message("TOL FITNESS");
            return true;
        }
        false
    }
    pub(crate) fn log_generation(&self, solver: &'static str) {
        debug!(
            solver,
            generation = self.generation,
            gbest = self.gbest.fx,
            feasible = self.feasible,
            "generation complete"
        );
    }
    pub(crate) fn log_outcome(&self, solver: &'static str) {
        if self.feasible {
            info!(
                solver,
                generation = self.generation,
                gbest = self.gbest.fx,
                "solution found"
            );
        } else {
            warn!(solver, generation = self.generation, "solution not found");
        }
    }

    fn evaluate_all<U, E>(
        &mut self,
        candidates: Vec<Candidate>,
        model: &dyn OptModel<U, E>,
        user_data: &mut U,
    ) -> Result<Vec<(Point, DVector<Float>)>, Error<E>> {
        let mut evaluated = Vec::with_capacity(candidates.len());
        let (mut n_objective, mut n_constraint) = (0, 0);
        for (x, v) in candidates {
            let mut point = Point::from(x);
            point.evaluate(model, user_data).map_err(Error::Model)?;
            n_constraint += 1;
            if point.feasible {
                n_objective += 1;
            }
            evaluated.push((point, v));
        }
        self.n_objective_evals += n_objective;
        self.n_constraint_evals += n_constraint;
        Ok(evaluated)
    }

    /// Evaluate the initial swarm and seed the personal and global bests.
    ///
    /// The global best is the first particle with the minimum fitness, ignoring `NaN` fitness
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySwarm`] if `candidates` is empty and [`Error::Model`] if an
    /// evaluation fails, in which case the status is left empty.
    pub(crate) fn populate<U, E>(
        &mut self,
        candidates: Vec<Candidate>,
        model: &dyn OptModel<U, E>,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        if candidates.is_empty() {
            return Err(Error::EmptySwarm);
        }
        let evaluated = self.evaluate_all(candidates, model, user_data)?;
        self.particles = evaluated
            .into_iter()
            .map(|(position, velocity)| SwarmParticle {
                best: position.clone(),
                position,
                velocity,
            })
            .collect();
        self.feasible = self.particles.iter().any(|p| p.position.feasible);
        if let Some(i_best) = arg_min(&self.fitness()) {
            self.gbest = self.particles[i_best].position.clone();
        }
        self.generation = 0;
        Ok(())
    }

    /// Evaluate a full generation of candidates and commit it.
    ///
    /// Nothing is committed unless every evaluation succeeds. Personal bests move when a
    /// particle's new fitness is strictly smaller, and the global best moves when the smallest
    /// fitness of the generation (first occurrence) is strictly smaller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if an evaluation fails.
    pub(crate) fn advance<U, E>(
        &mut self,
        candidates: Vec<Candidate>,
        model: &dyn OptModel<U, E>,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        debug_assert_eq!(candidates.len(), self.particles.len());
        let evaluated = self.evaluate_all(candidates, model, user_data)?;
        for (particle, (position, velocity)) in self.particles.iter_mut().zip(evaluated) {
            if improves(position.fx, particle.best.fx) {
                particle.best = position.clone();
            }
            self.feasible |= position.feasible;
            particle.position = position;
            particle.velocity = velocity;
        }
        if let Some(i_best) = arg_min(&self.fitness()) {
            if improves(self.particles[i_best].position.fx, self.gbest.fx) {
                self.gbest = self.particles[i_best].position.clone();
            }
        }
        self.generation += 1;
        Ok(())
    }

    /// Build the [`Summary`] of the run so far.
    pub fn summarize(&self, config: &Config) -> Summary {
        Summary {
            bounds: config.location_bounds.clone(),
            parameter_names: config.parameter_names.clone(),
            message: self.message.clone(),
            x: self.gbest.x.iter().copied().collect(),
            fx: self.gbest.fx,
            feasible: self.feasible,
            converged: self.converged,
            generations: self.generation,
            objective_evals: self.n_objective_evals,
            constraint_evals: self.n_constraint_evals,
        }
    }
}

impl Status for SwarmStatus {
    fn reset(&mut self) {
        *self = Self::default();
    }
    fn converged(&self) -> bool {
        self.converged
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    struct Line;
    impl OptModel for Line {
        fn objective(&self, x: &[Float], _: &mut ()) -> Result<Float, Infallible> {
            Ok(x[0])
        }
        fn constraint_violation(&self, x: &[Float], _: &mut ()) -> Result<Float, Infallible> {
            Ok(-x[0])
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    struct Flaky;
    impl OptModel<(), String> for Flaky {
        fn objective(&self, x: &[Float], _: &mut ()) -> Result<Float, String> {
            if x[0] > 5.0 {
                Err("out of domain".to_string())
            } else {
                Ok(x[0])
            }
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    /// The identity on `[0, 4]`, undefined elsewhere.
    struct Partial;
    impl OptModel for Partial {
        fn objective(&self, x: &[Float], _: &mut ()) -> Result<Float, Infallible> {
            Ok(if x[0] > 4.0 { Float::NAN } else { x[0] })
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    fn candidates(xs: &[Float]) -> Vec<Candidate> {
        xs.iter()
            .map(|&x| (DVector::from_vec(vec![x]), DVector::zeros(1)))
            .collect()
    }

    #[test]
    fn test_populate_picks_first_minimum() {
        let mut status = SwarmStatus::default();
        status
            .populate(candidates(&[3.0, 1.0, 2.0, 1.0]), &Line, &mut ())
            .unwrap();
        assert_eq!(status.swarm_size(), 4);
        assert_eq!(status.gbest.fx, 1.0);
        assert!(status.feasible);
        assert_eq!(status.fitness(), status.personal_best_fitness());
        assert_eq!(status.n_constraint_evals, 4);
        assert_eq!(status.n_objective_evals, 4);
    }

    #[test]
    fn test_populate_empty_swarm() {
        let mut status = SwarmStatus::default();
        assert!(matches!(
            status.populate(vec![], &Line, &mut ()),
            Err(Error::EmptySwarm)
        ));
    }

    #[test]
    fn test_infeasible_swarm() {
        let mut status = SwarmStatus::default();
        status
            .populate(candidates(&[-1.0, -3.0]), &Line, &mut ())
            .unwrap();
        assert!(!status.feasible);
        assert_eq!(status.n_objective_evals, 0);
        assert!(!status.tolerance_reached(Float::INFINITY));
    }

    #[test]
    fn test_advance_keeps_bests() {
        let mut status = SwarmStatus::default();
        status
            .populate(candidates(&[3.0, 1.0]), &Line, &mut ())
            .unwrap();
        status
            .advance(candidates(&[2.0, 4.0]), &Line, &mut ())
            .unwrap();
        assert_eq!(status.fitness(), vec![2.0, 4.0]);
        assert_eq!(status.personal_best_fitness(), vec![2.0, 1.0]);
        assert_eq!(status.gbest.fx, 1.0);
        assert_eq!(status.generation, 1);
        status
            .advance(candidates(&[0.5, 0.5]), &Line, &mut ())
            .unwrap();
        assert_eq!(status.gbest.fx, 0.5);
        assert!(status.tolerance_reached(0.5));
        assert!(!status.tolerance_reached(0.4));
    }

    #[test]
    fn test_failed_generation_is_not_committed() {
        let mut status = SwarmStatus::default();
        status
            .populate(candidates(&[3.0, 1.0]), &Flaky, &mut ())
            .unwrap();
        let before = status.clone();
        let result = status.advance(candidates(&[0.0, 6.0]), &Flaky, &mut ());
        assert!(matches!(result, Err(Error::Model(ref msg)) if msg == "out of domain"));
        assert_eq!(status.fitness(), before.fitness());
        assert_eq!(status.gbest.fx, before.gbest.fx);
        assert_eq!(status.generation, 0);
        assert_eq!(status.n_constraint_evals, before.n_constraint_evals);
    }

    #[test]
    fn test_nan_fitness_never_seeds_gbest() {
        let mut status = SwarmStatus::default();
        status
            .populate(candidates(&[5.0, 3.0, 2.0]), &Partial, &mut ())
            .unwrap();
        assert_eq!(status.gbest.fx, 2.0);
    }

    #[test]
    fn test_nan_bests_are_replaced() {
        let mut status = SwarmStatus::default();
        status
            .populate(candidates(&[5.0, 6.0]), &Partial, &mut ())
            .unwrap();
        assert!(status.gbest.fx.is_nan());
        status
            .advance(candidates(&[1.0, 7.0]), &Partial, &mut ())
            .unwrap();
        assert_eq!(status.gbest.fx, 1.0);
        assert_eq!(status.particles[0].best.fx, 1.0);
        assert!(status.particles[1].best.fx.is_nan());
        status
            .advance(candidates(&[2.0, 3.0]), &Partial, &mut ())
            .unwrap();
        assert_eq!(status.gbest.fx, 1.0);
        assert_eq!(status.personal_best_fitness(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_pulled_velocity() {
        let particle = SwarmParticle {
            position: vec![1.0, 1.0].into(),
            velocity: DVector::from_vec(vec![1.0, -1.0]),
            best: vec![2.0, 1.0].into(),
        };
        let gbest = DVector::from_vec(vec![1.0, 3.0]);
        let v = particle.pulled_velocity(&gbest, 0.5, 1.0, 2.0, 1.0, 0.5);
        assert_eq!(v.as_slice(), &[0.5 + 1.0, -0.5 + 2.0]);
    }
}
