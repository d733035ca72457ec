use fastrand::Rng;
use nalgebra::DVector;
use tracing::trace;

use crate::{
    core::{Bounds, Config, Error, Summary},
    traits::{OptModel, Solver, Status},
    utils::{generate_random_vector_in_limits, SampleFloat},
    Float,
};

use super::{
    default_swarm_size, hybrid_pairs, linear_decay, recombine_velocities, sample_pool,
    swarm_status::Candidate, SwarmStatus, C1, C2, HYBRID_PROBABILITY, MUTATION_LOWER,
    MUTATION_SCALE, MUTATION_UPPER, W_LOWER, W_UPPER,
};

/// Hybrid Particle Swarm Optimizer with Gaussian mutation
///
/// Every generation runs three phases on a swarm of real-valued particles before the swarm is
/// evaluated:
///
/// 1. The PSO update. With an inertia weight $`w`$ decaying linearly over the run,
///    ```math
///    v_i^{t+1} = w v_i^t + r_1 c_1 (p_i^t - x_i^t) + r_2 c_2 (g^t - x_i^t)
///    ```
///    where $`r_1, r_2 \sim U[0, 1)`$ are drawn once per particle. The new velocity is clamped to
///    the velocity bounds, and a coordinate of the new location $`x + v`$ which leaves the
///    location bounds is placed halfway between the crossed boundary and its previous value.
/// 2. Hybridization. A random, even-sized subset of the swarm is split into pairs. Each pair
///    shares the direction of $`v_1 + v_2`$, scaled by the ratio of each velocity's norm to the
///    norm of the sum, and moves to the convex blends $`p x_1 + (1-p) x_2`$ and
///    $`p x_2 + (1-p) x_1`$ for a single $`p \sim U[0, 1)`$.
/// 3. Gaussian mutation. A random subset, whose size decays linearly over the run, is shifted by
///    one vector $`\delta_j \sim N(0, (0.1 (u_j - l_j))^2)`$ shared by the whole subset. Mutated
///    locations are not clamped.
///
/// Constraints are handled with the penalty method described in [`Point`](crate::core::Point).
///
/// This solver requires location bounds. If the model gives no velocity bounds, $`\pm(u_j - l_j)`$
/// is used.
#[derive(Clone, Debug)]
pub struct HybridPSO {
    swarm_size: Option<usize>,
    initial_state: Option<Vec<Float>>,
    c1: Float,
    c2: Float,
    inertia: (Float, Float),
    hybrid_probability: Float,
    mutation_rate: (Float, Float),
    location_bounds: Bounds,
    velocity_bounds: Bounds,
}

impl Default for HybridPSO {
    fn default() -> Self {
        Self {
            swarm_size: None,
            initial_state: None,
            c1: C1,
            c2: C2,
            inertia: (W_UPPER, W_LOWER),
            hybrid_probability: HYBRID_PROBABILITY,
            mutation_rate: (MUTATION_UPPER, MUTATION_LOWER),
            location_bounds: Bounds::default(),
            velocity_bounds: Bounds::default(),
        }
    }
}

impl HybridPSO {
    /// Sets the number of particles (default = $`\text{round}(10 + 2\sqrt{n})`$).
    pub const fn with_swarm_size(mut self, value: usize) -> Self {
        self.swarm_size = Some(value);
        self
    }
    /// Start every particle at the given location instead of a uniform draw inside the bounds.
    pub fn with_initial_state(mut self, value: &[Float]) -> Self {
        self.initial_state = Some(value.to_vec());
        self
    }
    /// Sets the cognitive weight $`c_1`$ (default = `1.4961`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_1 < 0`$.
    pub fn with_c1(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.c1 = value;
        self
    }
    /// Sets the social weight $`c_2`$ (default = `1.4961`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_2 < 0`$.
    pub fn with_c2(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.c2 = value;
        self
    }
    /// Sets the inertia weight at the first generation and the value it decays towards
    /// (default = `(0.9, 0.1)`).
    ///
    /// # Panics
    ///
    /// This method will panic if either value is negative.
    pub fn with_inertia(mut self, upper: Float, lower: Float) -> Self {
        assert!(upper >= 0.0 && lower >= 0.0);
        self.inertia = (upper, lower);
        self
    }
    /// Sets the fraction of the swarm which is hybridized each generation (default = `0.5`).
    ///
    /// # Panics
    ///
    /// This method will panic if the value is not in $`[0, 1]`$.
    pub fn with_hybrid_probability(mut self, value: Float) -> Self {
        assert!((0.0..=1.0).contains(&value));
        self.hybrid_probability = value;
        self
    }
    /// Sets the mutation rate at the first generation and the value it decays towards
    /// (default = `(0.3, 0.1)`). Use `(0.0, 0.0)` to turn mutation off.
    ///
    /// # Panics
    ///
    /// This method will panic if either value is not in $`[0, 1]`$.
    pub fn with_mutation_rate(mut self, upper: Float, lower: Float) -> Self {
        assert!((0.0..=1.0).contains(&upper) && (0.0..=1.0).contains(&lower));
        self.mutation_rate = (upper, lower);
        self
    }

    fn clip_velocity(&self, v: &DVector<Float>) -> DVector<Float> {
        DVector::from_vec(self.velocity_bounds.clip_vec(v.as_slice()))
    }

    fn move_particles(
        &self,
        status: &SwarmStatus,
        inertia: Float,
        rng: &mut Rng,
    ) -> Vec<Candidate> {
        let mut next = Vec::with_capacity(status.swarm_size());
        for particle in &status.particles {
            let (r1, r2) = (rng.float(), rng.float());
            let v = self.clip_velocity(&particle.pulled_velocity(
                &status.gbest.x,
                inertia,
                self.c1,
                self.c2,
                r1,
                r2,
            ));
            let previous = &particle.position.x;
            let x = DVector::from_iterator(
                previous.len(),
                previous
                    .iter()
                    .zip(v.iter())
                    .zip(self.location_bounds.iter())
                    .map(|((&xj, &vj), bound)| bound.clip_to_midpoint(xj + vj, xj)),
            );
            next.push((x, v));
        }
        next
    }

    fn hybridize(&self, next: &mut [Candidate], rng: &mut Rng) {
        for (i, j) in hybrid_pairs(next.len(), self.hybrid_probability, rng) {
            let Some((v1, v2)) = recombine_velocities(&next[i].1, &next[j].1) else {
                trace!(first = i, second = j, "skipping pair with zero combined velocity");
                continue;
            };
            let pb = rng.float();
            let x1 = next[i].0.scale(pb) + next[j].0.scale(1.0 - pb);
            let x2 = next[j].0.scale(pb) + next[i].0.scale(1.0 - pb);
            next[i] = (x1, self.clip_velocity(&v1));
            next[j] = (x2, self.clip_velocity(&v2));
        }
    }

    fn mutate(&self, next: &mut [Candidate], rate: Float, rng: &mut Rng) {
        let pool_size = (next.len() as Float * rate).round() as usize;
        if pool_size == 0 {
            return;
        }
        let pool = sample_pool(next.len(), pool_size, rng);
        let delta = DVector::from_iterator(
            self.location_bounds.len(),
            self.location_bounds
                .iter()
                .map(|bound| rng.normal(0.0, 1.0) * MUTATION_SCALE * bound.width()),
        );
        for i in pool {
            next[i].0 += &delta;
        }
    }
}

impl<U, E> Solver<SwarmStatus, U, E> for HybridPSO {
    fn initialize(
        &mut self,
        model: &dyn OptModel<U, E>,
        config: &Config,
        status: &mut SwarmStatus,
        rng: &mut Rng,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        let location_bounds = config
            .location_bounds
            .clone()
            .ok_or(Error::MissingBounds("location"))?;
        let velocity_bounds = config
            .velocity_bounds
            .clone()
            .unwrap_or_else(|| location_bounds.spans());
        if let Some(x0) = &self.initial_state {
            if x0.len() != config.dimension {
                return Err(Error::DimensionMismatch {
                    name: "initial state",
                    expected: config.dimension,
                    found: x0.len(),
                });
            }
        }
        let swarm_size = self
            .swarm_size
            .unwrap_or_else(|| default_swarm_size(config.dimension));
        let candidates = (0..swarm_size)
            .map(|_| {
                let x = self.initial_state.as_ref().map_or_else(
                    || generate_random_vector_in_limits(&location_bounds, rng),
                    |x0| DVector::from_column_slice(x0),
                );
                let v = generate_random_vector_in_limits(&velocity_bounds, rng);
                (x, v)
            })
            .collect();
        self.location_bounds = location_bounds;
        self.velocity_bounds = velocity_bounds;
        status.populate(candidates, model, user_data)?;
        status.update_message("Initialized");
        Ok(())
    }

    fn step(
        &mut self,
        i_step: usize,
        model: &dyn OptModel<U, E>,
        config: &Config,
        status: &mut SwarmStatus,
        rng: &mut Rng,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        let inertia = linear_decay(self.inertia.0, self.inertia.1, i_step, config.max_steps);
        let rate = linear_decay(
            self.mutation_rate.0,
            self.mutation_rate.1,
            i_step,
            config.max_steps,
        );
        let mut next = self.move_particles(status, inertia, rng);
        self.hybridize(&mut next, rng);
        self.mutate(&mut next, rate, rng);
        status.advance(next, model, user_data)?;
        status.log_generation("HybridPSO");
        Ok(())
    }

    fn check_for_termination(&mut self, config: &Config, status: &mut SwarmStatus) -> bool {
        status.check_tolerance(config.tol_fitness)
    }

    fn postprocessing(
        &mut self,
        _config: &Config,
        status: &mut SwarmStatus,
    ) -> Result<(), Error<E>> {
        status.log_outcome("HybridPSO");
        Ok(())
    }

    fn summarize(&self, config: &Config, status: &SwarmStatus) -> Summary {
        status.summarize(config)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::Minimizer;

    struct Bowl;
    impl OptModel for Bowl {
        fn objective(&self, x: &[Float], _: &mut ()) -> Result<Float, Infallible> {
            Ok(x.iter().map(|xi| xi * xi).sum())
        }
        fn dimension(&self) -> usize {
            3
        }
        fn min_location(&self) -> Vec<Float> {
            vec![-2.0; 3]
        }
        fn max_location(&self) -> Vec<Float> {
            vec![2.0; 3]
        }
        fn max_iterations(&self) -> usize {
            150
        }
    }

    struct Unbounded;
    impl OptModel for Unbounded {
        fn objective(&self, x: &[Float], _: &mut ()) -> Result<Float, Infallible> {
            Ok(x[0])
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_hybrid_pso_bowl() {
        let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(20))).with_seed(0);
        let summary = m.minimize(&Bowl, &mut ()).unwrap();
        assert!(summary.feasible);
        assert!(!summary.converged);
        assert_eq!(summary.message, "MAX ITERS");
        assert_eq!(summary.generations, 150);
        assert_eq!(summary.constraint_evals, 20 * 151);
        assert_abs_diff_eq!(summary.fx, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_default_swarm_size_is_used() {
        let mut m = Minimizer::new(Box::new(HybridPSO::default()))
            .with_seed(1)
            .with_max_steps(3);
        m.minimize(&Bowl, &mut ()).unwrap();
        assert_eq!(m.status.swarm_size(), default_swarm_size(3));
    }

    #[test]
    fn test_missing_location_bounds() {
        let mut m = Minimizer::new(Box::new(HybridPSO::default())).with_seed(0);
        assert!(matches!(
            m.minimize(&Unbounded, &mut ()),
            Err(Error::MissingBounds("location"))
        ));
    }

    #[test]
    fn test_initial_state_dimension() {
        let mut m =
            Minimizer::new(Box::new(HybridPSO::default().with_initial_state(&[0.0, 0.0])))
                .with_seed(0);
        assert!(matches!(
            m.minimize(&Bowl, &mut ()),
            Err(Error::DimensionMismatch {
                name: "initial state",
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_warm_start_places_every_particle() {
        let mut m = Minimizer::new(Box::new(
            HybridPSO::default()
                .with_swarm_size(8)
                .with_initial_state(&[1.0, -1.0, 0.5]),
        ))
        .with_seed(3)
        .with_max_steps(0);
        let summary = m.minimize(&Bowl, &mut ()).unwrap();
        for position in m.status.positions() {
            assert_eq!(position.as_slice(), &[1.0, -1.0, 0.5]);
        }
        assert_abs_diff_eq!(summary.fx, 2.25);
        assert_eq!(summary.generations, 0);
    }

    #[test]
    fn test_velocities_respect_derived_bounds() {
        let mut m = Minimizer::new(Box::new(
            HybridPSO::default()
                .with_swarm_size(10)
                .with_mutation_rate(0.0, 0.0),
        ))
        .with_seed(5)
        .with_max_steps(20);
        m.minimize(&Bowl, &mut ()).unwrap();
        for particle in &m.status.particles {
            assert!(particle.velocity.iter().all(|v| v.abs() <= 4.0));
            assert!(particle.position.x.iter().all(|x| x.abs() <= 2.0 + 1e-12));
        }
    }

    fn boxed_solver() -> HybridPSO {
        HybridPSO {
            location_bounds: Bounds::from_limits(&[0.0, 0.0], &[1.0, 100.0]),
            velocity_bounds: Bounds::from_limits(&[-0.3, -16.0], &[0.3, 16.0]),
            ..Default::default()
        }
    }

    fn at_rest(n: usize, x: &[Float]) -> Vec<Candidate> {
        (0..n)
            .map(|_| (DVector::from_column_slice(x), DVector::zeros(x.len())))
            .collect()
    }

    #[test]
    fn test_mutation_shares_one_delta() {
        let solver = boxed_solver();
        let start = DVector::from_vec(vec![0.5, 50.0]);
        let mut next = at_rest(10, start.as_slice());
        let mut rng = Rng::with_seed(3);
        solver.mutate(&mut next, 0.3, &mut rng);
        let moved: Vec<&DVector<Float>> = next
            .iter()
            .map(|(x, _)| x)
            .filter(|&x| x != &start)
            .collect();
        assert_eq!(moved.len(), 3);
        assert!(moved.iter().all(|&x| x == moved[0]));
        assert!(next.iter().all(|(_, v)| v == &DVector::zeros(2)));
    }

    #[test]
    fn test_mutation_rate_zero_is_a_no_op() {
        let solver = boxed_solver();
        let mut next = at_rest(10, &[0.5, 50.0]);
        let before = next.clone();
        solver.mutate(&mut next, 0.04, &mut Rng::with_seed(0));
        assert_eq!(next, before);
    }

    #[test]
    fn test_mutation_is_not_clamped() {
        let solver = boxed_solver();
        let left_the_box = (0..20).any(|seed| {
            let mut next = at_rest(10, &[1.0, 100.0]);
            solver.mutate(&mut next, 0.3, &mut Rng::with_seed(seed));
            next.iter()
                .any(|(x, _)| !solver.location_bounds.contains_vec(x.as_slice()))
        });
        assert!(left_the_box);
    }

    #[test]
    fn test_hybridize_blends_one_pair() {
        let solver = boxed_solver().with_hybrid_probability(1.0);
        let (x1, x2) = (vec![0.0, 0.0], vec![1.0, 100.0]);
        let mut next = vec![
            (DVector::from_vec(x1.clone()), DVector::from_vec(vec![0.25, 15.0])),
            (DVector::from_vec(x2.clone()), DVector::from_vec(vec![0.2, 18.0])),
        ];
        solver.hybridize(&mut next, &mut Rng::with_seed(7));
        let (y1, y2) = (&next[0].0, &next[1].0);
        for k in 0..2 {
            assert_abs_diff_eq!(y1[k] + y2[k], x1[k] + x2[k], epsilon = 1e-9);
        }
        // a single blend coefficient moves both coordinates the same fraction of the way
        let fractions: Vec<Float> = (0..2).map(|k| (y1[k] - x1[k]) / (x2[k] - x1[k])).collect();
        assert_abs_diff_eq!(fractions[0], fractions[1], epsilon = 1e-9);
        assert!((0.0..=1.0).contains(&fractions[0]));
        for (_, v) in &next {
            assert!(solver.velocity_bounds.contains_vec(v.as_slice()));
        }
        assert_eq!(next[1].1[1], 16.0);
    }

    #[test]
    fn test_hybridize_whole_swarm() {
        let solver = boxed_solver().with_hybrid_probability(1.0);
        let mut rng = Rng::with_seed(11);
        let mut next: Vec<Candidate> = (0..10)
            .map(|_| {
                (
                    generate_random_vector_in_limits(&solver.location_bounds, &mut rng),
                    generate_random_vector_in_limits(&solver.velocity_bounds, &mut rng),
                )
            })
            .collect();
        let total = |swarm: &[Candidate]| {
            swarm
                .iter()
                .fold(DVector::zeros(2), |acc: DVector<Float>, (x, _)| acc + x)
        };
        let total_before = total(&next);
        solver.hybridize(&mut next, &mut rng);
        let total_after = total(&next);
        for k in 0..2 {
            assert_abs_diff_eq!(total_after[k], total_before[k], epsilon = 1e-9);
        }
        for (x, v) in &next {
            assert!(solver.location_bounds.contains_vec(x.as_slice()));
            assert!(solver.velocity_bounds.contains_vec(v.as_slice()));
        }
    }

    #[test]
    fn test_hybridize_skips_opposite_velocities() {
        let solver = boxed_solver().with_hybrid_probability(1.0);
        let mut next = vec![
            (DVector::from_vec(vec![0.1, 10.0]), DVector::from_vec(vec![0.2, -3.0])),
            (DVector::from_vec(vec![0.9, 90.0]), DVector::from_vec(vec![-0.2, 3.0])),
        ];
        let before = next.clone();
        solver.hybridize(&mut next, &mut Rng::with_seed(0));
        assert_eq!(next, before);
    }
}
