use fastrand::Rng;
use nalgebra::DVector;
use tracing::trace;

use crate::{
    core::{Config, Error, Summary},
    traits::{OptModel, Solver, Status},
    utils::{random_bit, sigmoid_threshold, SampleFloat},
    Float,
};

use super::{
    default_swarm_size, hybrid_pairs, linear_decay, recombine_velocities,
    swarm_status::Candidate, SwarmStatus, C1, C2, HYBRID_PROBABILITY, W_LOWER, W_UPPER,
};

/// Binary Particle Swarm Optimizer
///
/// Locations live on $`\{0, 1\}^n`$ while velocities stay real-valued. Each generation, the
/// velocity follows the usual (unbounded) PSO update
/// ```math
/// v_i^{t+1} = w v_i^t + r_1 c_1 (p_i^t - x_i^t) + r_2 c_2 (g^t - x_i^t)
/// ```
/// and every bit of the new location is redrawn as `1` with probability $`\sigma(v_{ij})`$, the
/// logistic function of its velocity. Hybridized pairs recombine their velocities the same way
/// as [`HybridPSO`](super::HybridPSO), and both locations are then redrawn from the recombined
/// velocities. There is no mutation phase.
///
/// Bounds on the model are ignored. Velocities start at zero.
#[derive(Clone, Debug)]
pub struct BinaryPSO {
    swarm_size: Option<usize>,
    initial_state: Option<Vec<Float>>,
    c1: Float,
    c2: Float,
    inertia: (Float, Float),
    hybrid_probability: Float,
}

impl Default for BinaryPSO {
    fn default() -> Self {
        Self {
            swarm_size: None,
            initial_state: None,
            c1: C1,
            c2: C2,
            inertia: (W_UPPER, W_LOWER),
            hybrid_probability: HYBRID_PROBABILITY,
        }
    }
}

impl BinaryPSO {
    /// Sets the number of particles (default = $`\text{round}(10 + 2\sqrt{n})`$).
    pub const fn with_swarm_size(mut self, value: usize) -> Self {
        self.swarm_size = Some(value);
        self
    }
    /// Start every particle at the given bit vector instead of fair coin flips. Every entry must
    /// be `0.0` or `1.0`.
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

    fn binarize(v: &DVector<Float>, rng: &mut Rng) -> DVector<Float> {
        v.map(|vj| sigmoid_threshold(vj, rng.float()))
    }

    fn hybridize(&self, next: &mut [Candidate], rng: &mut Rng) {
        for (i, j) in hybrid_pairs(next.len(), self.hybrid_probability, rng) {
            let Some((v1, v2)) = recombine_velocities(&next[i].1, &next[j].1) else {
                trace!(first = i, second = j, "skipping pair with zero combined velocity");
                continue;
            };
            next[i] = (Self::binarize(&v1, rng), v1);
            next[j] = (Self::binarize(&v2, rng), v2);
        }
    }
}

impl<U, E> Solver<SwarmStatus, U, E> for BinaryPSO {
    fn initialize(
        &mut self,
        model: &dyn OptModel<U, E>,
        config: &Config,
        status: &mut SwarmStatus,
        rng: &mut Rng,
        user_data: &mut U,
    ) -> Result<(), Error<E>> {
        let n = config.dimension;
        if let Some(x0) = &self.initial_state {
            if x0.len() != n {
                return Err(Error::DimensionMismatch {
                    name: "initial state",
                    expected: n,
                    found: x0.len(),
                });
            }
            if let Some((index, &value)) = x0
                .iter()
                .enumerate()
                .find(|(_, &value)| value != 0.0 && value != 1.0)
            {
                return Err(Error::InvalidInitialState { index, value });
            }
        }
        let swarm_size = self.swarm_size.unwrap_or_else(|| default_swarm_size(n));
        let candidates = (0..swarm_size)
            .map(|_| {
                let x = self.initial_state.as_ref().map_or_else(
                    || DVector::from_fn(n, |_, _| random_bit(rng.float())),
                    |x0| DVector::from_column_slice(x0),
                );
                (x, DVector::zeros(n))
            })
            .collect();
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
        let mut next: Vec<Candidate> = Vec::with_capacity(status.swarm_size());
        for particle in &status.particles {
            let (r1, r2) = (rng.float(), rng.float());
            let v = particle.pulled_velocity(&status.gbest.x, inertia, self.c1, self.c2, r1, r2);
            next.push((Self::binarize(&v, rng), v));
        }
        self.hybridize(&mut next, rng);
        status.advance(next, model, user_data)?;
        status.log_generation("BinaryPSO");
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
        status.log_outcome("BinaryPSO");
        Ok(())
    }

    fn summarize(&self, config: &Config, status: &SwarmStatus) -> Summary {
        status.summarize(config)
    }
}
