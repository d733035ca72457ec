use fastrand::Rng;
use nalgebra::DVector;

use crate::{utils::norm, Float};

/// Implementation of the binary particle swarm optimizer
pub mod binary_pso;
pub use binary_pso::BinaryPSO;

/// Implementation of the hybrid particle swarm optimizer with Gaussian mutation
pub mod hybrid_pso;
pub use hybrid_pso::HybridPSO;

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::{SwarmParticle, SwarmStatus};

/// The default cognitive weight $`c_1`$.
pub const C1: Float = 1.4961;
/// The default social weight $`c_2`$.
pub const C2: Float = 1.4961;
/// The inertia weight at the first generation.
pub const W_UPPER: Float = 0.9;
/// The inertia weight approached at the last generation.
pub const W_LOWER: Float = 0.1;
/// The default fraction of the swarm which takes part in hybridization.
pub const HYBRID_PROBABILITY: Float = 0.5;
/// The mutation rate at the first generation.
pub const MUTATION_UPPER: Float = 0.3;
/// The mutation rate approached at the last generation.
pub const MUTATION_LOWER: Float = 0.1;
/// The standard deviation of a mutation as a fraction of the width of the location bounds.
pub const MUTATION_SCALE: Float = 0.1;

/// The swarm size used when none is given, $`\text{round}(10 + 2\sqrt{n})`$.
pub fn default_swarm_size(dimension: usize) -> usize {
    (2.0 * (dimension as Float).sqrt() + 10.0).round() as usize
}

/// Linear decay from `upper` at step `0` towards `lower` at step `max_steps`.
pub fn linear_decay(upper: Float, lower: Float, step: usize, max_steps: usize) -> Float {
    if max_steps == 0 {
        return upper;
    }
    upper - (step as Float / max_steps as Float) * (upper - lower)
}

/// Draws `pool_size` distinct particle indices (at most `swarm_size`) in random order.
pub fn sample_pool(swarm_size: usize, pool_size: usize, rng: &mut Rng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..swarm_size).collect();
    rng.shuffle(&mut indices);
    indices.truncate(pool_size);
    indices
}

/// Draws the disjoint pairs of particles which are hybridized in one generation.
///
/// The pool holds $`\text{round}(S p)`$ particles, bumped up to the next even number and capped
/// at the largest even number not above $`S`$. Consecutive entries of the shuffled pool form the
/// pairs, so no particle appears twice.
pub fn hybrid_pairs(swarm_size: usize, probability: Float, rng: &mut Rng) -> Vec<(usize, usize)> {
    let mut pool_size = (swarm_size as Float * probability).round() as usize;
    if pool_size % 2 == 1 {
        pool_size += 1;
    }
    pool_size = pool_size.min(swarm_size - swarm_size % 2);
    sample_pool(swarm_size, pool_size, rng)
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Velocity-norm-weighted recombination of two velocities.
///
/// Both outputs point along $`v_1 + v_2`$ and are scaled by $`\|v_1\|/\|v_1+v_2\|`$ and
/// $`\|v_2\|/\|v_1+v_2\|`$ respectively. Returns [`None`] if the combined velocity has zero (or
/// non-finite) norm, in which case the pair should be left alone.
pub fn recombine_velocities(
    v1: &DVector<Float>,
    v2: &DVector<Float>,
) -> Option<(DVector<Float>, DVector<Float>)> {
    let vsum = v1 + v2;
    let nsum = norm(vsum.as_slice());
    if nsum == 0.0 || !nsum.is_finite() {
        return None;
    }
    let c1 = norm(v1.as_slice()) / nsum;
    let c2 = norm(v2.as_slice()) / nsum;
    Some((vsum.scale(c1), vsum.scale(c2)))
}
