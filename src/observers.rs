use std::{fmt::Debug, ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    core::Point,
    solvers::particles::{SwarmParticle, SwarmStatus},
    traits::{Observer, Status},
    Float,
};

/// A debugging observer which emits the step and full status as a `tracing` debug event after
/// every generation.
///
/// # Usage:
///
/// ```rust
/// use hypso::prelude::*;
/// use hypso::observers::DebugObserver;
/// use hypso::solvers::particles::HybridPSO;
/// use hypso::test_functions::Beale;
///
/// let obs = DebugObserver::build();
/// let mut m = Minimizer::new(Box::new(HybridPSO::default()))
///     .with_seed(0)
///     .with_max_steps(5)
///     .with_observer(obs);
/// let summary = m.minimize(&Beale, &mut ()).unwrap();
/// assert_eq!(summary.generations, 5);
/// ```
pub struct DebugObserver;
impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<S: Status + Debug, U: Debug> Observer<S, U> for DebugObserver {
    fn callback(&mut self, step: usize, status: &mut S, user_data: &mut U) -> ControlFlow<()> {
        tracing::debug!(step, ?status, ?user_data, "observer");
        ControlFlow::Continue(())
    }
}

/// An [`Observer`] which stores the history of a swarm: the global best after every generation,
/// the fitness and personal best fitness of every particle, and (optionally) the particles
/// themselves.
///
/// The stored history can be serialized, for instance to inspect a run in Python.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct TrackingObserver {
    /// Whether to store a full copy of every particle after every generation
    pub track_particles: bool,
    /// The history of the swarm particles (empty unless `track_particles` is set)
    pub history: Vec<Vec<SwarmParticle>>,
    /// The history of the global best position
    pub best_history: Vec<Point>,
    /// The history of the current fitness of every particle
    pub fitness_history: Vec<Vec<Float>>,
    /// The history of the personal best fitness of every particle
    pub personal_best_history: Vec<Vec<Float>>,
}

impl TrackingObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
    /// Like [`TrackingObserver::build`], but also keep a copy of every particle.
    pub fn build_with_particles() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self {
            track_particles: true,
            ..Default::default()
        }))
    }
    /// The global best fitness after every generation.
    pub fn best_fitness(&self) -> Vec<Float> {
        self.best_history.iter().map(|p| p.fx).collect()
    }
}

impl<U> Observer<SwarmStatus, U> for TrackingObserver {
    fn callback(
        &mut self,
        _step: usize,
        status: &mut SwarmStatus,
        _user_data: &mut U,
    ) -> ControlFlow<()> {
        if self.track_particles {
            self.history.push(status.particles.clone());
        }
        self.best_history.push(status.gbest.clone());
        self.fitness_history.push(status.fitness());
        self.personal_best_history.push(status.personal_best_fitness());
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Minimizer, solvers::particles::HybridPSO, test_functions::Beale};

    #[test]
    fn test_tracking_observer() {
        let tracker = TrackingObserver::build_with_particles();
        let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(12)))
            .with_seed(0)
            .with_max_steps(30)
            .with_observer(tracker.clone());
        m.minimize(&Beale, &mut ()).unwrap();
        let tracker = tracker.read();
        assert_eq!(tracker.best_history.len(), 30);
        assert_eq!(tracker.history.len(), 30);
        assert!(tracker.history.iter().all(|swarm| swarm.len() == 12));
        assert!(tracker.fitness_history.iter().all(|f| f.len() == 12));
        let best = tracker.best_fitness();
        assert!(best.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_tracking_without_particles() {
        let tracker = TrackingObserver::build();
        let mut m = Minimizer::new(Box::new(HybridPSO::default()))
            .with_seed(4)
            .with_max_steps(10)
            .with_observer(tracker.clone());
        m.minimize(&Beale, &mut ()).unwrap();
        assert!(tracker.read().history.is_empty());
        assert_eq!(tracker.read().personal_best_history.len(), 10);
    }
}
