use std::convert::Infallible;

use approx::assert_abs_diff_eq;
use hypso::{
    core::PUNISHMENT,
    prelude::*,
    solvers::particles::{BinaryPSO, HybridPSO},
    test_functions::{ConstrainedQuadratic, ShiftedSphere, G01, G11, G13},
};

#[test]
fn shifted_sphere_converges_to_center() {
    let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(50)))
        .with_seed(0)
        .with_max_steps(200);
    let summary = m.minimize(&ShiftedSphere::default(), &mut ()).unwrap();
    assert!(summary.feasible);
    assert_eq!(summary.generations, 200);
    assert_abs_diff_eq!(summary.fx, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(summary.x[0], 1.0, epsilon = 0.05);
    assert_abs_diff_eq!(summary.x[1], 2.0, epsilon = 0.05);
}

#[test]
fn constrained_quadratic_finds_active_constraint() {
    let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(30))).with_seed(0);
    let summary = m.minimize(&ConstrainedQuadratic, &mut ()).unwrap();
    assert!(summary.feasible);
    assert_eq!(summary.message, "MAX ITERS");
    assert_eq!(
        ConstrainedQuadratic
            .constraint_violation(&summary.x, &mut ())
            .unwrap(),
        0.0
    );
    assert_abs_diff_eq!(summary.fx, -69.0 / 34.0, epsilon = 0.05);
    assert_abs_diff_eq!(summary.x[0], 13.0 / 17.0, epsilon = 0.35);
    assert_abs_diff_eq!(summary.x[1], 18.0 / 17.0, epsilon = 0.1);
}

#[test]
fn binary_g01_returns_feasible_bits() {
    let mut m = Minimizer::new(Box::new(BinaryPSO::default())).with_seed(0);
    let summary = m.minimize(&G01, &mut ()).unwrap();
    assert!(summary.feasible);
    assert_eq!(summary.x.len(), 13);
    assert!(summary.x.iter().all(|&b| b == 0.0 || b == 1.0));
    assert_eq!(G01.constraint_violation(&summary.x, &mut ()).unwrap(), 0.0);
    assert!(summary.fx <= -5.0);
    assert_eq!(m.status.swarm_size(), 17);
}

#[test]
fn continuous_g01_is_feasible() {
    let mut m = Minimizer::new(Box::new(HybridPSO::default()))
        .with_seed(1)
        .with_max_steps(500);
    let summary = m.minimize(&G01, &mut ()).unwrap();
    assert!(summary.feasible);
    assert!(summary.fx < 0.0);
}

#[test]
fn g11_reaches_the_parabola() {
    let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(30))).with_seed(2);
    let summary = m.minimize(&G11, &mut ()).unwrap();
    assert!(summary.feasible);
    assert!(summary.fx < 0.8);
}

#[test]
fn g13_reports_feasibility_consistently() {
    let mut m = Minimizer::new(Box::new(HybridPSO::default())).with_seed(3);
    let summary = m.minimize(&G13, &mut ()).unwrap();
    assert_eq!(summary.generations, 200);
    let violation = G13.constraint_violation(&summary.x, &mut ()).unwrap();
    if summary.feasible && summary.fx < PUNISHMENT {
        assert!(violation <= 0.0);
    } else {
        assert!(summary.fx >= PUNISHMENT);
        assert_abs_diff_eq!(summary.fx, violation + PUNISHMENT);
    }
}

struct TargetSphere;
impl OptModel for TargetSphere {
    fn objective(&self, x: &[Float], user_data: &mut ()) -> Result<Float, Infallible> {
        ShiftedSphere::default().objective(x, user_data)
    }
    fn dimension(&self) -> usize {
        2
    }
    fn min_location(&self) -> Vec<Float> {
        vec![-5.0, -5.0]
    }
    fn max_location(&self) -> Vec<Float> {
        vec![5.0, 5.0]
    }
    fn tol_fitness(&self) -> Float {
        1e-2
    }
}

#[test]
fn tolerance_stops_the_run_early() {
    let mut m = Minimizer::new(Box::new(HybridPSO::default().with_swarm_size(20))).with_seed(7);
    let summary = m.minimize(&TargetSphere, &mut ()).unwrap();
    assert!(summary.converged);
    assert_eq!(summary.message, "TOL FITNESS");
    assert!(summary.fx <= 1e-2);
    assert!(summary.generations >= 1);
    assert!(summary.generations < 1000);
    assert_eq!(summary.constraint_evals, 20 * (summary.generations + 1));
}
