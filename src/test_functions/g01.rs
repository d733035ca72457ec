use std::convert::Infallible;

use crate::{traits::OptModel, Float};

/// The G01 benchmark: a concave quadratic objective in 13 variables with nine linear inequality
/// constraints.
///
/// ```math
/// f(\vec{x}) = 5\sum_{i=0}^{3} x_i - 5\sum_{i=0}^{3} x_i^2 - \sum_{i=4}^{12} x_i
/// ```
/// with $`x_i \in [0, 1]`$ except $`x_9, x_{10}, x_{11} \in [0, 100]`$. The continuous optimum is
/// $`f(1, \dots, 1, 3, 3, 3, 1) = -15`$.
///
/// On $`\{0, 1\}^{13}`$ the quadratic terms cancel and the all-ones vector is feasible with
/// $`f = -9`$, which makes this a convenient problem for
/// [`BinaryPSO`](crate::solvers::particles::BinaryPSO) as well.
#[derive(Clone, Copy, Debug, Default)]
pub struct G01;
impl G01 {
    /// The individual constraint values $`g_k(\vec{x}) \le 0`$.
    pub fn constraints(x: &[Float]) -> [Float; 9] {
        [
            2.0 * x[0] + 2.0 * x[1] + x[9] + x[10] - 10.0,
            2.0 * x[0] + 2.0 * x[2] + x[9] + x[11] - 10.0,
            2.0 * x[1] + 2.0 * x[2] + x[10] + x[11] - 10.0,
            -8.0 * x[0] + x[9],
            -8.0 * x[1] + x[10],
            -8.0 * x[2] + x[11],
            -2.0 * x[3] - x[4] + x[9],
            -2.0 * x[5] - x[6] + x[10],
            -2.0 * x[7] - x[8] + x[11],
        ]
    }
}
impl OptModel for G01 {
    fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        let linear: Float = x[..4].iter().map(|xi| 5.0 * xi).sum();
        let quadratic: Float = x[..4].iter().map(|xi| 5.0 * xi * xi).sum();
        let rest: Float = x[4..13].iter().sum();
        Ok(linear - quadratic - rest)
    }
    fn constraint_violation(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(Self::constraints(x).iter().map(|g| g.max(0.0)).sum())
    }
    fn dimension(&self) -> usize {
        13
    }
    fn min_location(&self) -> Vec<Float> {
        vec![0.0; 13]
    }
    fn max_location(&self) -> Vec<Float> {
        let mut upper = vec![1.0; 13];
        upper[9..12].fill(100.0);
        upper
    }
    fn min_velocity(&self) -> Vec<Float> {
        self.max_velocity().iter().map(|v| -v).collect()
    }
    fn max_velocity(&self) -> Vec<Float> {
        let mut upper = vec![0.5; 13];
        upper[9..12].fill(50.0);
        upper
    }
    fn max_iterations(&self) -> usize {
        2000
    }
}
