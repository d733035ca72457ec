use std::convert::Infallible;

use crate::{traits::OptModel, Float};

/// The G13 benchmark: an exponential objective under three nonlinear equality constraints.
///
/// ```math
/// \begin{aligned}
/// \min\quad & e^{x_0 x_1 x_2 x_3 x_4} \\
/// \text{s.t.}\quad & \textstyle\sum_i x_i^2 = 10 \\
/// & x_1 x_2 = 5 x_3 x_4 \\
/// & x_0^3 + x_1^3 = -1
/// \end{aligned}
/// ```
/// with $`x_0, x_1 \in [-2.3, 2.3]`$ and $`x_2, x_3, x_4 \in [-3.2, 3.2]`$. Each equality
/// $`h_k = 0`$ is relaxed to $`|h_k| \le 10^{-3}`$ and the violation is
/// $`\sum_k \max(0, |h_k| - 10^{-3})`$. The best known value is $`f \approx 0.0539498`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct G13;
impl G13 {
    /// The tolerance on each equality constraint.
    pub const TOLERANCE: Float = 1e-3;
    /// The equality constraint residuals $`h_k(\vec{x})`$.
    pub fn residuals(x: &[Float]) -> [Float; 3] {
        [
            x.iter().map(|xi| xi * xi).sum::<Float>() - 10.0,
            x[1] * x[2] - 5.0 * x[3] * x[4],
            x[0].powi(3) + x[1].powi(3) + 1.0,
        ]
    }
}
impl OptModel for G13 {
    fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(Float::exp(x.iter().product()))
    }
    fn constraint_violation(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(Self::residuals(x)
            .iter()
            .map(|h| (h.abs() - Self::TOLERANCE).max(0.0))
            .sum())
    }
    fn dimension(&self) -> usize {
        5
    }
    fn min_location(&self) -> Vec<Float> {
        vec![-2.3, -2.3, -3.2, -3.2, -3.2]
    }
    fn max_location(&self) -> Vec<Float> {
        vec![2.3, 2.3, 3.2, 3.2, 3.2]
    }
    fn min_velocity(&self) -> Vec<Float> {
        vec![-0.2, -0.2, -0.3, -0.3, -0.3]
    }
    fn max_velocity(&self) -> Vec<Float> {
        vec![0.2, 0.2, 0.3, 0.3, 0.3]
    }
    fn max_iterations(&self) -> usize {
        200
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_g13_known_solution() {
        let x = [-1.717143, 1.595709, 1.827247, -0.7636413, -0.7636450];
        assert!(G13.constraint_violation(&x, &mut ()).unwrap() <= 0.0);
        assert_abs_diff_eq!(G13.objective(&x, &mut ()).unwrap(), 0.0539498, epsilon = 1e-5);
    }

    #[test]
    fn test_g13_origin_is_infeasible() {
        let violation = G13.constraint_violation(&[0.0; 5], &mut ()).unwrap();
        assert_abs_diff_eq!(violation, 10.0 - 1e-3 + 1.0 - 1e-3, epsilon = 1e-12);
    }
}
