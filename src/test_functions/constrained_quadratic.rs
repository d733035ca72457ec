use std::convert::Infallible;

use crate::{traits::OptModel, Float};

/// A convex quadratic program with two linear inequality constraints.
///
/// ```math
/// \begin{aligned}
/// \min\quad & \tfrac{1}{2}x^2 + \tfrac{1}{2}y^2 - x - 2y \\
/// \text{s.t.}\quad & 2x + 3y \le 6 \\
/// & x + 4y \le 5
/// \end{aligned}
/// ```
/// with $`x, y \in [0, 10]`$. The second constraint is active at the optimum
/// $`(13/17, 18/17)`$, where $`f = -69/34 \approx -2.0294`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstrainedQuadratic;
impl OptModel for ConstrainedQuadratic {
    fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok(-x[0] - 2.0 * x[1] + 0.5 * x[0] * x[0] + 0.5 * x[1] * x[1])
    }
    fn constraint_violation(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok([2.0 * x[0] + 3.0 * x[1] - 6.0, x[0] + 4.0 * x[1] - 5.0]
            .iter()
            .map(|g| g.max(0.0))
            .sum())
    }
    fn dimension(&self) -> usize {
        2
    }
    fn min_location(&self) -> Vec<Float> {
        vec![0.0, 0.0]
    }
    fn max_location(&self) -> Vec<Float> {
        vec![10.0, 10.0]
    }
    fn min_velocity(&self) -> Vec<Float> {
        vec![-1.0, -1.0]
    }
    fn max_velocity(&self) -> Vec<Float> {
        vec![1.0, 1.0]
    }
}
