use std::convert::Infallible;

use crate::{traits::OptModel, Float};

/// The G11 benchmark: a quadratic objective restricted to a parabola.
///
/// ```math
/// \begin{aligned}
/// \min\quad & x^2 + (y - 1)^2 \\
/// \text{s.t.}\quad & y = x^2
/// \end{aligned}
/// ```
/// with $`x, y \in [-1, 1]`$. The equality is relaxed to $`|y - x^2| \le 10^{-3}`$. The optimum is
/// $`f(\pm 1/\sqrt{2}, 1/2) = 0.75`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct G11;
impl OptModel for G11 {
    fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x[0].powi(2) + (x[1] - 1.0).powi(2))
    }
    fn constraint_violation(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok((x[1] - x[0].powi(2)).abs() - 1e-3)
    }
    fn dimension(&self) -> usize {
        2
    }
    fn min_location(&self) -> Vec<Float> {
        vec![-1.0, -1.0]
    }
    fn max_location(&self) -> Vec<Float> {
        vec![1.0, 1.0]
    }
    fn min_velocity(&self) -> Vec<Float> {
        vec![-0.5, -0.5]
    }
    fn max_velocity(&self) -> Vec<Float> {
        vec![0.5, 0.5]
    }
}
