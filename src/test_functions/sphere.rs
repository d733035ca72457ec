use std::convert::Infallible;

use crate::{traits::OptModel, Float};

/// A sphere centered away from the origin, inside a symmetric box.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^n (x_i - c_i)^2
/// ```
/// with $`x_i \in [-L, L]`$. The minimum is $`f(\vec{c}) = 0`$.
#[derive(Clone, Debug)]
pub struct ShiftedSphere {
    /// The location of the minimum (its length sets the dimension)
    pub center: Vec<Float>,
    /// The half-width $`L`$ of the search box
    pub limit: Float,
}
impl Default for ShiftedSphere {
    fn default() -> Self {
        Self {
            center: vec![1.0, 2.0],
            limit: 5.0,
        }
    }
}
impl OptModel for ShiftedSphere {
    fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x.iter()
            .zip(&self.center)
            .map(|(xi, ci)| (xi - ci).powi(2))
            .sum())
    }
    fn dimension(&self) -> usize {
        self.center.len()
    }
    fn min_location(&self) -> Vec<Float> {
        vec![-self.limit; self.center.len()]
    }
    fn max_location(&self) -> Vec<Float> {
        vec![self.limit; self.center.len()]
    }
}
