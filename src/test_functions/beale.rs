use std::convert::Infallible;

use crate::{traits::OptModel, Float};

/// A Beale-type function with a quartic term.
///
/// ```math
/// f(x, y) = (2.8125 - x + xy^4)^2 + (2.25 - x + xy^2)^2 + (1.5 - x + xy)^2
/// ```
/// where $`x \in [1, 4]`$ and $`y \in [-1, 1]`$. The minimum is $`f(3, 0.5) = 0`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Beale;
impl OptModel for Beale {
    fn objective(&self, x: &[Float], _user_data: &mut ()) -> Result<Float, Infallible> {
        let (a, b) = (x[0], x[1]);
        #[allow(clippy::suboptimal_flops)]
        Ok((2.8125 - a + a * b.powi(4)).powi(2)
            + (2.25 - a + a * b.powi(2)).powi(2)
            + (1.5 - a + a * b).powi(2))
    }
    fn dimension(&self) -> usize {
        2
    }
    fn min_location(&self) -> Vec<Float> {
        vec![1.0, -1.0]
    }
    fn max_location(&self) -> Vec<Float> {
        vec![4.0, 1.0]
    }
    fn min_velocity(&self) -> Vec<Float> {
        vec![-1.0, -1.0]
    }
    fn max_velocity(&self) -> Vec<Float> {
        vec![1.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_beale_minimum() {
        assert_abs_diff_eq!(Beale.objective(&[3.0, 0.5], &mut ()).unwrap(), 0.0);
        assert!(Beale.objective(&[1.0, 1.0], &mut ()).unwrap() > 0.0);
    }
}
