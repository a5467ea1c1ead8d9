use crate::error::{EnvError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub type Discrete = i32;
pub type Continous = f64;

/// A finite set of integers `{0, 1, ..., n - 1}`.
/// Refer: https://gymnasium.farama.org/api/spaces/fundamental/#discrete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscreteSpace {
    pub n: Discrete,
}

impl DiscreteSpace {
    pub fn new(n: Discrete) -> Self {
        assert!(n > 0, "Discrete space must have at least one element.");
        Self { n }
    }

    pub fn contains(&self, x: Discrete) -> bool {
        (0..self.n).contains(&x)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Discrete {
        rng.gen_range(0..self.n)
    }

    /// Fails with an argument error when `action` is outside the space.
    pub fn check(&self, action: Discrete) -> Result<Discrete> {
        if self.contains(action) {
            Ok(action)
        } else {
            Err(EnvError::InvalidArgument(format!(
                "action {action} is not contained in Discrete({}).",
                self.n
            )))
        }
    }
}
