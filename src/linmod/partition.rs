use serde::{Deserialize, Serialize};
use tracing::debug;

use super::factor::factorize;
use crate::error::{Result, SampleError, invalid};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionLimits {
    pub initial_epsilon: f64,
    pub nu_max: f64,
    pub max_rounds: usize,
    pub max_epsilon: f64,
}

impl Default for PartitionLimits {
    fn default() -> Self {
        Self {
            initial_epsilon: 0.01,
            nu_max: 100.0,
            max_rounds: 16,
            max_epsilon: f64::INFINITY,
        }
    }
}

impl PartitionLimits {
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_epsilon.is_finite() && self.initial_epsilon > 0.0) {
            return Err(invalid(
                "initial_epsilon",
                format!("must be finite and > 0, got {}", self.initial_epsilon),
            ));
        }
        if !(self.nu_max.is_finite() && self.nu_max > 1.0) {
            return Err(invalid(
                "nu_max",
                format!("must be finite and > 1, got {}", self.nu_max),
            ));
        }
        if self.max_rounds == 0 {
            return Err(invalid("max_rounds", "must be >= 1"));
        }
        if self.max_epsilon.is_nan() || self.max_epsilon < self.initial_epsilon {
            return Err(invalid(
                "max_epsilon",
                format!(
                    "must be >= initial_epsilon ({}), got {}",
                    self.initial_epsilon, self.max_epsilon
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub m: usize,
    pub factors: Vec<u64>,
}

impl Partition {
    pub fn m_less(&self) -> usize {
        self.factors.len()
    }

    pub fn m_equal(&self) -> usize {
        self.m - self.factors.len()
    }

    pub fn cell_fraction(&self, p: u64) -> f64 {
        let kept = self.factors.iter().map(|&f| f as f64).product::<f64>();
        kept / (p as f64).powi(self.m as i32)
    }
}

pub fn validate_lambda(lambda: f64) -> Result<()> {
    if !(lambda > 0.0 && lambda <= 1.0) {
        return Err(invalid("lambda", format!("must be in (0,1], got {}", lambda)));
    }
    Ok(())
}

/// Finds `m` and a bounded factorization `F` with `lambda * p^m` close to `prod(F)`.
/// An empty `F` means all `m` constraints are equalities.
pub fn partition(lambda: f64, p: u64, limits: &PartitionLimits) -> Result<Partition> {
    validate_lambda(lambda)?;
    if p < 2 {
        return Err(invalid("p", format!("modulus must be >= 2, got {}", p)));
    }
    limits.validate()?;

    let pf = p as f64;
    let mut epsilon = limits.initial_epsilon;
    let mut rounds = 0usize;

    loop {
        rounds += 1;
        let mut m = 0usize;
        let mut nu = lambda;

        // nu grows by a factor p >= 2 each step, so this always reaches nu_max
        loop {
            m += 1;
            nu *= pf;

            if (nu - 1.0).abs() / nu <= epsilon {
                debug!(lambda, p, m, epsilon, rounds, "partition: equalities only");
                return Ok(Partition {
                    m,
                    factors: Vec::new(),
                });
            }
            if nu > limits.nu_max {
                break;
            }

            let lo = nu.floor();
            let hi = nu.ceil();
            let factors = if (nu - lo) / nu <= epsilon {
                factorize(lo as u64, p - 1, m)
            } else if (hi - nu) / nu <= epsilon {
                factorize(hi as u64, p - 1, m)
            } else {
                Vec::new()
            };

            if !factors.is_empty() {
                debug!(
                    lambda,
                    p,
                    m,
                    epsilon,
                    rounds,
                    m_less = factors.len(),
                    "partition: found factorization"
                );
                return Ok(Partition { m, factors });
            }
        }

        debug!(lambda, p, epsilon, rounds, "partition: nu exceeded nu_max, relaxing epsilon");
        if rounds >= limits.max_rounds || epsilon * 2.0 > limits.max_epsilon {
            return Err(SampleError::NoFeasiblePartition {
                lambda,
                modulus: p,
                rounds,
                epsilon,
            });
        }
        epsilon *= 2.0;
    }
}
