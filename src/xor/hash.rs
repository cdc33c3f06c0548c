use rand::Rng;
use serde::{Deserialize, Serialize};

use super::constraint::XorConstraint;
use crate::error::{Result, invalid};
use crate::rng::{Threshold, sample_bit, sample_fair_bit};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XorOptions {
    pub q: f64,
    pub threshold: Threshold,
}

impl Default for XorOptions {
    fn default() -> Self {
        Self {
            q: 0.5,
            threshold: Threshold::Strict,
        }
    }
}

impl XorOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.q) {
            return Err(invalid("q", format!("must be in [0,1], got {}", self.q)));
        }
        Ok(())
    }
}

pub fn sample_one_xor<R: Rng + ?Sized>(
    rng: &mut R,
    q: f64,
    n: usize,
    threshold: Threshold,
) -> Vec<u32> {
    let mut picked = Vec::new();
    for i in 1..=n {
        if sample_bit(rng, q, threshold) {
            picked.push(i as u32);
        }
    }
    picked
}

pub fn generate_xor_constraints<R: Rng + ?Sized>(
    rng: &mut R,
    s: usize,
    n: usize,
    opts: &XorOptions,
) -> Result<Vec<XorConstraint>> {
    opts.validate()?;
    if n == 0 {
        return Err(invalid("n", "must be >= 1"));
    }
    if u32::try_from(n).is_err() {
        return Err(invalid("n", format!("{} does not fit a u32 variable index", n)));
    }

    let mut out = Vec::with_capacity(s);
    for _ in 0..s {
        // no dedup or empty-row repair: every row is kept as drawn
        let vars = sample_one_xor(rng, opts.q, n, opts.threshold);
        out.push(XorConstraint {
            vars,
            rhs: sample_fair_bit(rng),
        });
    }
    Ok(out)
}
