use rand::Rng;
use serde::{Deserialize, Serialize};

use super::modulus::choose_modulus;
use super::partition::{PartitionLimits, partition, validate_lambda};
use crate::error::{Result, invalid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinModConstraints {
    #[serde(rename = "A_eq")]
    pub a_eq: Vec<Vec<u64>>,
    pub b_eq: Vec<u64>,
    #[serde(rename = "A_ineq")]
    pub a_ineq: Vec<Vec<u64>>,
    pub b_ineq: Vec<u64>,
    pub c: Vec<u64>,
    pub p: u64,
}

impl LinModConstraints {
    pub fn m_eq(&self) -> usize {
        self.a_eq.len()
    }

    pub fn m_ineq(&self) -> usize {
        self.a_ineq.len()
    }

    pub fn cell_fraction(&self) -> f64 {
        let m = (self.m_eq() + self.m_ineq()) as i32;
        let kept = self.c.iter().map(|&c| c as f64 + 1.0).product::<f64>();
        kept / (self.p as f64).powi(m)
    }

    pub fn validate(&self) -> Result<()> {
        if self.p < 2 {
            return Err(invalid("p", format!("modulus must be >= 2, got {}", self.p)));
        }
        if self.b_eq.len() != self.a_eq.len() {
            return Err(invalid(
                "b_eq",
                format!("{} entries for {} equality rows", self.b_eq.len(), self.a_eq.len()),
            ));
        }
        if self.b_ineq.len() != self.a_ineq.len() || self.c.len() != self.a_ineq.len() {
            return Err(invalid(
                "b_ineq",
                format!(
                    "{} offsets and {} bounds for {} inequality rows",
                    self.b_ineq.len(),
                    self.c.len(),
                    self.a_ineq.len()
                ),
            ));
        }
        Ok(())
    }

    pub fn admits(&self, x: &[u64]) -> Result<bool> {
        self.validate()?;
        let mut rows = self.a_eq.iter().chain(&self.a_ineq);
        if let Some(row) = rows.find(|row| row.len() != x.len()) {
            return Err(invalid(
                "x",
                format!("expected {} values, got {}", row.len(), x.len()),
            ));
        }

        let p = self.p as u128;
        for (row, &b) in self.a_eq.iter().zip(&self.b_eq) {
            if self.dot(row, x) != b as u128 % p {
                return Ok(false);
            }
        }
        for ((row, &b), &c) in self.a_ineq.iter().zip(&self.b_ineq).zip(&self.c) {
            let lhs = (self.dot(row, x) + b as u128 % p) % p;
            if lhs > c as u128 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn dot(&self, row: &[u64], x: &[u64]) -> u128 {
        let p = self.p as u128;
        row.iter()
            .zip(x)
            .fold(0u128, |acc, (&a, &v)| (acc + (a as u128 % p) * (v as u128 % p)) % p)
    }
}

pub fn generate_linmod_constraints<R: Rng + ?Sized>(
    rng: &mut R,
    lambda: f64,
    l: u64,
    len_x: usize,
    limits: &PartitionLimits,
) -> Result<LinModConstraints> {
    validate_lambda(lambda)?;
    if l == 0 {
        return Err(invalid("l", "largest domain value must be >= 1"));
    }
    if len_x == 0 {
        return Err(invalid("len_x", "must be >= 1"));
    }
    let p = choose_modulus(l).ok_or_else(|| invalid("l", format!("no prime >= {}", l)))?;

    let part = partition(lambda, p, limits)?;
    let m_equal = part.m_equal();
    let m_less = part.m_less();

    let mut a_eq = Vec::with_capacity(m_equal);
    let mut b_eq = Vec::with_capacity(m_equal);
    for _ in 0..m_equal {
        b_eq.push(rng.random_range(0..p));
        a_eq.push(random_row(rng, p, len_x));
    }

    let mut a_ineq = Vec::with_capacity(m_less);
    let mut b_ineq = Vec::with_capacity(m_less);
    let mut c = Vec::with_capacity(m_less);
    for &f in &part.factors {
        c.push(f - 1);
        b_ineq.push(rng.random_range(0..p));
        a_ineq.push(random_row(rng, p, len_x));
    }

    Ok(LinModConstraints {
        a_eq,
        b_eq,
        a_ineq,
        b_ineq,
        c,
        p,
    })
}

fn random_row<R: Rng + ?Sized>(rng: &mut R, p: u64, len_x: usize) -> Vec<u64> {
    (0..len_x).map(|_| rng.random_range(0..p)).collect()
}
