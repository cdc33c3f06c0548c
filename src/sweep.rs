use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Result, SampleError, invalid};
use crate::linmod::{PartitionLimits, generate_linmod_constraints};
use crate::record::{GeneratedConstraints, ProblemParams, TrialRecord};
use crate::xor::{XorOptions, generate_xor_constraints};

const LAMBDA_POINTS: usize = 10;
const DEFAULT_ITERATIONS: usize = 30;

pub fn xor_pivot(num_sols: u64) -> Result<usize> {
    if num_sols == 0 {
        return Err(invalid("num_sols", "must be >= 1"));
    }
    Ok(num_sols.ilog2() as usize)
}

pub fn xor_sweep(num_sols: u64) -> Result<RangeInclusive<usize>> {
    Ok(0..=xor_pivot(num_sols)? + 1)
}

pub fn lambda_grid(num_sols: u64) -> Result<Vec<f64>> {
    if num_sols == 0 {
        return Err(invalid("num_sols", "must be >= 1"));
    }
    let pivot = 1.0 / num_sols as f64;
    let start = 0.5 * pivot;
    let stop = 2.0 * pivot;
    let step = (stop - start) / (LAMBDA_POINTS - 1) as f64;

    let mut grid = (0..LAMBDA_POINTS)
        .map(|i| {
            let x = if i == LAMBDA_POINTS - 1 {
                stop
            } else {
                start + i as f64 * step
            };
            (x * 100.0).round_ties_even() / 100.0
        })
        .collect::<Vec<_>>();
    grid.sort_by(f64::total_cmp);
    grid.dedup();

    let before = grid.len();
    grid.retain(|&l| l > 0.0 && l <= 1.0);
    if grid.len() != before {
        warn!(
            num_sols,
            dropped = before - grid.len(),
            "lambda values outside (0,1] after rounding were dropped"
        );
    }
    Ok(grid)
}

pub fn iterations(solutions_flag: bool, num_sols: u64) -> Result<usize> {
    if !solutions_flag {
        return Ok(DEFAULT_ITERATIONS);
    }
    usize::try_from(num_sols)
        .ok()
        .and_then(|n| n.checked_mul(100))
        .ok_or_else(|| {
            invalid(
                "num_sols",
                format!("100 * {} iterations does not fit a usize", num_sols),
            )
        })
}

// Trials are handed to `sink` one at a time, in sweep order; nothing is buffered.
pub fn plan_xor_trials<'p, R, F, E>(
    rng: &mut R,
    problem: &'p ProblemParams,
    num_sols: u64,
    iterations: usize,
    opts: &XorOptions,
    mut sink: F,
) -> std::result::Result<(), E>
where
    R: Rng + ?Sized,
    F: FnMut(TrialRecord<'p>) -> std::result::Result<(), E>,
    E: From<SampleError>,
{
    for s in xor_sweep(num_sols)? {
        for i in 0..iterations {
            let constraints = generate_xor_constraints(rng, s, problem.n, opts)?;
            debug!(s, iteration = i, "planned xor trial");
            sink(TrialRecord {
                problem,
                iteration: i,
                generated: GeneratedConstraints::Xor { s, constraints },
            })?;
        }
    }
    Ok(())
}

pub fn plan_linmod_trials<'p, R, F, E>(
    rng: &mut R,
    problem: &'p ProblemParams,
    num_sols: u64,
    iterations: usize,
    limits: &PartitionLimits,
    mut sink: F,
) -> std::result::Result<(), E>
where
    R: Rng + ?Sized,
    F: FnMut(TrialRecord<'p>) -> std::result::Result<(), E>,
    E: From<SampleError>,
{
    // domain bound is n, one variable per searched point
    for lambda in lambda_grid(num_sols)? {
        for i in 0..iterations {
            let constraints =
                generate_linmod_constraints(rng, lambda, problem.n as u64, problem.k, limits)?;
            debug!(
                lambda,
                iteration = i,
                m_eq = constraints.m_eq(),
                m_ineq = constraints.m_ineq(),
                p = constraints.p,
                "planned linmod trial"
            );
            sink(TrialRecord {
                problem,
                iteration: i,
                generated: GeneratedConstraints::LinMod {
                    lambda,
                    constraints,
                },
            })?;
        }
    }
    Ok(())
}

pub fn plan_base_trials(
    problem: &ProblemParams,
    iterations: usize,
) -> impl Iterator<Item = TrialRecord<'_>> {
    (0..iterations).map(move |i| TrialRecord {
        problem,
        iteration: i,
        generated: GeneratedConstraints::None,
    })
}
