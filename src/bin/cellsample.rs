use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cellsample::config::SamplingConfig;
use cellsample::linmod::{choose_modulus, factorize, is_prime, partition};
use cellsample::record::{ProblemParams, TrialRecord};
use cellsample::rng::{Threshold, seeded_rng};
use cellsample::sweep::{iterations, plan_base_trials, plan_linmod_trials, plan_xor_trials};

#[derive(Debug, Parser)]
#[command(name = "cellsample")]
#[command(about = "Random XOR and LinMod hash constraints for sampling by hashing")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[arg(long, global = true)]
    iterations: Option<usize>,
    /// Size runs for recording solutions (100 per solution) instead of timing.
    #[arg(long, global = true)]
    solutions: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    Xor {
        #[arg(long)]
        problem: String,
        #[arg(long)]
        num_sols: u64,
        #[arg(long)]
        q: Option<f64>,
        #[arg(long)]
        inclusive: bool,
    },
    Linmod {
        #[arg(long)]
        problem: String,
        #[arg(long)]
        num_sols: u64,
    },
    Base {
        #[arg(long)]
        problem: String,
        #[arg(long, default_value_t = 1)]
        num_sols: u64,
    },
    Partition {
        #[arg(long)]
        lambda: f64,
        #[arg(long)]
        modulus: u64,
    },
    Factorize {
        a: u64,
        #[arg(long)]
        bound: u64,
        #[arg(long)]
        cap: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => SamplingConfig::load(path)
            .with_context(|| format!("failed to load config {}", path))?,
        None => SamplingConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.seed = seed;
    }
    if cli.iterations.is_some() {
        cfg.iterations = cli.iterations;
    }

    match cli.command {
        Cmd::Xor {
            problem,
            num_sols,
            q,
            inclusive,
        } => {
            if let Some(q) = q {
                cfg.xor.q = q;
            }
            if inclusive {
                cfg.xor.threshold = Threshold::Inclusive;
            }
            cfg.validate()?;
            xor_cmd(&cfg, &problem, num_sols, cli.solutions)?
        }
        Cmd::Linmod { problem, num_sols } => {
            cfg.validate()?;
            linmod_cmd(&cfg, &problem, num_sols, cli.solutions)?
        }
        Cmd::Base { problem, num_sols } => base_cmd(&cfg, &problem, num_sols, cli.solutions)?,
        Cmd::Partition { lambda, modulus } => partition_cmd(&cfg, lambda, modulus)?,
        Cmd::Factorize { a, bound, cap } => factorize_cmd(a, bound, cap)?,
    }
    Ok(())
}

fn run_iterations(cfg: &SamplingConfig, solutions: bool, num_sols: u64) -> Result<usize> {
    match cfg.iterations {
        Some(n) => Ok(n),
        None => Ok(iterations(solutions, num_sols)?),
    }
}

fn xor_cmd(cfg: &SamplingConfig, path: &str, num_sols: u64, solutions: bool) -> Result<()> {
    let problem = ProblemParams::load(path)?;
    let iters = run_iterations(cfg, solutions, num_sols)?;
    let mut rng = seeded_rng(cfg.seed);
    let mut out = std::io::stdout().lock();
    let mut emitted = 0usize;
    plan_xor_trials(&mut rng, &problem, num_sols, iters, &cfg.xor, |t| {
        emitted += 1;
        emit(&mut out, &t)
    })?;
    info!(trials = emitted, q = cfg.xor.q, seed = cfg.seed, "xor trials written");
    Ok(())
}

fn linmod_cmd(cfg: &SamplingConfig, path: &str, num_sols: u64, solutions: bool) -> Result<()> {
    let problem = ProblemParams::load(path)?;
    let iters = run_iterations(cfg, solutions, num_sols)?;
    let mut rng = seeded_rng(cfg.seed);
    let mut out = std::io::stdout().lock();
    let mut emitted = 0usize;
    plan_linmod_trials(&mut rng, &problem, num_sols, iters, &cfg.partition, |t| {
        emitted += 1;
        emit(&mut out, &t)
    })?;
    info!(trials = emitted, seed = cfg.seed, "linmod trials written");
    Ok(())
}

fn base_cmd(cfg: &SamplingConfig, path: &str, num_sols: u64, solutions: bool) -> Result<()> {
    let problem = ProblemParams::load(path)?;
    let iters = run_iterations(cfg, solutions, num_sols)?;
    let mut out = std::io::stdout().lock();
    for t in plan_base_trials(&problem, iters) {
        emit(&mut out, &t)?;
    }
    info!(trials = iters, "base trials written");
    Ok(())
}

fn partition_cmd(cfg: &SamplingConfig, lambda: f64, modulus: u64) -> Result<()> {
    if !is_prime(modulus) {
        let hint = choose_modulus(modulus).unwrap_or(modulus);
        bail!("modulus {} is not prime (next usable: {})", modulus, hint);
    }
    let part = partition(lambda, modulus, &cfg.partition)?;
    let line = json!({
        "lambda": lambda,
        "p": modulus,
        "m": part.m,
        "m_equal": part.m_equal(),
        "m_less": part.m_less(),
        "factors": part.factors,
        "cell_fraction": part.cell_fraction(modulus),
    });
    println!("{}", line);
    Ok(())
}

fn factorize_cmd(a: u64, bound: u64, cap: usize) -> Result<()> {
    let factors = factorize(a, bound, cap);
    let feasible = !factors.is_empty();
    let line = json!({
        "a": a,
        "bound": bound,
        "cap": cap,
        "factors": factors,
        "feasible": feasible,
    });
    println!("{}", line);
    Ok(())
}

fn emit(out: &mut impl Write, trial: &TrialRecord<'_>) -> Result<()> {
    let line = json!({ "name": trial.name(), "params": trial });
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    Ok(())
}
