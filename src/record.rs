use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::linmod::LinModConstraints;
use crate::xor::XorConstraint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemParams {
    pub n: usize,
    pub k: usize,
    // kept as written by the caller, so an integer threshold stays an integer
    pub d: serde_json::Number,
    #[serde(rename = "M")]
    pub matrix: Vec<Vec<serde_json::Number>>,
}

impl ProblemParams {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let params: ProblemParams =
            serde_json::from_str(text).context("failed to parse problem parameters")?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            bail!("problem must have n >= 1 points");
        }
        if self.k == 0 || self.k > self.n {
            bail!("k must be in 1..={}, got {}", self.n, self.k);
        }
        if self.matrix.len() != self.n || self.matrix.iter().any(|row| row.len() != self.n) {
            bail!("distance matrix M must be {}x{}", self.n, self.n);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedConstraints {
    Xor {
        s: usize,
        constraints: Vec<XorConstraint>,
    },
    LinMod {
        lambda: f64,
        constraints: LinModConstraints,
    },
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord<'a> {
    pub problem: &'a ProblemParams,
    pub iteration: usize,
    pub generated: GeneratedConstraints,
}

impl TrialRecord<'_> {
    pub fn name(&self) -> String {
        match &self.generated {
            GeneratedConstraints::Xor { s, .. } => format!("s_{}_{}", s, self.iteration),
            GeneratedConstraints::LinMod { lambda, .. } => {
                format!("lambda_{}_{}", lambda, self.iteration)
            }
            GeneratedConstraints::None => format!("base_pars_{}", self.iteration),
        }
    }
}

// flat solver parameter layout: problem keys first, then the generated block
impl Serialize for TrialRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("n", &self.problem.n)?;
        map.serialize_entry("k", &self.problem.k)?;
        map.serialize_entry("d", &self.problem.d)?;
        map.serialize_entry("M", &self.problem.matrix)?;
        match &self.generated {
            GeneratedConstraints::Xor { constraints, .. } => {
                map.serialize_entry("constraints", constraints)?;
            }
            GeneratedConstraints::LinMod { constraints, .. } => {
                map.serialize_entry("m_eq", &constraints.m_eq())?;
                map.serialize_entry("m_ineq", &constraints.m_ineq())?;
                map.serialize_entry("A_eq", &constraints.a_eq)?;
                map.serialize_entry("b_eq", &constraints.b_eq)?;
                map.serialize_entry("A_ineq", &constraints.a_ineq)?;
                map.serialize_entry("b_ineq", &constraints.b_ineq)?;
                map.serialize_entry("c", &constraints.c)?;
                map.serialize_entry("p", &constraints.p)?;
            }
            GeneratedConstraints::None => {}
        }
        map.end()
    }
}
