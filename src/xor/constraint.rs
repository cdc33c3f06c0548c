use serde::{Deserialize, Serialize};

// serialized as `[[indices...], rhs]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(Vec<u32>, bool)", from = "(Vec<u32>, bool)")]
pub struct XorConstraint {
    pub vars: Vec<u32>,
    pub rhs: bool,
}

impl XorConstraint {
    pub fn new(vars: Vec<u32>, rhs: bool) -> Self {
        Self { vars, rhs }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        let ones = self
            .vars
            .iter()
            .filter(|&&v| v >= 1 && assignment.get(v as usize - 1) == Some(&true))
            .count();
        (ones % 2 == 1) == self.rhs
    }
}

impl From<XorConstraint> for (Vec<u32>, bool) {
    fn from(c: XorConstraint) -> Self {
        (c.vars, c.rhs)
    }
}

impl From<(Vec<u32>, bool)> for XorConstraint {
    fn from((vars, rhs): (Vec<u32>, bool)) -> Self {
        Self { vars, rhs }
    }
}
