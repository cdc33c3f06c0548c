use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(
        "no feasible partition for lambda={lambda} mod {modulus} after {rounds} rounds (epsilon={epsilon})"
    )]
    NoFeasiblePartition {
        lambda: f64,
        modulus: u64,
        rounds: usize,
        epsilon: f64,
    },
}

pub type Result<T> = std::result::Result<T, SampleError>;

pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> SampleError {
    SampleError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
