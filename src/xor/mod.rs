pub mod constraint;
pub mod hash;

pub use constraint::XorConstraint;
pub use hash::{XorOptions, generate_xor_constraints, sample_one_xor};
