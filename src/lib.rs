pub mod config;
pub mod error;
pub mod linmod;
pub mod record;
pub mod rng;
pub mod sweep;
pub mod xor;

pub use error::{Result, SampleError};
