pub mod factor;
pub mod generate;
pub mod modulus;
pub mod partition;

pub use factor::factorize;
pub use generate::{LinModConstraints, generate_linmod_constraints};
pub use modulus::{choose_modulus, is_prime, next_prime_at_least};
pub use partition::{Partition, PartitionLimits, partition};
