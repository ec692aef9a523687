//! Categorical risk factors of an individual.
mod age;
mod profile;
mod vaccines;

pub use age::*;
pub use profile::*;
pub use vaccines::*;
