//! This module declares parameters for the covid-risk crate.
//!
//! There are two groups of parameters: the multiplier table, a policy that
//! maps risk factors of an individual to a transmission rate, and the fixed
//! epidemiological constants consumed by the integrator. Both can be
//! overridden from a TOML config file.
mod constants;
mod multipliers;
mod resolver;
mod seir;

pub use constants::*;
pub use multipliers::*;
pub use resolver::*;
pub use seir::*;
