//! Individual infection probability from a deterministic SEIR model.
//!
//! Risk factors of an individual (age, vaccination and previous infections)
//! are mapped to the transmission rate of a SEIR epidemic seeded with a single
//! exposure. The model is integrated over a fixed horizon and the final state
//! is reported as a percentage.
//!
//! ```no_run
//! use covid_risk::prelude::*;
//!
//! let profile = RiskProfile::new(65)?
//!     .with_vaccine(VaccineBrand::Moderna, 2)
//!     .with_prior_infections(1);
//! let prob = covid_risk::predict_infection_probability(&profile)?;
//! println!("{:.2}%", prob);
//! # Ok::<(), covid_risk::Error>(())
//! ```
pub mod config;
pub mod epidemic;
pub mod error;
pub mod models;
pub mod params;
pub mod prelude;
pub mod sim;
pub mod solver;
pub mod utils;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::params::resolve;
pub use crate::sim::{infection_probability, predict_infection_probability, simulate};
