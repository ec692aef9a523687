pub use crate::epidemic::*;
pub use crate::error::{Error, Result};
pub use crate::models::{Compartment, Compartments, SeirModel};
pub use crate::params::{EpidemicParams, MultiplierTable, TransmissionRate};
pub use crate::sim::{Calculator, OutputMetric, SimulationResult};
pub use crate::solver::{SolverMethod, SolverOptions};

/// Basic representation of time. Time is continuous in the ODE integrator and
/// is usually measured in days.
pub type Time = Real;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;
pub(crate) const INF: Real = Real::INFINITY;

/// Age of an individual.
pub type Age = u8;

/// Largest age accepted by the risk calculator.
pub const MAX_AGE: Age = 100;

/// Simple trait to simplify the use of age-dependent values/parameters.
pub trait ForAge<T> {
    /// Return the content of parameter for individuals with the given age.
    fn for_age(&self, age: Age) -> T;
}
