use crate::prelude::{Age, Real};

///////////////////////////////////////////////////////////////////////////////
// Epidemic constants
///////////////////////////////////////////////////////////////////////////////

pub const POPULATION: Real = 10_000.0;
pub const INITIAL_EXPOSED: Real = 1.0;
pub const INCUBATION_PERIOD: Real = 5.2;
pub const INFECTIOUS_PERIOD: Real = 14.0;
pub const HORIZON: Real = 160.0;
pub const NUM_SAMPLES: usize = 160;

///////////////////////////////////////////////////////////////////////////////
// Default multiplier table
///////////////////////////////////////////////////////////////////////////////

pub const BASE_TRANSMISSION_RATE: Real = 0.3;

pub const CHILD_MAX_AGE: Age = 18;
pub const SENIOR_MIN_AGE: Age = 60;
pub const CHILD_FACTOR: Real = 0.8;
pub const SENIOR_FACTOR: Real = 1.2;

pub const PFIZER_FACTOR: Real = 0.90;
pub const MODERNA_FACTOR: Real = 0.85;
pub const ASTRAZENECA_FACTOR: Real = 0.95;

/// Indexed by number of doses; the last entry applies to "3 or more".
pub const DOSE_FACTORS: [Real; 4] = [1.0, 0.75, 0.6, 0.5];

/// Indexed by number of prior infections; the last entry applies to "2 or
/// more".
pub const PRIOR_INFECTION_FACTORS: [Real; 3] = [1.0, 0.7, 0.5];

// Single-flag calculator: vaccinated or not, infected before or not.
pub const LEGACY_VACCINE_FACTOR: Real = 0.5;
pub const LEGACY_PRIOR_INFECTION_FACTOR: Real = 0.7;

///////////////////////////////////////////////////////////////////////////////
// Solver defaults
///////////////////////////////////////////////////////////////////////////////

pub const RELATIVE_TOLERANCE: Real = 1e-8;
pub const ABSOLUTE_TOLERANCE: Real = 1e-8;
pub const INITIAL_STEP: Real = 1e-3;
pub const RK4_STEP: Real = 0.01;
pub const MAX_STEPS: usize = 1_000_000;

/// Maximum relative drift of S + E + I + R accepted in a solution.
pub const CONSERVATION_TOLERANCE: Real = 1e-6;

/// Refresh interval of the web form the calculator was designed for.
pub const REFRESH_INTERVAL_SECS: u64 = 5 * 60;
