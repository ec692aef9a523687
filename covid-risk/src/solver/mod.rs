//! Numerical integration of first order ODE systems.
//!
//! Solvers integrate a system from the first sample time and report the state
//! at every requested sample time. Sample points are hit exactly, steps are
//! truncated at them instead of interpolated.
mod dopri5;
mod rk4;

pub use dopri5::*;
pub use rk4::*;

use crate::{
    error::{ensure_positive, Error, Result},
    params::{ABSOLUTE_TOLERANCE, INITIAL_STEP, MAX_STEPS, RELATIVE_TOLERANCE, RK4_STEP},
    prelude::{Real, Time},
};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// A first order system y' = f(t, y) with N state variables.
pub trait OdeSystem<const N: usize> {
    /// Write f(t, y) into dy.
    fn derivative(&self, t: Time, y: &[Real; N], dy: &mut [Real; N]);
}

/// Available integration methods.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverMethod {
    /// Adaptive Dormand-Prince 5(4).
    DormandPrince,
    /// Classic fixed step Runge-Kutta of 4th order.
    RungeKutta4,
}

impl Default for SolverMethod {
    fn default() -> Self {
        SolverMethod::DormandPrince
    }
}

#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
#[serde(default)]
pub struct SolverOptions {
    method: SolverMethod,

    /// Relative tolerance of the adaptive method.
    rtol: Real,

    /// Absolute tolerance of the adaptive method.
    atol: Real,

    /// First trial step of the adaptive method.
    initial_step: Real,

    /// Step of the fixed step method. It is shrunk to fit evenly between
    /// sample points.
    rk4_step: Real,

    /// Maximum number of attempted steps before giving up.
    max_steps: usize,
}

impl SolverOptions {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("rtol", self.rtol)?;
        ensure_positive("atol", self.atol)?;
        ensure_positive("initial_step", self.initial_step)?;
        ensure_positive("rk4_step", self.rk4_step)?;
        if self.max_steps == 0 {
            return Err(Error::config("max_steps must be at least 1"));
        }
        Ok(())
    }

    /// Fixed step solver with the given step.
    pub fn rk4(step: Real) -> Self {
        SolverOptions {
            method: SolverMethod::RungeKutta4,
            rk4_step: step,
            ..Default::default()
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            method: SolverMethod::DormandPrince,
            rtol: RELATIVE_TOLERANCE,
            atol: ABSOLUTE_TOLERANCE,
            initial_step: INITIAL_STEP,
            rk4_step: RK4_STEP,
            max_steps: MAX_STEPS,
        }
    }
}

/// Integrate system from y0 at times[0] and return the state at each sample
/// time. Times must be sorted in increasing order.
pub fn integrate<S, const N: usize>(
    system: &S,
    y0: [Real; N],
    times: &[Time],
    options: &SolverOptions,
) -> Result<Vec<[Real; N]>>
where
    S: OdeSystem<N>,
{
    if times.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(Error::config("sample times must be strictly increasing"));
    }
    if times.is_empty() {
        return Ok(vec![]);
    }
    match options.method {
        SolverMethod::DormandPrince => dormand_prince(system, y0, times, options),
        SolverMethod::RungeKutta4 => runge_kutta4(system, y0, times, options),
    }
}

/// Fail with ComputationFailure if any component of y is NaN or infinite.
pub(crate) fn ensure_finite<const N: usize>(t: Time, y: &[Real; N]) -> Result<()> {
    if y.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(Error::computation(t, format!("non-finite state {:?}", y)))
    }
}
