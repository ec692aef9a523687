use super::{ensure_finite, OdeSystem, SolverOptions};
use crate::{
    error::{Error, Result},
    prelude::{Real, Time},
};
use log::*;

// Dormand-Prince 5(4) tableau.
const C2: Real = 1.0 / 5.0;
const C3: Real = 3.0 / 10.0;
const C4: Real = 4.0 / 5.0;
const C5: Real = 8.0 / 9.0;

const A21: Real = 1.0 / 5.0;
const A31: Real = 3.0 / 40.0;
const A32: Real = 9.0 / 40.0;
const A41: Real = 44.0 / 45.0;
const A42: Real = -56.0 / 15.0;
const A43: Real = 32.0 / 9.0;
const A51: Real = 19372.0 / 6561.0;
const A52: Real = -25360.0 / 2187.0;
const A53: Real = 64448.0 / 6561.0;
const A54: Real = -212.0 / 729.0;
const A61: Real = 9017.0 / 3168.0;
const A62: Real = -355.0 / 33.0;
const A63: Real = 46732.0 / 5247.0;
const A64: Real = 49.0 / 176.0;
const A65: Real = -5103.0 / 18656.0;

// 5th order weights. Also the last row of A (first same as last).
const B1: Real = 35.0 / 384.0;
const B3: Real = 500.0 / 1113.0;
const B4: Real = 125.0 / 192.0;
const B5: Real = -2187.0 / 6784.0;
const B6: Real = 11.0 / 84.0;

// Difference between 5th and embedded 4th order weights.
const E1: Real = 71.0 / 57600.0;
const E3: Real = -71.0 / 16695.0;
const E4: Real = 71.0 / 1920.0;
const E5: Real = -17253.0 / 339200.0;
const E6: Real = 22.0 / 525.0;
const E7: Real = -1.0 / 40.0;

const SAFETY: Real = 0.9;
const MIN_FACTOR: Real = 0.2;
const MAX_FACTOR: Real = 5.0;

/// Linear combination y + h * sum(a_k * k_k) for the given stages.
#[inline]
fn combine<const N: usize>(y: &[Real; N], h: Real, terms: &[(Real, &[Real; N])]) -> [Real; N] {
    let mut out = *y;
    for (j, x) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (a, k) in terms {
            acc += a * k[j];
        }
        *x += h * acc;
    }
    out
}

/// Integrate with the adaptive Dormand-Prince 5(4) method, local
/// extrapolation and the classic step size controller.
///
/// Error is measured by the RMS norm of the embedded estimate weighted by
/// `atol + rtol * max(|y|, |y_new|)`. A step is accepted if the norm is not
/// larger than one.
pub fn dormand_prince<S, const N: usize>(
    system: &S,
    y0: [Real; N],
    times: &[Time],
    options: &SolverOptions,
) -> Result<Vec<[Real; N]>>
where
    S: OdeSystem<N>,
{
    let (rtol, atol) = (options.rtol(), options.atol());
    let mut t = times[0];
    let mut y = y0;
    let mut out = Vec::with_capacity(times.len());
    ensure_finite(t, &y)?;
    out.push(y);

    let mut k1 = [0.0; N];
    let mut k2 = [0.0; N];
    let mut k3 = [0.0; N];
    let mut k4 = [0.0; N];
    let mut k5 = [0.0; N];
    let mut k6 = [0.0; N];
    let mut k7 = [0.0; N];
    system.derivative(t, &y, &mut k1);

    let mut h = options.initial_step();
    let (mut accepted, mut rejected) = (0usize, 0usize);

    for &target in &times[1..] {
        while t < target {
            if accepted + rejected >= options.max_steps() {
                return Err(Error::computation(
                    t,
                    format!("step budget of {} exhausted", options.max_steps()),
                ));
            }

            let remaining = target - t;
            let last = h >= remaining;
            let h_try = if last { remaining } else { h };

            let y2 = combine(&y, h_try, &[(A21, &k1)]);
            system.derivative(t + C2 * h_try, &y2, &mut k2);
            let y3 = combine(&y, h_try, &[(A31, &k1), (A32, &k2)]);
            system.derivative(t + C3 * h_try, &y3, &mut k3);
            let y4 = combine(&y, h_try, &[(A41, &k1), (A42, &k2), (A43, &k3)]);
            system.derivative(t + C4 * h_try, &y4, &mut k4);
            let y5 = combine(&y, h_try, &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)]);
            system.derivative(t + C5 * h_try, &y5, &mut k5);
            let y6 = combine(
                &y,
                h_try,
                &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
            );
            system.derivative(t + h_try, &y6, &mut k6);
            let y_new = combine(
                &y,
                h_try,
                &[(B1, &k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
            );
            system.derivative(t + h_try, &y_new, &mut k7);

            let mut sq = 0.0;
            for j in 0..N {
                let err = h_try
                    * (E1 * k1[j] + E3 * k3[j] + E4 * k4[j] + E5 * k5[j] + E6 * k6[j] + E7 * k7[j]);
                let scale = atol + rtol * y[j].abs().max(y_new[j].abs());
                sq += (err / scale) * (err / scale);
            }
            let err = (sq / N.max(1) as Real).sqrt();

            if !err.is_finite() {
                // Overflow in the trial step: retry with a much shorter one.
                rejected += 1;
                h = h_try * MIN_FACTOR;
            } else if err <= 1.0 {
                accepted += 1;
                t = if last { target } else { t + h_try };
                y = y_new;
                k1 = k7;
                ensure_finite(t, &y)?;

                let factor = if err == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * err.powf(-0.2)).max(MIN_FACTOR).min(MAX_FACTOR)
                };
                // Truncated steps must not shrink the step used afterwards.
                h = if last { h.max(h_try * factor) } else { h_try * factor };
            } else {
                rejected += 1;
                h = h_try * (SAFETY * err.powf(-0.2)).max(MIN_FACTOR);
            }

            let min_step = 16.0 * Real::EPSILON * t.abs().max(1.0);
            if h < min_step {
                return Err(Error::computation(
                    t,
                    format!("step size underflow (h = {:e})", h),
                ));
            }
        }
        out.push(y);
    }

    debug!(
        "dormand-prince: {} samples, {} accepted and {} rejected steps",
        out.len(),
        accepted,
        rejected
    );
    Ok(out)
}
