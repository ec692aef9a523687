use super::{ensure_finite, OdeSystem, SolverOptions};
use crate::{
    error::{Error, Result},
    prelude::{Real, Time},
};
use log::*;

/// Classic 4th order Runge-Kutta with a fixed step.
///
/// The interval between consecutive samples is split into the smallest number
/// of equal steps not larger than `options.rk4_step()`. Mostly useful as a
/// reference for the adaptive method.
pub fn runge_kutta4<S, const N: usize>(
    system: &S,
    y0: [Real; N],
    times: &[Time],
    options: &SolverOptions,
) -> Result<Vec<[Real; N]>>
where
    S: OdeSystem<N>,
{
    let mut y = y0;
    let mut out = Vec::with_capacity(times.len());
    ensure_finite(times[0], &y)?;
    out.push(y);

    let (mut k1, mut k2, mut k3, mut k4) = ([0.0; N], [0.0; N], [0.0; N], [0.0; N]);
    let mut tmp = [0.0; N];
    let mut steps = 0usize;

    for w in times.windows(2) {
        let (t0, t1) = (w[0], w[1]);
        let n = ((t1 - t0) / options.rk4_step()).ceil().max(1.0) as usize;
        if steps.saturating_add(n) > options.max_steps() {
            return Err(Error::computation(
                t0,
                format!("step budget of {} exhausted", options.max_steps()),
            ));
        }
        let h = (t1 - t0) / n as Real;

        for m in 0..n {
            let t = t0 + m as Real * h;
            system.derivative(t, &y, &mut k1);
            for j in 0..N {
                tmp[j] = y[j] + 0.5 * h * k1[j];
            }
            system.derivative(t + 0.5 * h, &tmp, &mut k2);
            for j in 0..N {
                tmp[j] = y[j] + 0.5 * h * k2[j];
            }
            system.derivative(t + 0.5 * h, &tmp, &mut k3);
            for j in 0..N {
                tmp[j] = y[j] + h * k3[j];
            }
            system.derivative(t + h, &tmp, &mut k4);
            for j in 0..N {
                y[j] += h / 6.0 * (k1[j] + 2.0 * k2[j] + 2.0 * k3[j] + k4[j]);
            }
        }
        steps += n;
        ensure_finite(t1, &y)?;
        out.push(y);
    }

    debug!("runge-kutta4: {} samples, {} steps", out.len(), steps);
    Ok(out)
}
