use crate::{
    error::{Error, Result},
    models::{Compartment, Compartments, SeirModel},
    params::{EpidemicParams, TransmissionRate, CONSERVATION_TOLERANCE},
    prelude::{Real, Time},
    solver::{integrate, SolverOptions},
};
use getset::{CopyGetters, Getters};
use log::*;
use ndarray::prelude::*;
use paste::paste;
use serde::{Deserialize, Serialize};
use std::iter;

/// How the final state of a simulation is turned into an infection
/// probability.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMetric {
    /// Share of the population in the Infectious compartment at the last
    /// sample, 100 * I(T) / N.
    FinalInfectious,
    /// Share of the population that left the Susceptible compartment up to
    /// the last sample, 100 * (N - S(T)) / N.
    AttackRate,
}

impl Default for OutputMetric {
    fn default() -> Self {
        OutputMetric::FinalInfectious
    }
}

/// Clamp a percentage to [0, 100]. Solver overshoot must never be reported
/// as a probability above 100% (or below zero).
pub fn clamp_percentage(value: Real) -> Real {
    if value > 100.0 {
        warn!("clamping probability {} to 100%", value);
        100.0
    } else if value < 0.0 {
        warn!("clamping probability {} to 0%", value);
        0.0
    } else {
        value
    }
}

/// Trajectory of a SEIR simulation sampled at fixed times.
///
/// Each row of the trajectory is the state at the corresponding sample time,
/// columns follow `Compartment::index()`.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct SimulationResult {
    #[getset(get_copy = "pub")]
    beta: TransmissionRate,

    #[getset(get_copy = "pub")]
    population: Real,

    #[getset(get = "pub")]
    times: Vec<Time>,

    #[getset(get = "pub")]
    trajectory: Array2<Real>,
}

macro_rules! compartment_series {
    ($($name:ident: $comp:ident),* $(,)?) => {
        paste! {
            $(
                #[doc = "Time series of the `" $comp "` compartment."]
                pub fn $name(&self) -> ArrayView1<'_, Real> {
                    self.column(Compartment::$comp)
                }

                #[doc = "Population in the `" $comp "` compartment at the last sample."]
                pub fn [<final_ $name>](&self) -> Real {
                    self.tip().get(Compartment::$comp)
                }
            )*
        }
    };
}

impl SimulationResult {
    compartment_series!(
        susceptible: Susceptible,
        exposed: Exposed,
        infectious: Infectious,
        recovered: Recovered,
    );

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn column(&self, compartment: Compartment) -> ArrayView1<'_, Real> {
        self.trajectory.column(compartment.index())
    }

    /// State at the i-th sample.
    pub fn state(&self, i: usize) -> Option<Compartments> {
        if i >= self.len() {
            return None;
        }
        let row = self.trajectory.row(i);
        Some(Compartments::new(row[0], row[1], row[2], row[3]))
    }

    /// Return the last state or an empty state.
    pub fn tip(&self) -> Compartments {
        match self.len() {
            0 => Compartments::default(),
            n => self.state(n - 1).unwrap_or_default(),
        }
    }

    /// Time and size of the peak of the infectious curve.
    pub fn peak(&self) -> (Time, Real) {
        self.times
            .iter()
            .cloned()
            .zip(self.infectious().iter().cloned())
            .fold((0.0, 0.0), |acc, (t, i)| if i > acc.1 { (t, i) } else { acc })
    }

    /// Largest relative deviation of S + E + I + R from the population size
    /// among all samples.
    pub fn conservation_error(&self) -> Real {
        self.trajectory
            .outer_iter()
            .map(|row| (row.sum() - self.population).abs() / self.population)
            .fold(0.0, Real::max)
    }

    /// Infection probability (in percent) using the given output metric.
    pub fn probability(&self, metric: OutputMetric) -> Real {
        let tip = self.tip();
        let share = match metric {
            OutputMetric::FinalInfectious => tip.i,
            OutputMetric::AttackRate => self.population - tip.s,
        };
        clamp_percentage(100.0 * share / self.population)
    }

    /// Percentage of the population infectious at the end of the horizon.
    pub fn infection_probability(&self) -> Real {
        self.probability(OutputMetric::FinalInfectious)
    }

    /// Percentage of the population infected at some point up to the end of
    /// the horizon.
    pub fn attack_rate(&self) -> Real {
        self.probability(OutputMetric::AttackRate)
    }

    /// Render the epicurve as CSV data with a t,S,E,I,R header.
    pub fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(iter::once("t").chain(Compartment::CSV_HEADER.iter().cloned()))?;
        for (t, row) in self.times.iter().zip(self.trajectory.outer_iter()) {
            let record = iter::once(t.to_string()).chain(row.iter().map(|x| x.to_string()));
            writer.write_record(record)?;
        }
        let data = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

/// Simulate the SEIR model with default epidemic constants and solver.
pub fn simulate(beta: TransmissionRate) -> Result<SimulationResult> {
    simulate_with(beta, &EpidemicParams::default(), &SolverOptions::default())
}

/// Simulate the SEIR model and check the solution: the final state must be
/// finite and the population must be conserved at every sample.
pub fn simulate_with(
    beta: TransmissionRate,
    params: &EpidemicParams,
    solver: &SolverOptions,
) -> Result<SimulationResult> {
    params.validate()?;
    solver.validate()?;
    let model = SeirModel::new(beta, params);
    let times = params.sample_times();
    let y0: [Real; 4] = params.initial_state().into();
    let rows = integrate(&model, y0, &times, solver)?;

    let mut trajectory = Array2::<Real>::zeros((rows.len(), Compartment::CARDINALITY));
    for (i, y) in rows.iter().enumerate() {
        for (j, &x) in y.iter().enumerate() {
            trajectory[[i, j]] = x;
        }
    }

    let result = SimulationResult {
        beta,
        population: params.population(),
        times,
        trajectory,
    };
    let horizon = result.times.last().cloned().unwrap_or(0.0);

    let tip = result.tip();
    if !tip.is_finite() {
        return Err(Error::computation(horizon, format!("non-finite final state {:?}", tip)));
    }
    let drift = result.conservation_error();
    if !(drift <= CONSERVATION_TOLERANCE) {
        return Err(Error::computation(
            horizon,
            format!("population not conserved (relative drift {:e})", drift),
        ));
    }

    debug!(
        "simulate: beta={}, R0={:.3}, final={:?}, drift={:e}",
        beta,
        model.r0(),
        tip,
        drift
    );
    Ok(result)
}

/// Infection probability for the given transmission rate, using the default
/// constants and the final infectious share.
pub fn infection_probability(beta: TransmissionRate) -> Result<Real> {
    Ok(simulate(beta)?.infection_probability())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn beta(value: Real) -> TransmissionRate {
        TransmissionRate::new(value).unwrap()
    }

    #[test]
    fn conservation_at_every_sample() {
        for &b in [0.05, 0.3, 0.36, 2.0].iter() {
            let res = simulate(beta(b)).unwrap();
            assert_eq!(res.len(), 160);
            for i in 0..res.len() {
                let total = res.state(i).unwrap().total();
                assert!((total - 10_000.0).abs() / 10_000.0 < 1e-9, "beta={} i={}", b, i);
            }
        }
    }

    #[test]
    fn baseline_final_infectious() {
        let res = simulate(beta(0.3)).unwrap();
        assert_eq!(*res.times().last().unwrap(), 160.0);
        assert_approx_eq!(res.infection_probability(), 1.0081, 0.005);
        assert_approx_eq!(res.final_susceptible(), 168.16, 0.5);
        assert!(res.attack_rate() > 90.0);
    }

    #[test]
    fn matches_reference_solution() {
        let params = EpidemicParams::default();
        let fine = SolverOptions::rk4(0.005);
        for &b in [0.3, 0.24, 0.0637].iter() {
            let adaptive = simulate(beta(b)).unwrap();
            let reference = simulate_with(beta(b), &params, &fine).unwrap();
            for (x, y) in adaptive.trajectory().iter().zip(reference.trajectory().iter()) {
                assert!((x - y).abs() <= 1e-3 * y.abs().max(1.0), "{} vs {}", x, y);
            }
        }
    }

    #[test]
    fn peak_precedes_horizon() {
        let res = simulate(beta(0.3)).unwrap();
        let (t, i) = res.peak();
        assert!(t > 0.0 && t < 160.0);
        assert!(i > res.final_infectious());
    }

    #[test]
    fn clamps_percentages() {
        assert_eq!(clamp_percentage(100.000_000_1), 100.0);
        assert_eq!(clamp_percentage(-1e-12), 0.0);
        assert_eq!(clamp_percentage(42.0), 42.0);
    }

    #[test]
    fn saturated_outbreak_never_exceeds_100() {
        let res = simulate(beta(5.0)).unwrap();
        let attack = res.attack_rate();
        assert!(attack <= 100.0);
        assert!(attack > 99.99);
        assert!(res.infection_probability() <= 100.0);
    }

    #[test]
    fn csv_epicurve() {
        let res = simulate(beta(0.3)).unwrap();
        let data = res.render_csv().unwrap();
        let mut lines = data.lines();
        assert_eq!(lines.next(), Some("t,S,E,I,R"));
        assert_eq!(lines.next(), Some("0,9999,1,0,0"));
        assert_eq!(data.lines().count(), 161);
    }

    #[test]
    fn rejects_degenerate_sample_grids() {
        let solver = SolverOptions::default();
        for &samples in [0, 1].iter() {
            let mut params = EpidemicParams::default();
            params.set_horizon(160.0, samples);
            assert!(simulate_with(beta(0.3), &params, &solver).is_err());
        }
    }

    #[test]
    fn rejects_invalid_solver_options() {
        let mut solver = SolverOptions::default();
        solver.set_rtol(-1.0);
        assert!(simulate_with(beta(0.3), &EpidemicParams::default(), &solver).is_err());
    }

    #[test]
    fn budget_exhaustion_is_a_failure() {
        let mut solver = SolverOptions::default();
        solver.set_max_steps(10);
        let err = simulate_with(beta(0.3), &EpidemicParams::default(), &solver).unwrap_err();
        assert!(err.is_computation_failure());
    }
}
