use super::{simulate_with, OutputMetric, SimulationResult};
use crate::{
    config::Config,
    epidemic::RiskProfile,
    error::Result,
    params::{EpidemicParams, MultiplierTable, TransmissionRate},
    prelude::Real,
    solver::SolverOptions,
};
use getset::{CopyGetters, Getters};
use log::*;
use rayon::prelude::*;

/// Infection probability calculator. Bundles the multiplier table, the
/// epidemic constants and the solver configuration; it holds no state between
/// predictions and can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Default, Getters, CopyGetters)]
pub struct Calculator {
    #[getset(get = "pub")]
    multipliers: MultiplierTable,

    #[getset(get_copy = "pub")]
    epidemic: EpidemicParams,

    #[getset(get_copy = "pub")]
    solver: SolverOptions,

    #[getset(get_copy = "pub")]
    metric: OutputMetric,
}

impl Calculator {
    /// Create a calculator after validating every component.
    pub fn new(
        multipliers: MultiplierTable,
        epidemic: EpidemicParams,
        solver: SolverOptions,
        metric: OutputMetric,
    ) -> Result<Self> {
        multipliers.validate()?;
        epidemic.validate()?;
        solver.validate()?;
        Ok(Calculator {
            multipliers,
            epidemic,
            solver,
            metric,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Calculator::new(
            cfg.multipliers.clone(),
            cfg.epidemic,
            cfg.solver,
            cfg.output.metric,
        )
    }

    /// Same calculator, reporting with another metric.
    pub fn with_metric(mut self, metric: OutputMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn resolve(&self, profile: &RiskProfile) -> TransmissionRate {
        self.multipliers.resolve(profile)
    }

    pub fn simulate(&self, beta: TransmissionRate) -> Result<SimulationResult> {
        simulate_with(beta, &self.epidemic, &self.solver)
    }

    /// Full simulation for the given profile.
    pub fn simulate_profile(&self, profile: &RiskProfile) -> Result<SimulationResult> {
        self.simulate(self.resolve(profile))
    }

    /// Probability (in percent, within [0, 100]) that an individual with the
    /// given profile is infected.
    pub fn predict_infection_probability(&self, profile: &RiskProfile) -> Result<Real> {
        let result = self.simulate_profile(profile)?;
        let prob = result.probability(self.metric);
        info!(
            "predict: age={}, vaccinated={}, brand={}, doses={}, prior={} => beta={}, p={:.4}%",
            profile.age(),
            profile.vaccinated(),
            profile.effective_brand(),
            profile.effective_doses(),
            profile.prior_infections(),
            result.beta(),
            prob
        );
        Ok(prob)
    }

    /// Evaluate independent profiles in parallel. Results keep the order of
    /// the input.
    pub fn predict_many(&self, profiles: &[RiskProfile]) -> Vec<Result<Real>> {
        profiles
            .par_iter()
            .map(|p| self.predict_infection_probability(p))
            .collect()
    }
}

/// Predict infection probability using the default configuration.
pub fn predict_infection_probability(profile: &RiskProfile) -> Result<Real> {
    Calculator::default().predict_infection_probability(profile)
}
