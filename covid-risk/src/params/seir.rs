use super::constants::*;
use crate::{
    error::{ensure_positive, Error, Result},
    models::Compartments,
    prelude::{Real, Time},
};
use getset::CopyGetters;
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed epidemiological constants of the SEIR integrator.
///
/// Periods are the user-facing values. The corresponding rates are derived
/// from them and are never serialized.
#[derive(CopyGetters, Debug, PartialEq, Copy, Clone, Serialize)]
#[getset(get_copy = "pub")]
pub struct EpidemicParams {
    /// Total population N.
    population: Real,

    /// Exposed individuals seeded at t = 0.
    initial_exposed: Real,

    /// Mean duration of the Exposed compartment.
    incubation_period: Real,

    /// Mean duration of the Infectious compartment.
    infectious_period: Real,

    /// Final time of the simulation.
    horizon: Time,

    /// Number of evenly spaced sample points in [0, horizon], both ends
    /// included.
    samples: usize,

    /// sigma = 1 / incubation_period
    #[serde(skip)]
    incubation_rate: Real,

    /// gamma = 1 / infectious_period
    #[serde(skip)]
    recovery_rate: Real,
}

impl EpidemicParams {
    /// Set mean incubation period and update the incubation rate.
    pub fn set_incubation_period(&mut self, value: Real) -> &mut Self {
        self.incubation_period = value;
        self.incubation_rate = 1.0 / value;
        self
    }

    /// Set mean infectious period and update the recovery rate.
    pub fn set_infectious_period(&mut self, value: Real) -> &mut Self {
        self.infectious_period = value;
        self.recovery_rate = 1.0 / value;
        self
    }

    pub fn set_population(&mut self, value: Real) -> &mut Self {
        self.population = value;
        self
    }

    pub fn set_initial_exposed(&mut self, value: Real) -> &mut Self {
        self.initial_exposed = value;
        self
    }

    pub fn set_horizon(&mut self, value: Time, samples: usize) -> &mut Self {
        self.horizon = value;
        self.samples = samples;
        self
    }

    /// Basic reproduction number for the given transmission rate.
    pub fn r0(&self, beta: Real) -> Real {
        beta * self.infectious_period
    }

    /// S = N - E0, E = E0, I = R = 0.
    pub fn initial_state(&self) -> Compartments {
        Compartments::new(
            self.population - self.initial_exposed,
            self.initial_exposed,
            0.0,
            0.0,
        )
    }

    /// Evenly spaced sample times from 0 to horizon, both ends included.
    pub fn sample_times(&self) -> Vec<Time> {
        match self.samples {
            0 => vec![],
            1 => vec![0.0],
            n => {
                let step = self.horizon / (n - 1) as Real;
                let mut times: Vec<Time> = (0..n).map(|k| k as Real * step).collect();
                times[n - 1] = self.horizon;
                times
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("population", self.population)?;
        ensure_positive("incubation_period", self.incubation_period)?;
        ensure_positive("infectious_period", self.infectious_period)?;
        ensure_positive("horizon", self.horizon)?;
        if !(self.initial_exposed > 0.0 && self.initial_exposed < self.population) {
            return Err(Error::config(format!(
                "initial_exposed must lie in (0, population), got {}",
                self.initial_exposed
            )));
        }
        if self.samples < 2 {
            return Err(Error::config("at least two sample points are required"));
        }
        Ok(())
    }
}

impl Default for EpidemicParams {
    fn default() -> Self {
        EpidemicParams::from(_EpidemicParams::default())
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Deserialize)]
#[serde(default)]
struct _EpidemicParams {
    population: Real,
    initial_exposed: Real,
    incubation_period: Real,
    infectious_period: Real,
    horizon: Time,
    samples: usize,
}

impl Default for _EpidemicParams {
    fn default() -> Self {
        _EpidemicParams {
            population: POPULATION,
            initial_exposed: INITIAL_EXPOSED,
            incubation_period: INCUBATION_PERIOD,
            infectious_period: INFECTIOUS_PERIOD,
            horizon: HORIZON,
            samples: NUM_SAMPLES,
        }
    }
}

impl From<_EpidemicParams> for EpidemicParams {
    fn from(p: _EpidemicParams) -> EpidemicParams {
        let mut new = EpidemicParams {
            population: p.population,
            initial_exposed: p.initial_exposed,
            incubation_period: 0.0,
            infectious_period: 0.0,
            horizon: p.horizon,
            samples: p.samples,
            incubation_rate: 0.0,
            recovery_rate: 0.0,
        };
        new.set_incubation_period(p.incubation_period);
        new.set_infectious_period(p.infectious_period);
        new
    }
}

impl<'de> Deserialize<'de> for EpidemicParams {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        _EpidemicParams::deserialize(deserializer).map(EpidemicParams::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn roundtrip() {
        let params = EpidemicParams::default();
        let data = toml::to_string(&params).unwrap();
        let params_: EpidemicParams = toml::from_str(&data).unwrap();
        assert_eq!(params, params_);
    }

    #[test]
    fn derived_rates() {
        let params = EpidemicParams::default();
        assert_approx_eq!(params.incubation_rate(), 1.0 / 5.2);
        assert_approx_eq!(params.recovery_rate(), 1.0 / 14.0);
        assert_approx_eq!(params.r0(0.3), 4.2);

        let params: EpidemicParams = toml::from_str("incubation_period = 4.0").unwrap();
        assert_eq!(params.incubation_rate(), 0.25);
        assert_eq!(params.population(), POPULATION);
    }

    #[test]
    fn linspace_sample_times() {
        let times = EpidemicParams::default().sample_times();
        assert_eq!(times.len(), 160);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[159], 160.0);
        assert_approx_eq!(times[1], 160.0 / 159.0);
    }

    #[test]
    fn initial_state_is_single_exposure() {
        let state = EpidemicParams::default().initial_state();
        assert_eq!(state, Compartments::new(9999.0, 1.0, 0.0, 0.0));
        assert_eq!(state.total(), POPULATION);
    }

    #[test]
    fn validation() {
        EpidemicParams::default().validate().unwrap();
        let mut params = EpidemicParams::default();
        params.set_incubation_period(0.0);
        assert!(params.validate().is_err());
        let mut params = EpidemicParams::default();
        params.set_horizon(160.0, 1);
        assert!(params.validate().is_err());
    }
}
