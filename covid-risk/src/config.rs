//! TOML configuration for the calculator and the command line front-end.
//!
//! Every section is optional. A minimal file only needs the profile:
//!
//! ```toml
//! [profile]
//! age = 65
//! vaccinated = true
//! brand = "moderna"
//! doses = "3+"
//! prior_infections = 1
//! ```
use crate::{
    epidemic::{ProfileInput, RiskProfile},
    error::{Error, Result},
    params::{EpidemicParams, MultiplierTable, REFRESH_INTERVAL_SECS},
    sim::{Calculator, OutputMetric, Refresher},
    solver::SolverOptions,
};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fs, path::Path, time::Duration};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub metric: OutputMetric,
    /// Also print an ASCII plot of the infectious curve.
    pub plot: bool,
    pub plot_height: usize,
    /// Write the sampled trajectory to this CSV file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epicurve_csv: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            metric: OutputMetric::default(),
            plot: false,
            plot_height: 12,
            epicurve_csv: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RefreshConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<usize>,
}

impl RefreshConfig {
    pub fn refresher(&self) -> Refresher {
        Refresher::new(Duration::from_secs(self.interval_secs), self.ticks)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            enabled: false,
            interval_secs: REFRESH_INTERVAL_SECS,
            ticks: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileInput,
    pub multipliers: MultiplierTable,
    pub epidemic: EpidemicParams,
    pub solver: SolverOptions,
    pub output: OutputConfig,
    pub refresh: RefreshConfig,
}

impl Config {
    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Config::from_toml(&data)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.multipliers.validate()?;
        self.epidemic.validate()?;
        self.solver.validate()?;
        if self.refresh.enabled && self.refresh.ticks == Some(0) {
            return Err(Error::config("refresh.ticks must be positive"));
        }
        Ok(())
    }

    pub fn calculator(&self) -> Result<Calculator> {
        Calculator::from_config(self)
    }

    /// Validated risk profile from the [profile] section.
    pub fn risk_profile(&self) -> Result<RiskProfile> {
        RiskProfile::try_from(&self.profile)
    }
}
