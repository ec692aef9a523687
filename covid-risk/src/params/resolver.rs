use super::MultiplierTable;
use crate::{
    epidemic::RiskProfile,
    error::{Error, Result},
    prelude::Real,
};
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transmission rate (beta) of the SEIR model. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TransmissionRate(Real);

impl TransmissionRate {
    /// Wrap an arbitrary rate, e.g. to explore synthetic scenarios.
    pub fn new(value: Real) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(TransmissionRate(value))
        } else {
            Err(Error::invalid_input(
                "beta",
                format!("transmission rate must be positive and finite, got {}", value),
            ))
        }
    }

    pub fn value(self) -> Real {
        self.0
    }
}

impl fmt::Display for TransmissionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}", self.0)
    }
}

impl MultiplierTable {
    /// Map a risk profile to the transmission rate. All adjustments are
    /// multiplicative, so their order is irrelevant. Never fails: unknown
    /// categories were already mapped to neutral values.
    pub fn resolve(&self, profile: &RiskProfile) -> TransmissionRate {
        let age = self.age_factor(profile.age());
        let vaccine = self.brand_factor(profile.effective_brand())
            * self.doses_factor(profile.effective_doses());
        let immunity = self.prior_infections_factor(profile.prior_infections());
        let beta = self.base_rate() * age * vaccine * immunity;

        trace!(
            "resolve: age={} (x{}), vaccine x{}, immunity x{} => beta={}",
            profile.age(),
            age,
            vaccine,
            immunity,
            beta
        );
        TransmissionRate(beta)
    }
}

/// Resolve transmission rate using the default multiplier table.
pub fn resolve(profile: &RiskProfile) -> TransmissionRate {
    MultiplierTable::default().resolve(profile)
}
