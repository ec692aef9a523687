use crate::{
    params::{EpidemicParams, TransmissionRate},
    prelude::{Real, Time},
    solver::OdeSystem,
};
use serde::{Deserialize, Serialize};

/// Enumeration of the SEIR compartments. The index doubles as the column of
/// the compartment in state vectors and trajectories.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infectious,
    Recovered,
}

impl Compartment {
    pub const CARDINALITY: usize = 4;
    pub const CSV_HEADER: [&'static str; 4] = ["S", "E", "I", "R"];
    pub const ALL: [Compartment; 4] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infectious,
        Compartment::Recovered,
    ];

    pub fn index(self) -> usize {
        match self {
            Compartment::Susceptible => 0,
            Compartment::Exposed => 1,
            Compartment::Infectious => 2,
            Compartment::Recovered => 3,
        }
    }

    pub fn symbol(self) -> &'static str {
        Self::CSV_HEADER[self.index()]
    }
}

/// Population in each compartment at a given time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Compartments {
    pub s: Real,
    pub e: Real,
    pub i: Real,
    pub r: Real,
}

impl Compartments {
    pub fn new(s: Real, e: Real, i: Real, r: Real) -> Self {
        Compartments { s, e, i, r }
    }

    /// S + E + I + R, which must stay equal to the population size.
    pub fn total(&self) -> Real {
        self.s + self.e + self.i + self.r
    }

    /// Everyone that has been in contact with the disease.
    pub fn contaminated(&self) -> Real {
        self.e + self.i + self.r
    }

    pub fn get(&self, compartment: Compartment) -> Real {
        self.to_array()[compartment.index()]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|x| x.is_finite())
    }

    pub fn to_array(&self) -> [Real; 4] {
        [self.s, self.e, self.i, self.r]
    }
}

impl From<[Real; 4]> for Compartments {
    fn from(y: [Real; 4]) -> Self {
        Compartments::new(y[0], y[1], y[2], y[3])
    }
}

impl From<Compartments> for [Real; 4] {
    fn from(c: Compartments) -> Self {
        c.to_array()
    }
}

/// The deterministic SEIR model with frequency-dependent transmission:
///
/// ```text
/// dS/dt = -beta S I / N
/// dE/dt =  beta S I / N - sigma E
/// dI/dt =  sigma E - gamma I
/// dR/dt =  gamma I
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeirModel {
    pub beta: Real,
    pub sigma: Real,
    pub gamma: Real,
    pub population: Real,
}

impl SeirModel {
    pub fn new(beta: TransmissionRate, params: &EpidemicParams) -> Self {
        SeirModel {
            beta: beta.value(),
            sigma: params.incubation_rate(),
            gamma: params.recovery_rate(),
            population: params.population(),
        }
    }

    /// Basic reproduction number beta / gamma.
    pub fn r0(&self) -> Real {
        self.beta / self.gamma
    }
}

impl OdeSystem<4> for SeirModel {
    fn derivative(&self, _t: Time, y: &[Real; 4], dy: &mut [Real; 4]) {
        let [s, e, i, _] = *y;
        let infections = self.beta * s * i / self.population;
        let onsets = self.sigma * e;
        let recoveries = self.gamma * i;

        dy[0] = -infections;
        dy[1] = infections - onsets;
        dy[2] = onsets - recoveries;
        dy[3] = recoveries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn model() -> SeirModel {
        let beta = TransmissionRate::new(0.3).unwrap();
        SeirModel::new(beta, &EpidemicParams::default())
    }

    #[test]
    fn derivatives_sum_to_zero() {
        let m = model();
        let mut dy = [0.0; 4];
        for y in [[9999.0, 1.0, 0.0, 0.0], [5000.0, 1200.0, 2500.0, 1300.0]].iter() {
            m.derivative(0.0, y, &mut dy);
            assert_approx_eq!(dy.iter().sum::<Real>(), 0.0, 1e-12);
        }
    }

    #[test]
    fn initial_flow_is_incubation_only() {
        let mut dy = [0.0; 4];
        model().derivative(0.0, &[9999.0, 1.0, 0.0, 0.0], &mut dy);
        assert_eq!(dy[0], 0.0);
        assert_approx_eq!(dy[1], -1.0 / 5.2);
        assert_approx_eq!(dy[2], 1.0 / 5.2);
        assert_eq!(dy[3], 0.0);
    }

    #[test]
    fn reproduction_number() {
        assert_approx_eq!(model().r0(), 4.2);
    }

    #[test]
    fn compartment_columns() {
        let c = Compartments::new(1.0, 2.0, 3.0, 4.0);
        for (k, comp) in Compartment::ALL.iter().enumerate() {
            assert_eq!(comp.index(), k);
            assert_eq!(c.get(*comp), (k + 1) as Real);
        }
        assert_eq!(Compartment::Infectious.symbol(), "I");
        assert_eq!(c.contaminated(), 9.0);
    }
}
