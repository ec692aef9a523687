use super::VaccineBrand;
use crate::{
    error::{Error, Result},
    prelude::{Age, MAX_AGE},
};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Age assumed when the form does not provide one. It falls in the bracket
/// without any age adjustment.
pub const DEFAULT_AGE: Age = 30;

/// Risk factors of a single individual. A profile is validated on construction
/// and is consumed once per prediction.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct RiskProfile {
    age: Age,
    vaccinated: bool,
    brand: VaccineBrand,
    doses: u32,
    prior_infections: u32,
}

impl RiskProfile {
    /// Create an unvaccinated profile without prior infections.
    pub fn new(age: Age) -> Result<Self> {
        if age > MAX_AGE {
            return Err(Error::invalid_input(
                "age",
                format!("expected a value in [0, {}], got {}", MAX_AGE, age),
            ));
        }
        Ok(RiskProfile {
            age,
            vaccinated: false,
            brand: VaccineBrand::None,
            doses: 0,
            prior_infections: 0,
        })
    }

    /// Mark profile as vaccinated with the given brand and number of doses.
    pub fn with_vaccine(mut self, brand: VaccineBrand, doses: u32) -> Self {
        self.vaccinated = true;
        self.brand = brand;
        self.doses = doses;
        self
    }

    /// Set the number of previous infections.
    pub fn with_prior_infections(mut self, n: u32) -> Self {
        self.prior_infections = n;
        self
    }

    /// Vaccine brand seen by the resolver. Unvaccinated profiles always report
    /// `VaccineBrand::None`, whatever was stored.
    pub fn effective_brand(&self) -> VaccineBrand {
        if self.vaccinated {
            self.brand
        } else {
            VaccineBrand::None
        }
    }

    /// Dose count seen by the resolver (zero for unvaccinated profiles).
    pub fn effective_doses(&self) -> u32 {
        if self.vaccinated {
            self.doses
        } else {
            0
        }
    }
}

impl Default for RiskProfile {
    fn default() -> Self {
        RiskProfile {
            age: DEFAULT_AGE,
            vaccinated: false,
            brand: VaccineBrand::None,
            doses: 0,
            prior_infections: 0,
        }
    }
}

/// A count given either as a number or as a form label such as "2차",
/// "3+" or "2회 이상 감염".
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountInput {
    Number(i64),
    Label(String),
}

impl CountInput {
    fn resolve(&self, field: &'static str) -> Result<u32> {
        match self {
            &CountInput::Number(n) if n < 0 => Err(Error::invalid_input(
                field,
                format!("expected a non-negative count, got {}", n),
            )),
            &CountInput::Number(n) => Ok(u32::try_from(n).unwrap_or(u32::MAX)),
            CountInput::Label(label) => Ok(parse_count(label)),
        }
    }
}

/// Extract the leading count of a form label. Labels without digits (e.g.
/// "감염되지 않음", "none") count as zero; counts too large for u32 saturate.
pub fn parse_count(label: &str) -> u32 {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// Raw, unvalidated profile as it arrives from a form or a config file.
/// Missing fields take the neutral value.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    pub vaccinated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doses: Option<CountInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_infections: Option<CountInput>,
}

impl TryFrom<&ProfileInput> for RiskProfile {
    type Error = Error;

    fn try_from(input: &ProfileInput) -> Result<Self> {
        let age = match input.age {
            None => DEFAULT_AGE,
            Some(age) if (0..=MAX_AGE as i64).contains(&age) => age as Age,
            Some(age) => {
                return Err(Error::invalid_input(
                    "age",
                    format!("expected a value in [0, {}], got {}", MAX_AGE, age),
                ))
            }
        };
        let doses = match &input.doses {
            Some(count) => count.resolve("doses")?,
            None => 0,
        };
        let prior = match &input.prior_infections {
            Some(count) => count.resolve("prior_infections")?,
            None => 0,
        };

        let mut profile = RiskProfile::new(age)?.with_prior_infections(prior);
        if input.vaccinated {
            let brand = input
                .brand
                .as_deref()
                .map(VaccineBrand::from)
                .unwrap_or_default();
            profile = profile.with_vaccine(brand, doses);
        }
        Ok(profile)
    }
}

impl TryFrom<ProfileInput> for RiskProfile {
    type Error = Error;

    fn try_from(input: ProfileInput) -> Result<Self> {
        RiskProfile::try_from(&input)
    }
}
