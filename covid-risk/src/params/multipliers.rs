use super::constants::*;
use crate::{
    epidemic::{AgeBracket, VaccineBrand},
    error::{ensure_positive, Error, Result},
    prelude::{Age, ForAge, Real},
};
use getset::{CopyGetters, Getters, Setters};
use paste::paste;
use serde::{Deserialize, Serialize};

/// Transmission multipliers for each age bracket.
#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
#[serde(default)]
pub struct AgeFactors {
    child_max_age: Age,
    senior_min_age: Age,
    child: Real,
    senior: Real,
}

impl AgeFactors {
    pub fn bracket(&self, age: Age) -> AgeBracket {
        AgeBracket::classify(age, self.child_max_age, self.senior_min_age)
    }

    pub fn for_bracket(&self, bracket: AgeBracket) -> Real {
        match bracket {
            AgeBracket::Child => self.child,
            AgeBracket::Adult => 1.0,
            AgeBracket::Senior => self.senior,
        }
    }
}

impl ForAge<Real> for AgeFactors {
    fn for_age(&self, age: Age) -> Real {
        self.for_bracket(self.bracket(age))
    }
}

impl Default for AgeFactors {
    fn default() -> Self {
        AgeFactors {
            child_max_age: CHILD_MAX_AGE,
            senior_min_age: SENIOR_MIN_AGE,
            child: CHILD_FACTOR,
            senior: SENIOR_FACTOR,
        }
    }
}

/// Efficacy multiplier of each vaccine brand. `None` and `Other` are always
/// neutral and have no entry.
#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[getset(get_copy = "pub", set = "pub")]
#[serde(default)]
pub struct BrandFactors {
    pfizer: Real,
    moderna: Real,
    astrazeneca: Real,
}

impl BrandFactors {
    pub fn for_brand(&self, brand: VaccineBrand) -> Real {
        match brand {
            VaccineBrand::Pfizer => self.pfizer,
            VaccineBrand::Moderna => self.moderna,
            VaccineBrand::AstraZeneca => self.astrazeneca,
            VaccineBrand::Other | VaccineBrand::None => 1.0,
        }
    }

    /// All brands share the same factor.
    pub fn uniform(value: Real) -> Self {
        BrandFactors {
            pfizer: value,
            moderna: value,
            astrazeneca: value,
        }
    }
}

impl Default for BrandFactors {
    fn default() -> Self {
        BrandFactors {
            pfizer: PFIZER_FACTOR,
            moderna: MODERNA_FACTOR,
            astrazeneca: ASTRAZENECA_FACTOR,
        }
    }
}

/// The policy table mapping risk factors to multipliers of the base
/// transmission rate.
///
/// Dose and prior infection factors are bucket tables indexed by count. Counts
/// beyond the last bucket saturate, so `[1.0, 0.7, 0.5]` reads as "none",
/// "once" and "twice or more".
#[derive(Getters, CopyGetters, Setters, Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierTable {
    #[getset(get_copy = "pub", set = "pub")]
    base_rate: Real,

    #[getset(get = "pub")]
    doses: Vec<Real>,

    #[getset(get = "pub")]
    prior_infections: Vec<Real>,

    #[getset(get = "pub", set = "pub")]
    age: AgeFactors,

    #[getset(get = "pub", set = "pub")]
    brands: BrandFactors,
}

macro_rules! bucket_prop {
    ($name:ident, $label:literal) => {
        paste! {
            #[doc = "Multiplier for the given number of " $label "."]
            pub fn [<$name _factor>](&self, n: u32) -> Real {
                bucket(&self.$name, n)
            }

            #[doc = "Replace the " $label " bucket table. Validated by `validate()`."]
            pub fn [<set_ $name>](&mut self, table: Vec<Real>) -> &mut Self {
                self.$name = table;
                self
            }
        }
    };
}

impl MultiplierTable {
    bucket_prop!(doses, "vaccine doses");
    bucket_prop!(prior_infections, "prior infections");

    /// Table of the first single-flag calculator: a flat reduction for any
    /// vaccination and another for any previous infection.
    pub fn legacy() -> Self {
        MultiplierTable {
            base_rate: BASE_TRANSMISSION_RATE,
            doses: vec![1.0, LEGACY_VACCINE_FACTOR],
            prior_infections: vec![1.0, LEGACY_PRIOR_INFECTION_FACTOR],
            age: AgeFactors::default(),
            brands: BrandFactors::uniform(1.0),
        }
    }

    pub fn age_factor(&self, age: Age) -> Real {
        self.age.for_age(age)
    }

    pub fn brand_factor(&self, brand: VaccineBrand) -> Real {
        self.brands.for_brand(brand)
    }

    /// Check the ordering properties of the table: every factor is positive,
    /// vaccines and prior infections never increase risk, the first bucket is
    /// neutral and further buckets strictly decrease.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("base_rate", self.base_rate)?;
        ensure_positive("age.child", self.age.child)?;
        ensure_positive("age.senior", self.age.senior)?;

        for brand in VaccineBrand::PROTECTIVE.iter().cloned() {
            let value = self.brand_factor(brand);
            ensure_positive(brand.name(), value)?;
            if value > 1.0 {
                return Err(Error::config(format!(
                    "vaccine brand {} increases transmission (factor {})",
                    brand, value
                )));
            }
        }
        validate_buckets("doses", &self.doses)?;
        validate_buckets("prior_infections", &self.prior_infections)
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        MultiplierTable {
            base_rate: BASE_TRANSMISSION_RATE,
            doses: DOSE_FACTORS.to_vec(),
            prior_infections: PRIOR_INFECTION_FACTORS.to_vec(),
            age: AgeFactors::default(),
            brands: BrandFactors::default(),
        }
    }
}

/// Saturating lookup. An empty table is neutral.
fn bucket(table: &[Real], n: u32) -> Real {
    match table.len() {
        0 => 1.0,
        len => table[(n as usize).min(len - 1)],
    }
}

fn validate_buckets(name: &str, table: &[Real]) -> Result<()> {
    if let Some(&first) = table.first() {
        if first != 1.0 {
            return Err(Error::config(format!(
                "{}[0] must be the neutral factor 1.0, got {}",
                name, first
            )));
        }
    }
    for (i, &value) in table.iter().enumerate() {
        ensure_positive(&format!("{}[{}]", name, i), value)?;
    }
    for (i, pair) in table.windows(2).enumerate() {
        if pair[1] >= pair[0] {
            return Err(Error::config(format!(
                "{} must strictly decrease, but {}[{}] = {} >= {}",
                name,
                name,
                i + 1,
                pair[1],
                pair[0]
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        MultiplierTable::default().validate().unwrap();
        MultiplierTable::legacy().validate().unwrap();
    }

    #[test]
    fn buckets_saturate() {
        let table = MultiplierTable::default();
        assert_eq!(table.doses_factor(0), 1.0);
        assert_eq!(table.doses_factor(3), 0.5);
        assert_eq!(table.doses_factor(7), 0.5);
        assert_eq!(table.prior_infections_factor(2), 0.5);
        assert_eq!(table.prior_infections_factor(u32::MAX), 0.5);
        assert_eq!(bucket(&[], 4), 1.0);
    }

    #[test]
    fn neutral_brands() {
        let table = MultiplierTable::default();
        assert_eq!(table.brand_factor(VaccineBrand::None), 1.0);
        assert_eq!(table.brand_factor(VaccineBrand::Other), 1.0);
        assert!(table.brand_factor(VaccineBrand::Moderna) < 1.0);
    }

    #[test]
    fn rejects_non_monotonic_tables() {
        let mut table = MultiplierTable::default();
        table.set_doses(vec![1.0, 0.6, 0.6]);
        assert!(table.validate().is_err());

        let mut table = MultiplierTable::default();
        table.set_prior_infections(vec![0.9, 0.7]);
        assert!(table.validate().is_err());

        let mut table = MultiplierTable::default();
        table.set_doses(vec![1.0, -0.5]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn rejects_harmful_brand() {
        let mut table = MultiplierTable::default();
        table.set_brands(BrandFactors::uniform(1.1));
        assert!(matches!(table.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn roundtrip() {
        let table = MultiplierTable::default();
        let data = toml::to_string(&table).unwrap();
        let table_: MultiplierTable = toml::from_str(&data).unwrap();
        assert_eq!(table, table_);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let table: MultiplierTable = toml::from_str("base_rate = 0.25\n[brands]\npfizer = 0.8\n").unwrap();
        assert_eq!(table.base_rate(), 0.25);
        assert_eq!(table.brand_factor(VaccineBrand::Pfizer), 0.8);
        assert_eq!(table.brand_factor(VaccineBrand::Moderna), MODERNA_FACTOR);
        assert_eq!(table.doses(), &DOSE_FACTORS.to_vec());
    }
}
