use serde::{Deserialize, Serialize};
use std::fmt;

/// Vaccine brand applied to an individual. The number of doses is tracked
/// separately in the RiskProfile.
///
/// Unknown brand names are mapped to `Other`, which carries no protection in
/// the multiplier table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VaccineBrand {
    None,
    Pfizer,
    Moderna,
    AstraZeneca,
    Other,
}

impl VaccineBrand {
    /// All brands with a dedicated entry in the multiplier table.
    pub const PROTECTIVE: [VaccineBrand; 3] = [
        VaccineBrand::Pfizer,
        VaccineBrand::Moderna,
        VaccineBrand::AstraZeneca,
    ];

    /// Canonical lowercase name, as used in config files.
    pub fn name(self) -> &'static str {
        match self {
            VaccineBrand::None => "none",
            VaccineBrand::Pfizer => "pfizer",
            VaccineBrand::Moderna => "moderna",
            VaccineBrand::AstraZeneca => "astrazeneca",
            VaccineBrand::Other => "other",
        }
    }

    /// Return true for brands that never change the transmission rate.
    pub fn is_neutral(self) -> bool {
        matches!(self, VaccineBrand::None | VaccineBrand::Other)
    }
}

impl Default for VaccineBrand {
    fn default() -> Self {
        VaccineBrand::None
    }
}

impl fmt::Display for VaccineBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for VaccineBrand {
    /// Parse brand names leniently. Both the english names and the labels of
    /// the korean web form are accepted. Anything else is `Other`.
    fn from(name: &str) -> Self {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "" | "none" | "없음" => VaccineBrand::None,
            "pfizer" | "biontech" | "pfizerbiontech" | "화이자" => VaccineBrand::Pfizer,
            "moderna" | "모더나" => VaccineBrand::Moderna,
            "astrazeneca" | "az" | "oxford" | "아스트라제네카" => VaccineBrand::AstraZeneca,
            _ => VaccineBrand::Other,
        }
    }
}

impl From<String> for VaccineBrand {
    fn from(name: String) -> Self {
        VaccineBrand::from(name.as_str())
    }
}

impl From<VaccineBrand> for String {
    fn from(brand: VaccineBrand) -> String {
        brand.name().to_string()
    }
}
