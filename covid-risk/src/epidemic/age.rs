use crate::prelude::Age;
use serde::{Deserialize, Serialize};

/// Age brackets with a distinct transmission multiplier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBracket {
    Child,
    Adult,
    Senior,
}

impl AgeBracket {
    /// Classify age. The senior threshold is checked first, so overlapping
    /// thresholds still map each age to a single bracket.
    pub fn classify(age: Age, child_max: Age, senior_min: Age) -> Self {
        if age >= senior_min {
            AgeBracket::Senior
        } else if age <= child_max {
            AgeBracket::Child
        } else {
            AgeBracket::Adult
        }
    }
}

impl Default for AgeBracket {
    fn default() -> Self {
        AgeBracket::Adult
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries() {
        assert_eq!(AgeBracket::classify(18, 18, 60), AgeBracket::Child);
        assert_eq!(AgeBracket::classify(19, 18, 60), AgeBracket::Adult);
        assert_eq!(AgeBracket::classify(59, 18, 60), AgeBracket::Adult);
        assert_eq!(AgeBracket::classify(60, 18, 60), AgeBracket::Senior);
        assert_eq!(AgeBracket::classify(0, 18, 60), AgeBracket::Child);
    }

    #[test]
    fn senior_wins_on_overlap() {
        assert_eq!(AgeBracket::classify(50, 70, 40), AgeBracket::Senior);
    }
}
