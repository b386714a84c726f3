use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GrowthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Weight,
    Length,
    HeadCircumference,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Weight, Kind::Length, Kind::HeadCircumference];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Weight => "weight",
            Kind::Length => "length",
            Kind::HeadCircumference => "head circumference",
        }
    }

    /// Indicator prefix used by the WHO expanded tables (weight/length/head-for-age).
    pub fn indicator(&self) -> &'static str {
        match self {
            Kind::Weight => "wfa",
            Kind::Length => "lhfa",
            Kind::HeadCircumference => "hcfa",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    pub fn plural(&self) -> &'static str {
        match self {
            Gender::Boy => "boys",
            Gender::Girl => "girls",
        }
    }
}

impl FromStr for Gender {
    type Err = GrowthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "boy" => Ok(Gender::Boy),
            "girl" => Ok(Gender::Girl),
            _ => Err(GrowthError::validation(format!(
                "gender argument must be 'boy' or 'girl', passed argument: {}",
                value
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Gender::Boy => write!(f, "boy"),
            Gender::Girl => write!(f, "girl"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn imperial_if(flag: bool) -> Self {
        if flag {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}
