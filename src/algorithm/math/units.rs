use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schemas::{Kind, UnitSystem};

/// Exact SI definition of the avoirdupois pound.
pub const KILOGRAMS_PER_POUND: f64 = 0.45359237;

/// Exact SI definition of the inch.
pub const CENTIMETERS_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kilograms,
    Pounds,
    Centimeters,
    Inches,
}

impl Unit {
    pub fn of(kind: Kind, system: UnitSystem) -> Self {
        match (kind, system) {
            (Kind::Weight, UnitSystem::Metric) => Unit::Kilograms,
            (Kind::Weight, UnitSystem::Imperial) => Unit::Pounds,
            (_, UnitSystem::Metric) => Unit::Centimeters,
            (_, UnitSystem::Imperial) => Unit::Inches,
        }
    }

    /// Unit the reference tables for `kind` are expressed in.
    pub fn canonical(kind: Kind) -> Self {
        Self::of(kind, UnitSystem::Metric)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kilograms",
            Unit::Pounds => "pounds",
            Unit::Centimeters => "centimeters",
            Unit::Inches => "inches",
        }
    }

    fn factor(&self) -> f64 {
        match self {
            Unit::Kilograms | Unit::Centimeters => 1.0,
            Unit::Pounds => KILOGRAMS_PER_POUND,
            Unit::Inches => CENTIMETERS_PER_INCH,
        }
    }

    #[inline]
    pub fn to_canonical(&self, value: f64) -> f64 {
        value * self.factor()
    }

    #[inline]
    pub fn from_canonical(&self, value: f64) -> f64 {
        value / self.factor()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
