use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::GrowthError;

/// Box-Cox power (L), median (M) and coefficient of variation (S) for one age.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Lms {
    #[serde(rename = "L")]
    pub l: f64,

    #[serde(rename = "M")]
    pub m: f64,

    #[serde(rename = "S")]
    pub s: f64,
}

impl Lms {
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }
}

/// One row of a WHO expanded table, as it appears on disk. Columns other
/// than `Day`, `L`, `M` and `S` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LmsRow {
    #[serde(rename = "Day")]
    pub day: u32,

    #[serde(rename = "L")]
    pub l: f64,

    #[serde(rename = "M")]
    pub m: f64,

    #[serde(rename = "S")]
    pub s: f64,
}

impl LmsRow {
    pub fn lms(&self) -> Lms {
        Lms::new(self.l, self.m, self.s)
    }
}

/// Read-only LMS parameters keyed by age in days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    rows: BTreeMap<u32, Lms>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous parameters when `day` was already present.
    pub fn insert(&mut self, day: u32, lms: Lms) -> Option<Lms> {
        self.rows.insert(day, lms)
    }

    pub fn get(&self, day: u32) -> Option<&Lms> {
        self.rows.get(&day)
    }

    pub fn lookup(&self, day: u32) -> Result<&Lms, GrowthError> {
        self.get(day).ok_or(GrowthError::Lookup { age: day })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First day of `range` without an entry, if any.
    pub fn missing_day(&self, range: RangeInclusive<u32>) -> Option<u32> {
        range.into_iter().find(|day| !self.rows.contains_key(day))
    }
}

impl FromIterator<(u32, Lms)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (u32, Lms)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
