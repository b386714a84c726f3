use std::fmt;

use log::{debug, error};
use serde::Serialize;

use super::math::{normalize, rollover, score, Unit};
use crate::schemas::{Gender, GrowthError, Kind, TableSource, UnitSystem};

pub const MAX_MONTHS: i64 = 61;
pub const MAX_DAYS: i64 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub kind: Kind,
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn canonical(&self) -> f64 {
        self.unit.to_canonical(self.value)
    }
}

/// A validated request: the child's age, gender and what was measured.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    months: u32,
    days: u32,
    gender: Gender,
    measurements: Vec<Measurement>,
}

impl Query {
    pub fn new(months: i64, days: Option<i64>, gender: &str) -> Result<Self, GrowthError> {
        let gender = gender.parse::<Gender>()?;

        if !(0..=MAX_MONTHS).contains(&months) {
            return Err(GrowthError::validation(format!(
                "age in month must be between 0 and {}, passed value: {}",
                MAX_MONTHS, months
            )));
        }

        let days = days.unwrap_or(0);
        if !(0..=MAX_DAYS).contains(&days) {
            return Err(GrowthError::validation(format!(
                "days must be between 0 and {}, passed value: {}",
                MAX_DAYS, days
            )));
        }

        let (months, days) = rollover(months as u32, days as u32);

        Ok(Self {
            months,
            days,
            gender,
            measurements: Vec::new(),
        })
    }

    /// Adds a measurement, replacing any earlier one of the same kind.
    pub fn measure(
        mut self,
        kind: Kind,
        value: f64,
        system: UnitSystem,
    ) -> Result<Self, GrowthError> {
        if !(value > 0.0 && value.is_finite()) {
            return Err(GrowthError::validation(format!(
                "{} must be greater than 0, passed value: {}",
                capitalize(kind.name()),
                value
            )));
        }

        let measurement = Measurement {
            kind,
            value,
            unit: Unit::of(kind, system),
        };

        match self.measurements.iter_mut().find(|item| item.kind == kind) {
            Some(item) => *item = measurement,
            None => self.measurements.push(measurement),
        }

        Ok(self)
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age_in_days(&self) -> u32 {
        normalize(self.months, self.days)
    }

    /// Measurements in weight, length, head circumference order.
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        Kind::ALL
            .into_iter()
            .filter_map(move |kind| self.measurements.iter().find(|item| item.kind == kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: Kind,
    pub value: f64,
    pub unit: Unit,
    pub months: u32,
    pub days: u32,
    pub age_in_days: u32,
    pub z_score: f64,
    pub percentile: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "For {} of {:?} {}, percentile at {} months {} days: {:?}",
            self.kind, self.value, self.unit, self.months, self.days, self.percentile
        )
    }
}

/// Scores one measurement of `query` against the table `source` holds for it.
pub fn report<S>(
    query: &Query,
    measurement: &Measurement,
    source: &S,
) -> Result<Report, GrowthError>
where
    S: TableSource + ?Sized,
{
    let age = query.age_in_days();
    let table = source.load(measurement.kind, query.gender)?;
    let value = measurement.canonical();

    debug!(
        "Scoring {} {} ({} {}) at day {}",
        measurement.kind,
        measurement.value,
        value,
        Unit::canonical(measurement.kind),
        age
    );

    let result = score(age, value, &table).map_err(|err| {
        if let GrowthError::Lookup { age } = &err {
            error!(
                "The {} table for {} has no row for day {}, table and age range disagree",
                measurement.kind, query.gender, age
            );
        }
        err
    })?;

    Ok(Report {
        kind: measurement.kind,
        value: measurement.value,
        unit: measurement.unit,
        months: query.months,
        days: query.days,
        age_in_days: age,
        z_score: result.z,
        percentile: result.percentile,
    })
}

/// Scores every measurement of `query`, loading one table per measured kind.
pub fn assess<S>(query: &Query, source: &S) -> Result<Vec<Report>, GrowthError>
where
    S: TableSource + ?Sized,
{
    query
        .measurements()
        .map(|measurement| report(query, measurement, source))
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
