use std::f64::consts::SQRT_2;

use crate::schemas::{GrowthError, Lms, ReferenceTable};

#[inline]
/// Z-score of a measurement under the LMS (Box-Cox) transform.
/// value: measurement in the table's canonical unit
/// lms: parameters of the table row for the child's age
pub fn zscore(lms: &Lms, value: f64) -> Result<f64, GrowthError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(GrowthError::Domain { value });
    }

    // Z = ln(X/M) / S               when L == 0
    // Z = ((X/M)^L - 1) / (L * S)   otherwise
    let ratio = value / lms.m;

    // @NOTE: L == 0 is a sentinel in the published tables, compare exactly
    let z = if lms.l == 0.0 {
        ratio.ln() / lms.s
    } else {
        (ratio.powf(lms.l) - 1.0) / (lms.l * lms.s)
    };

    if z.is_nan() {
        return Err(GrowthError::Domain { value });
    }

    Ok(z)
}

#[inline]
/// Share of the standard normal distribution below `z`, scaled to 0..100.
/// Phi(z) = erfc(-z / sqrt(2)) / 2
pub fn cumulative(z: f64) -> f64 {
    0.5 * libm::erfc(-z / SQRT_2) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub z: f64,
    pub percentile: f64,
}

pub fn score(age: u32, value: f64, table: &ReferenceTable) -> Result<Score, GrowthError> {
    let lms = table.lookup(age)?;
    let z = zscore(lms, value)?;

    Ok(Score {
        z,
        percentile: cumulative(z),
    })
}

/// Percentile of `value` for a child `age` days old. Not clamped, extreme
/// measurements land arbitrarily close to 0 or 100.
pub fn percentile(age: u32, value: f64, table: &ReferenceTable) -> Result<f64, GrowthError> {
    score(age, value, table).map(|score| score.percentile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(age: u32, lms: Lms) -> ReferenceTable {
        vec![(age, lms)].into_iter().collect()
    }

    #[test]
    fn test_median_is_fiftieth_percentile() {
        let power = table_with(100, Lms::new(0.1, 7.95, 0.09));
        let lognormal = table_with(100, Lms::new(0.0, 7.95, 0.09));
        let negative = table_with(100, Lms::new(-0.2, 7.95, 0.09));

        assert_eq!(percentile(100, 7.95, &power).unwrap(), 50.0);
        assert_eq!(percentile(100, 7.95, &lognormal).unwrap(), 50.0);
        assert_eq!(percentile(100, 7.95, &negative).unwrap(), 50.0);
    }

    #[test]
    fn test_zscore_branches() {
        let power = Lms::new(0.1, 7.95, 0.09);
        let lognormal = Lms::new(0.0, 7.95, 0.09);

        assert!((zscore(&power, 8.0).unwrap() - 0.06968420918634305).abs() < 1e-12);
        assert!((zscore(&lognormal, 8.0).unwrap() - 0.06966236681772661).abs() < 1e-12);
        assert!((zscore(&Lms::new(1.0, 10.0, 0.1), 11.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_known_values() {
        let table = table_with(182, Lms::new(0.1, 7.95, 0.09));
        let value = percentile(182, 8.0, &table).unwrap();
        assert!((value - 52.77774947650921).abs() < 1e-9);

        let table = table_with(182, Lms::new(0.0, 7.95, 0.09));
        let value = percentile(182, 8.0, &table).unwrap();
        assert!((value - 52.77688020451997).abs() < 1e-9);

        let table = table_with(0, Lms::new(1.0, 10.0, 0.1));
        let value = percentile(0, 11.0, &table).unwrap();
        assert!((value - 84.13447460685431).abs() < 1e-9);
    }

    #[test]
    fn test_cumulative_double_precision() {
        assert_eq!(cumulative(0.0), 50.0);
        assert!((cumulative(1.0) - 84.1344746068543).abs() < 1e-9);
        assert!((cumulative(-1.0) - 15.865525393145708).abs() < 1e-9);
        assert!((cumulative(-1.959963984540054) - 2.5).abs() < 1e-9);
        assert!(cumulative(-12.0) > 0.0 && cumulative(12.0) <= 100.0);
    }

    #[test]
    fn test_percentile_strictly_increasing() {
        for lms in [Lms::new(1.0, 10.0, 0.1), Lms::new(0.0, 10.0, 0.1)] {
            let table = table_with(30, lms);
            let mut previous = 0.0;

            for step in 1..=40 {
                let value = 5.0 + step as f64 * 0.25;
                let current = percentile(30, value, &table).unwrap();

                assert!(
                    current > previous,
                    "percentile did not increase at {} with {:?}",
                    value,
                    lms
                );
                assert!(current > 0.0 && current < 100.0);
                previous = current;
            }
        }
    }

    #[test]
    fn test_percentile_missing_age() {
        let table = table_with(182, Lms::new(0.1, 7.95, 0.09));

        match percentile(183, 8.0, &table) {
            Err(GrowthError::Lookup { age }) => assert_eq!(age, 183),
            other => panic!("expected lookup error, got {:?}", other),
        }
    }

    #[test]
    fn test_zscore_rejects_non_positive() {
        let lms = Lms::new(0.0, 7.95, 0.09);

        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                zscore(&lms, value),
                Err(GrowthError::Domain { .. })
            ));
        }
    }
}
