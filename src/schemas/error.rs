use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowthError {
    /// Rejected input, reported back to the user as is.
    #[error("{0}")]
    Validation(String),

    /// The reference table has no row for this age, tables and the age clamp
    /// are out of sync.
    #[error("reference table has no entry for day {age}")]
    Lookup { age: u32 },

    #[error("measurement {value} is outside the domain of the LMS transform")]
    Domain { value: f64 },

    #[error("failed to load reference table {}: {reason}", .path.display())]
    Table { path: PathBuf, reason: String },
}

impl GrowthError {
    pub fn validation(message: impl Into<String>) -> Self {
        GrowthError::Validation(message.into())
    }

    pub fn table(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        GrowthError::Table {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GrowthError::Validation(_))
    }
}
