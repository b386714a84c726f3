pub mod algorithm;
pub mod schemas;

pub use schemas::GrowthError;
