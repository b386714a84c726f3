mod age;
mod lms;
mod units;

pub use age::*;
pub use lms::*;
pub use units::*;
