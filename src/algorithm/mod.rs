mod math;

pub mod growth;

pub use math::*;
