mod error;
mod measure;
mod source;
mod table;

pub use error::*;
pub use measure::*;
pub use source::*;
pub use table::*;
