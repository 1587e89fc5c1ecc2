mod error;
mod meal;
mod plan;

pub use error::*;
pub use meal::*;
pub use plan::*;
