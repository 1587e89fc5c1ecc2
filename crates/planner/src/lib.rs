mod config;
mod generate;
mod select;

pub use config::*;
pub use generate::*;
pub use select::*;
