//! Data types for the grid engine.

mod column;
mod record;
mod selection;

pub use column::*;
pub use record::*;
pub use selection::*;
