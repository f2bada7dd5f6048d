//! Dependency version gate: requirement lookup, probing and comparison

mod check;
mod manifest;
mod probe;
mod version;

pub use check::*;
pub use manifest::*;
pub use probe::*;
pub use version::*;
