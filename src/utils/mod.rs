//! Miscellaneous components used in the library.

pub mod set_algebra;
pub use set_algebra::KSubsets;
