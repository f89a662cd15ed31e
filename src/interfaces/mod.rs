//! Outer surfaces: CSV files and human-readable formatting.

pub mod csv;
pub mod format;
