//! Adapters behind the domain ports, plus the fixture generator.

pub mod in_memory;
pub mod json_file;
pub mod seed;
