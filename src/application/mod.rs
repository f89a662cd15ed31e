//! Application layer: the record store and run drafting.
//!
//! `PayrollStore` is the explicitly constructed context the rest of the crate
//! works through. `RunDraft` collects a pay period, an employee selection and
//! adjustments, and is turned into a processed run by the store.

pub mod draft;
pub mod store;
