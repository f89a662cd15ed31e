//! Domain types and the payroll engine.

pub mod employee;
pub mod money;
pub mod payroll;
pub mod payroll_run;
pub mod payslip;
pub mod ports;
pub mod state;
pub mod summary;
