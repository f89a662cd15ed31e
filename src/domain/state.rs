use super::employee::Employee;
use super::payroll_run::PayrollRun;
use super::payslip::Payslip;
use serde::{Deserialize, Serialize};

/// A named reference entry (department, role, earning or deduction type).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

impl CatalogEntry {
    /// Creates a catalog entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub type Department = CatalogEntry;
pub type Role = CatalogEntry;
pub type EarningType = CatalogEntry;
pub type DeductionType = CatalogEntry;

/// Everything the store holds. Also the shape of the JSON snapshot.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub employees: Vec<Employee>,
    pub payroll_runs: Vec<PayrollRun>,
    pub payslips: Vec<Payslip>,
    pub departments: Vec<Department>,
    pub roles: Vec<Role>,
    pub earning_types: Vec<EarningType>,
    pub deduction_types: Vec<DeductionType>,
    pub use_local_storage: bool,
}

impl AppState {
    /// Looks up an employee by id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Looks up a payroll run by id.
    pub fn payroll_run(&self, id: &str) -> Option<&PayrollRun> {
        self.payroll_runs.iter().find(|r| r.id == id)
    }

    /// Employees with status `Active`, in stored order.
    pub fn active_employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.is_active())
    }

    /// Payslips belonging to `run_id`, in stored order.
    pub fn payslips_for_run<'a>(&'a self, run_id: &'a str) -> impl Iterator<Item = &'a Payslip> {
        self.payslips
            .iter()
            .filter(move |p| p.payroll_run_id == run_id)
    }

    /// Drops stored payslips sharing an id with the new ones, then appends
    /// the new ones. Returns how many were added.
    pub fn replace_payslips(&mut self, payslips: Vec<Payslip>) -> usize {
        self.payslips
            .retain(|existing| !payslips.iter().any(|p| p.id == existing.id));
        let count = payslips.len();
        self.payslips.extend(payslips);
        count
    }
}
