//! Deterministic fixture data.
//!
//! The generator must stay bit-for-bit compatible with fixtures produced
//! elsewhere, so every draw happens in a fixed order and all intermediate
//! figures are computed in `f64` before being turned into `Money`.

use crate::domain::employee::{Employee, EmployeeStatus};
use crate::domain::money::Money;
use crate::domain::payroll_run::{PayrollRun, RunStatus};
use crate::domain::payslip::{LineItem, Payslip};
use crate::domain::state::{AppState, CatalogEntry};
use chrono::NaiveDate;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u32 = 12345;

const EMPLOYEE_COUNT: usize = 12;
const RUN_SIZE: usize = 10;
const HEALTH_INSURANCE: f64 = 200.0;

const FIRST_NAMES: [&str; 14] = [
    "John", "Sarah", "Michael", "Emily", "David", "Lisa", "Robert", "Amanda", "Chris", "Jessica",
    "Carlos", "Priya", "Noah", "Zoe",
];
const LAST_NAMES: [&str; 14] = [
    "Smith", "Johnson", "Brown", "Davis", "Wilson", "Martinez", "Taylor", "Anderson", "Thomas",
    "Garcia", "Lee", "Singh", "Nguyen", "Patel",
];
const BANKS: [&str; 6] = [
    "First National Bank",
    "City Bank",
    "Trust Bank",
    "Community Bank",
    "Metro Bank",
    "Regional Bank",
];

/// Mulberry32: a 32-bit state mixer.
///
/// All arithmetic wraps modulo 2^32. `next_f64` maps the output into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator starting from `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next raw output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// The next output scaled into `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform index into `len` slots.
    fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64).floor() as usize
    }

    /// Picks one item uniformly. `items` must not be empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

/// Rounds half up, to whole dollars.
fn whole_dollars(n: f64) -> f64 {
    (n + 0.5).floor()
}

fn money(n: f64) -> Money {
    Money::from(n as i64)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn catalog(prefix: &str, names: &[&str]) -> Vec<CatalogEntry> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| CatalogEntry::new(format!("{prefix}-{}", i + 1), *name))
        .collect()
}

/// Builds the demo dataset for `seed`.
///
/// Twelve employees, two processed runs with historical payslips and one
/// draft run. The same seed always yields the same state.
pub fn create_seed(seed: u32) -> AppState {
    let mut rng = Mulberry32::new(seed);

    let departments = catalog("dept", &["Engineering", "Operations", "HR", "Finance"]);
    let roles = catalog(
        "role",
        &[
            "Junior Developer",
            "Senior Developer",
            "Tech Lead",
            "DevOps Engineer",
            "Operations Coordinator",
            "Operations Manager",
            "HR Specialist",
            "HR Manager",
            "Financial Analyst",
            "Finance Manager",
        ],
    );
    let earning_types = catalog(
        "earning",
        &[
            "Base Salary",
            "Overtime",
            "Allowance",
            "Bonus",
            "Holiday Bonus",
            "Commission",
        ],
    );
    let deduction_types = catalog(
        "deduction",
        &[
            "Tax",
            "Pension",
            "Health Insurance",
            "Loan Repayment",
            "Union Dues",
            "Parking",
        ],
    );

    let mut employees = Vec::with_capacity(EMPLOYEE_COUNT);
    let mut salaries = Vec::with_capacity(EMPLOYEE_COUNT);
    for i in 1..=EMPLOYEE_COUNT {
        let first = *rng.pick(&FIRST_NAMES);
        let last = *rng.pick(&LAST_NAMES);
        let department = rng.pick(&departments).name.clone();
        let role = rng.pick(&roles).name.clone();
        let hire_year = 2018 + rng.index(7) as i32;
        let hire_month = 1 + rng.index(12) as u32;
        let hire_day = 1 + rng.index(28) as u32;
        let base_salary = whole_dollars(50_000.0 + rng.next_f64() * 70_000.0);
        let status = if rng.next_f64() > 0.15 {
            EmployeeStatus::Active
        } else {
            EmployeeStatus::Inactive
        };
        let bank_name = rng.pick(&BANKS).to_string();
        let account_suffix = (rng.next_f64() * 9000.0 + 1000.0).floor() as u32;

        salaries.push(base_salary);
        employees.push(Employee {
            id: format!("emp-{i}"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@company.com", first.to_lowercase(), last.to_lowercase()),
            phone: format!("+1-555-{}", 1000 + i),
            department,
            role,
            hire_date: date(hire_year, hire_month, hire_day),
            base_salary: money(base_salary),
            status,
            bank_name: Some(bank_name),
            bank_account_no: Some(format!("****{account_suffix}")),
        });
    }

    let run_members: Vec<String> = employees
        .iter()
        .filter(|e| e.is_active())
        .take(RUN_SIZE)
        .map(|e| e.id.clone())
        .collect();
    let run = |id: &str,
               period: (NaiveDate, NaiveDate),
               pay_date: NaiveDate,
               status: RunStatus,
               notes: &str| PayrollRun {
        id: id.to_string(),
        period_start: period.0,
        period_end: period.1,
        pay_date,
        status,
        notes: Some(notes.to_string()),
        employee_ids: run_members.clone(),
    };
    let payroll_runs = vec![
        run(
            "run-1",
            (date(2024, 11, 1), date(2024, 11, 30)),
            date(2024, 12, 5),
            RunStatus::Processed,
            "November 2024 payroll",
        ),
        run(
            "run-2",
            (date(2024, 12, 1), date(2024, 12, 31)),
            date(2025, 1, 5),
            RunStatus::Processed,
            "December 2024 payroll with holiday bonuses",
        ),
        run(
            "run-3",
            (date(2025, 1, 1), date(2025, 1, 31)),
            date(2025, 2, 5),
            RunStatus::Draft,
            "January 2025 payroll - draft",
        ),
    ];

    let mut payslips = Vec::new();
    for run in payroll_runs.iter().filter(|r| r.is_processed()) {
        for employee_id in &run.employee_ids {
            let Some(idx) = employees.iter().position(|e| &e.id == employee_id) else {
                continue;
            };
            let monthly = salaries[idx] / 12.0;

            let bonus = if rng.next_f64() > 0.8 {
                whole_dollars(1000.0 + rng.next_f64() * 3000.0)
            } else {
                0.0
            };
            let overtime = if rng.next_f64() > 0.7 {
                whole_dollars(100.0 + rng.next_f64() * 1000.0)
            } else {
                0.0
            };
            let gross = whole_dollars(monthly + bonus + overtime);
            let tax = whole_dollars(gross * (0.15 + rng.next_f64() * 0.05));
            let deductions = tax + HEALTH_INSURANCE;

            let mut earnings = vec![LineItem::new("Base Salary", money(whole_dollars(monthly)))];
            if bonus != 0.0 {
                earnings.push(LineItem::new("Holiday Bonus", money(bonus)));
            }
            if overtime != 0.0 {
                earnings.push(LineItem::new("Overtime", money(overtime)));
            }

            payslips.push(Payslip {
                id: Payslip::id_for(&run.id, employee_id),
                payroll_run_id: run.id.clone(),
                employee_id: employee_id.clone(),
                earnings,
                deductions: vec![
                    LineItem::new("Tax", money(tax)),
                    LineItem::new("Health Insurance", money(HEALTH_INSURANCE)),
                ],
                gross_pay: money(gross),
                total_deductions: money(deductions),
                net_pay: money(gross - deductions),
            });
        }
    }

    AppState {
        employees,
        payroll_runs,
        payslips,
        departments,
        roles,
        earning_types,
        deduction_types,
        use_local_storage: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mulberry32_reference_outputs() {
        let mut rng = Mulberry32::new(12345);
        assert_eq!(rng.next_u32(), 4207900869);
        assert_eq!(rng.next_u32(), 1317490944);
        assert_eq!(rng.next_u32(), 2079646450);

        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_u32(), 1144304738);
        assert_eq!(rng.next_u32(), 1416247);
    }

    #[test]
    fn test_next_f64_is_unit_interval() {
        let mut rng = Mulberry32::new(99);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_default_seed_employees() {
        let state = create_seed(DEFAULT_SEED);
        assert_eq!(state.employees.len(), 12);

        let first = &state.employees[0];
        assert_eq!(first.id, "emp-1");
        assert_eq!(first.full_name(), "Zoe Wilson");
        assert_eq!(first.email, "zoe.wilson@company.com");
        assert_eq!(first.phone, "+1-555-1001");
        assert_eq!(first.department, "Operations");
        assert_eq!(first.role, "Financial Analyst");
        assert_eq!(first.hire_date, date(2021, 5, 3));
        assert_eq!(first.base_salary, Money::new(dec!(103648)));
        assert_eq!(first.bank_name.as_deref(), Some("Metro Bank"));
        assert_eq!(first.bank_account_no.as_deref(), Some("****5139"));

        let last = &state.employees[11];
        assert_eq!(last.full_name(), "David Johnson");
        assert_eq!(last.role, "DevOps Engineer");
        assert_eq!(last.hire_date, date(2018, 8, 17));
        assert_eq!(last.base_salary, Money::new(dec!(54968)));
        assert_eq!(last.bank_account_no.as_deref(), Some("****3539"));
    }

    #[test]
    fn test_default_seed_runs_and_payslips() {
        let state = create_seed(DEFAULT_SEED);
        assert_eq!(state.payroll_runs.len(), 3);
        assert_eq!(state.payroll_runs[2].status, RunStatus::Draft);
        for run in &state.payroll_runs {
            assert_eq!(run.employee_ids.len(), 10);
            assert_eq!(run.employee_ids[0], "emp-1");
            assert_eq!(run.employee_ids[9], "emp-10");
        }

        assert_eq!(state.payslips.len(), 20);
        let slip = &state.payslips[0];
        assert_eq!(slip.id, "payslip-run-1-emp-1");
        assert_eq!(
            slip.earnings,
            vec![
                LineItem::new("Base Salary", Money::new(dec!(8637))),
                LineItem::new("Overtime", Money::new(dec!(925))),
            ]
        );
        assert_eq!(slip.deductions[0], LineItem::new("Tax", Money::new(dec!(1828))));
        assert_eq!(slip.gross_pay, Money::new(dec!(9562)));
        assert_eq!(slip.total_deductions, Money::new(dec!(2028)));
        assert_eq!(slip.net_pay, Money::new(dec!(7534)));

        let slip = &state.payslips[1];
        assert_eq!(slip.earnings.len(), 1);
        assert_eq!(slip.net_pay, Money::new(dec!(6761)));

        let slip = &state.payslips[19];
        assert_eq!(slip.id, "payslip-run-2-emp-10");
        assert_eq!(slip.gross_pay, Money::new(dec!(6542)));
        assert_eq!(slip.total_deductions, Money::new(dec!(1416)));
        assert_eq!(slip.net_pay, Money::new(dec!(5126)));
    }

    #[test]
    fn test_other_seed() {
        let state = create_seed(7);
        let first = &state.employees[0];
        assert_eq!(first.full_name(), "John Smith");
        assert_eq!(first.department, "Finance");
        assert_eq!(first.hire_date, date(2021, 5, 14));
        assert_eq!(first.base_salary, Money::new(dec!(66795)));
        assert_eq!(first.bank_account_no.as_deref(), Some("****3320"));
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(create_seed(42), create_seed(42));
        assert_ne!(create_seed(42), create_seed(43));
    }

    #[test]
    fn test_catalogs() {
        let state = create_seed(DEFAULT_SEED);
        assert_eq!(state.departments.len(), 4);
        assert_eq!(state.roles[9], CatalogEntry::new("role-10", "Finance Manager"));
        assert_eq!(state.earning_types[0].id, "earning-1");
        assert_eq!(state.deduction_types[5].name, "Parking");
        assert!(state.use_local_storage);
    }
}
