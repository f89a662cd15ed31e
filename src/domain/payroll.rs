//! Payroll arithmetic.
//!
//! Pure functions: no state, no I/O and no error cases. Whatever the inputs,
//! including negative salaries or deductions larger than gross pay, the result
//! is what the arithmetic produces. Flagging anomalies such as a negative net
//! pay is left to the caller.

use super::employee::{Employee, EmployeeId};
use super::money::Money;
use super::payslip::{Deduction, Earning, LineItem, PayTotals, Payslip};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Flat income tax, applied to gross pay.
pub const TAX_RATE: Decimal = dec!(0.10);
/// Flat pension contribution, applied to base salary.
pub const PENSION_RATE: Decimal = dec!(0.08);

fn line_total(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.amount).sum()
}

/// Base salary plus every earning. Not rounded.
pub fn calc_gross(base_salary: Money, earnings: &[Earning]) -> Money {
    base_salary + line_total(earnings)
}

pub fn calc_tax(gross_pay: Money) -> Money {
    (gross_pay * TAX_RATE).round_cents()
}

/// Pension is taken from base salary, not gross.
pub fn calc_pension(base_salary: Money) -> Money {
    (base_salary * PENSION_RATE).round_cents()
}

/// Computes the payslip totals for one employee.
///
/// Tax and pension are each rounded to cents from the unrounded gross and base.
/// Net pay is derived from the unrounded gross and unrounded deduction sum,
/// and all three totals are rounded independently at the end. Stored payslips
/// depend on this exact order of rounding.
///
/// Sums beyond the `Decimal` range (about 7.9e28) saturate at its bounds.
pub fn calc_totals(base_salary: Money, earnings: &[Earning], deductions: &[Deduction]) -> PayTotals {
    let gross_pay = calc_gross(base_salary, earnings);
    let tax = calc_tax(gross_pay);
    let pension = calc_pension(base_salary);
    let other_deductions = line_total(deductions);

    let total_deductions = tax + pension + other_deductions;
    let net_pay = gross_pay - total_deductions;

    PayTotals {
        gross_pay: gross_pay.round_cents(),
        total_deductions: total_deductions.round_cents(),
        net_pay: net_pay.round_cents(),
    }
}

/// Builds one payslip per employee, in input order.
///
/// Employees missing from either map get an empty list for it. Calling this
/// twice with the same arguments yields equal payslips.
pub fn generate_payslips_for_run(
    run_id: &str,
    employees: &[Employee],
    earnings_by_employee: &HashMap<EmployeeId, Vec<Earning>>,
    deductions_by_employee: &HashMap<EmployeeId, Vec<Deduction>>,
) -> Vec<Payslip> {
    employees
        .iter()
        .map(|employee| {
            let earnings = earnings_by_employee
                .get(&employee.id)
                .cloned()
                .unwrap_or_default();
            let deductions = deductions_by_employee
                .get(&employee.id)
                .cloned()
                .unwrap_or_default();

            let totals = calc_totals(employee.base_salary, &earnings, &deductions);

            Payslip {
                id: Payslip::id_for(run_id, &employee.id),
                payroll_run_id: run_id.to_string(),
                employee_id: employee.id.clone(),
                earnings,
                deductions,
                gross_pay: totals.gross_pay,
                total_deductions: totals.total_deductions,
                net_pay: totals.net_pay,
            }
        })
        .collect()
}
