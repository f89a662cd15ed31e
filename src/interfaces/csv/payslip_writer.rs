use super::{into_inner, quoted_writer, without_final_newline};
use crate::domain::employee::Employee;
use crate::domain::money::Money;
use crate::domain::payroll::{PENSION_RATE, TAX_RATE};
use crate::domain::payslip::Payslip;
use crate::error::Result;
use std::io::Write;

pub const PAYSLIP_HEADERS: [&str; 9] = [
    "Employee",
    "Base Salary",
    "Earnings Total",
    "Gross Pay",
    "Tax",
    "Pension",
    "Other Deductions",
    "Total Deductions",
    "Net Pay",
];

fn two_places(amount: Money) -> String {
    format!("{:.2}", amount.round_cents().value())
}

/// Writes the payslip export.
///
/// Tax and pension are not stored on payslips, so they are re-derived for the
/// report: tax from the stored gross pay and pension from the employee's
/// current base salary (zero when the employee no longer exists).
pub struct PayslipWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayslipWriter<W> {
    /// Creates a new `PayslipWriter` writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            writer: quoted_writer(sink),
        }
    }

    /// Writes the header and one row per payslip, looking names up in `employees`.
    pub fn write_payslips<'a, I>(&mut self, payslips: I, employees: &[Employee]) -> Result<()>
    where
        I: IntoIterator<Item = &'a Payslip>,
    {
        self.writer.write_record(PAYSLIP_HEADERS)?;
        for slip in payslips {
            let employee = employees.iter().find(|e| e.id == slip.employee_id);
            let tax = slip.gross_pay * TAX_RATE;
            let pension = employee.map_or(Money::ZERO, |e| e.base_salary * PENSION_RATE);

            self.writer.write_record([
                employee.map_or_else(|| "Unknown".to_string(), Employee::full_name),
                employee.map_or_else(|| "0".to_string(), |e| e.base_salary.to_string()),
                slip.earnings_total().to_string(),
                slip.gross_pay.to_string(),
                two_places(tax),
                two_places(pension),
                slip.other_deductions_total().to_string(),
                slip.total_deductions.to_string(),
                slip.net_pay.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        into_inner(self.writer)
    }
}

/// The export as a string, without a trailing newline.
pub fn export_payslips_csv(payslips: &[Payslip], employees: &[Employee]) -> Result<String> {
    let mut writer = PayslipWriter::new(Vec::new());
    writer.write_payslips(payslips, employees)?;
    Ok(without_final_newline(writer.into_inner()?))
}
