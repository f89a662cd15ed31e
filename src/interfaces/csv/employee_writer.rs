use super::{into_inner, quoted_writer, without_final_newline};
use crate::domain::employee::Employee;
use crate::error::Result;
use std::io::Write;

pub const EMPLOYEE_HEADERS: [&str; 10] = [
    "Name",
    "Email",
    "Phone",
    "Department",
    "Role",
    "Hire Date",
    "Base Salary",
    "Status",
    "Bank Name",
    "Account No",
];

/// Writes the employee directory export.
pub struct EmployeeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EmployeeWriter<W> {
    /// Creates a new `EmployeeWriter` writing to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            writer: quoted_writer(sink),
        }
    }

    /// Writes the header followed by one row per employee.
    pub fn write_employees<'a, I>(&mut self, employees: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        self.writer.write_record(EMPLOYEE_HEADERS)?;
        for employee in employees {
            self.writer.write_record([
                employee.full_name(),
                employee.email.clone(),
                employee.phone.clone(),
                employee.department.clone(),
                employee.role.clone(),
                employee.hire_date.to_string(),
                employee.base_salary.to_string(),
                employee.status.as_str().to_string(),
                employee.bank_name.clone().unwrap_or_default(),
                employee.bank_account_no.clone().unwrap_or_default(),
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
pub fn export_employees_csv(employees: &[Employee]) -> Result<String> {
    let mut writer = EmployeeWriter::new(Vec::new());
    writer.write_employees(employees)?;
    Ok(without_final_newline(writer.into_inner()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeStatus;
    use crate::domain::employee::fixtures::employee;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_export_quotes_every_field() {
        let mut ada = employee("emp-1", Money::new(dec!(60000.00)));
        ada.bank_name = Some("City Bank".to_string());
        ada.bank_account_no = Some("****1234".to_string());
        let mut bob = employee("emp-2", Money::new(dec!(51533.5)));
        bob.first_name = "Bob".to_string();
        bob.status = EmployeeStatus::Inactive;

        let csv = export_employees_csv(&[ada, bob]).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(
            lines[0],
            r#""Name","Email","Phone","Department","Role","Hire Date","Base Salary","Status","Bank Name","Account No""#
        );
        assert_eq!(
            lines[1],
            r#""Ada Lovelace","ada.lovelace@company.com","+1-555-1001","Engineering","Tech Lead","2020-01-15","60000","Active","City Bank","****1234""#
        );
        assert_eq!(
            lines[2],
            r#""Bob Lovelace","ada.lovelace@company.com","+1-555-1001","Engineering","Tech Lead","2020-01-15","51533.5","Inactive","","""#
        );
        assert_eq!(lines.len(), 3);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_export_with_no_employees_is_header_only() {
        let csv = export_employees_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with(r#""Name","Email""#));
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let mut e = employee("emp-1", Money::new(dec!(1)));
        e.role = r#"The "Boss""#.to_string();
        let csv = export_employees_csv(&[e]).unwrap();
        assert!(csv.contains(r#""The ""Boss""""#));
    }
}
