use super::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type EmployeeId = String;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

/// An employee record as kept by the store.
///
/// `department` and `role` are free-text labels; nothing ties them to the
/// catalog entries in `AppState`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    pub hire_date: NaiveDate,
    /// Annual salary.
    pub base_salary: Money,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_no: Option<String>,
}

impl Employee {
    /// `first last`, as shown in exports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Everything but the id, which the store assigns.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub role: String,
    pub hire_date: NaiveDate,
    pub base_salary: Money,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_account_no: Option<String>,
}

impl NewEmployee {
    /// Builds the employee under the given id.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            department: self.department,
            role: self.role,
            hire_date: self.hire_date,
            base_salary: self.base_salary,
            status: self.status,
            bank_name: self.bank_name,
            bank_account_no: self.bank_account_no,
        }
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub base_salary: Option<Money>,
    pub status: Option<EmployeeStatus>,
    pub bank_name: Option<Option<String>>,
    pub bank_account_no: Option<Option<String>>,
}

impl EmployeeUpdate {
    /// Overwrites the fields that are `Some`.
    pub fn apply(self, employee: &mut Employee) {
        if let Some(v) = self.first_name {
            employee.first_name = v;
        }
        if let Some(v) = self.last_name {
            employee.last_name = v;
        }
        if let Some(v) = self.email {
            employee.email = v;
        }
        if let Some(v) = self.phone {
            employee.phone = v;
        }
        if let Some(v) = self.department {
            employee.department = v;
        }
        if let Some(v) = self.role {
            employee.role = v;
        }
        if let Some(v) = self.hire_date {
            employee.hire_date = v;
        }
        if let Some(v) = self.base_salary {
            employee.base_salary = v;
        }
        if let Some(v) = self.status {
            employee.status = v;
        }
        if let Some(v) = self.bank_name {
            employee.bank_name = v;
        }
        if let Some(v) = self.bank_account_no {
            employee.bank_account_no = v;
        }
    }
}
