use super::employee::EmployeeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum RunStatus {
    #[default]
    Draft,
    Processed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Draft => "Draft",
            RunStatus::Processed => "Processed",
        }
    }
}

/// A pay cycle over a set of employees.
///
/// `period_start <= period_end <= pay_date` is expected but not enforced here;
/// the draft builder gates it before processing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRun {
    pub id: RunId,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub pay_date: NaiveDate,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub employee_ids: Vec<EmployeeId>,
}

impl PayrollRun {
    pub fn is_processed(&self) -> bool {
        self.status == RunStatus::Processed
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPayrollRun {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub pay_date: NaiveDate,
    pub status: RunStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub employee_ids: Vec<EmployeeId>,
}

impl NewPayrollRun {
    /// Builds the run under the given id.
    pub fn into_run(self, id: RunId) -> PayrollRun {
        PayrollRun {
            id,
            period_start: self.period_start,
            period_end: self.period_end,
            pay_date: self.pay_date,
            status: self.status,
            notes: self.notes,
            employee_ids: self.employee_ids,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRunUpdate {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub pay_date: Option<NaiveDate>,
    pub status: Option<RunStatus>,
    pub notes: Option<Option<String>>,
    pub employee_ids: Option<Vec<EmployeeId>>,
}

impl PayrollRunUpdate {
    /// Overwrites the fields that are `Some`.
    pub fn apply(self, run: &mut PayrollRun) {
        if let Some(v) = self.period_start {
            run.period_start = v;
        }
        if let Some(v) = self.period_end {
            run.period_end = v;
        }
        if let Some(v) = self.pay_date {
            run.pay_date = v;
        }
        if let Some(v) = self.status {
            run.status = v;
        }
        if let Some(v) = self.notes {
            run.notes = v;
        }
        if let Some(v) = self.employee_ids {
            run.employee_ids = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_transition_via_update() {
        let mut run = NewPayrollRun {
            period_start: date(2025, 1, 1),
            period_end: date(2025, 1, 31),
            pay_date: date(2025, 2, 5),
            status: RunStatus::Draft,
            notes: None,
            employee_ids: vec!["emp-1".to_string()],
        }
        .into_run("run-1".to_string());
        assert!(!run.is_processed());

        PayrollRunUpdate {
            status: Some(RunStatus::Processed),
            notes: Some(Some("closed".to_string())),
            ..Default::default()
        }
        .apply(&mut run);

        assert!(run.is_processed());
        assert_eq!(run.notes.as_deref(), Some("closed"));
        assert_eq!(run.employee_ids, vec!["emp-1".to_string()]);
    }

    #[test]
    fn test_run_json_shape() {
        let json = r#"{"id":"run-3","periodStart":"2025-01-01","periodEnd":"2025-01-31",
            "payDate":"2025-02-05","status":"Draft","employeeIds":["emp-1","emp-2"]}"#;
        let run: PayrollRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Draft);
        assert_eq!(run.notes, None);
        assert_eq!(run.employee_ids.len(), 2);
    }
}
