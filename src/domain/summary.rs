//! Headline figures for the payroll overview.

use super::employee::{EmployeeId, EmployeeStatus};
use super::money::Money;
use super::payroll_run::{PayrollRun, RunId, RunStatus};
use super::state::AppState;
use chrono::NaiveDate;

const RECENT_RUNS: usize = 3;
const RECENT_HIRES: usize = 2;
const RECENT_ACTIVITY: usize = 5;

/// An entry in the recent activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    PayrollRun {
        id: RunId,
        status: RunStatus,
        period_start: NaiveDate,
        period_end: NaiveDate,
        pay_date: NaiveDate,
    },
    EmployeeAdded {
        id: EmployeeId,
        name: String,
        department: String,
        status: EmployeeStatus,
        hire_date: NaiveDate,
    },
}

impl Activity {
    /// Pay date for runs, hire date for employees.
    pub fn date(&self) -> NaiveDate {
        match self {
            Activity::PayrollRun { pay_date, .. } => *pay_date,
            Activity::EmployeeAdded { hire_date, .. } => *hire_date,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Activity::PayrollRun { id, .. } | Activity::EmployeeAdded { id, .. } => id,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Activity::PayrollRun { status, .. } => status.as_str(),
            Activity::EmployeeAdded { status, .. } => status.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub active_employees: usize,
    pub inactive_employees: usize,
    pub draft_runs: usize,
    /// The processed run with the latest pay date.
    pub last_processed_run: Option<PayrollRun>,
    /// Net pay over the last processed run's payslips, zero without one.
    pub last_run_total: Money,
    /// Earliest pay date strictly after `today`, over all runs.
    pub next_pay_date: Option<NaiveDate>,
    /// The last three runs and last two employees on file, newest date
    /// first, at most five.
    pub recent_activity: Vec<Activity>,
}

impl AppState {
    /// Summarizes the state as of `today`.
    ///
    /// Ties keep stored order: among processed runs sharing the latest pay
    /// date the first one wins, and activity entries with equal dates stay
    /// runs before employees.
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        let active_employees = self.active_employees().count();

        let last_processed_run = self
            .payroll_runs
            .iter()
            .filter(|r| r.is_processed())
            .reduce(|latest, run| if run.pay_date > latest.pay_date { run } else { latest })
            .cloned();
        let last_run_total = last_processed_run
            .as_ref()
            .map(|run| self.payslips_for_run(&run.id).map(|p| p.net_pay).sum::<Money>())
            .unwrap_or(Money::ZERO);

        let next_pay_date = self
            .payroll_runs
            .iter()
            .map(|r| r.pay_date)
            .filter(|date| *date > today)
            .min();

        let runs = &self.payroll_runs[self.payroll_runs.len().saturating_sub(RECENT_RUNS)..];
        let hires = &self.employees[self.employees.len().saturating_sub(RECENT_HIRES)..];
        let mut recent_activity: Vec<Activity> = runs
            .iter()
            .map(|run| Activity::PayrollRun {
                id: run.id.clone(),
                status: run.status,
                period_start: run.period_start,
                period_end: run.period_end,
                pay_date: run.pay_date,
            })
            .chain(hires.iter().map(|e| Activity::EmployeeAdded {
                id: e.id.clone(),
                name: e.full_name(),
                department: e.department.clone(),
                status: e.status,
                hire_date: e.hire_date,
            }))
            .collect();
        recent_activity.sort_by(|a, b| b.date().cmp(&a.date()));
        recent_activity.truncate(RECENT_ACTIVITY);

        DashboardSummary {
            active_employees,
            inactive_employees: self.employees.len() - active_employees,
            draft_runs: self
                .payroll_runs
                .iter()
                .filter(|r| r.status == RunStatus::Draft)
                .count(),
            last_processed_run,
            last_run_total,
            next_pay_date,
            recent_activity,
        }
    }
}
