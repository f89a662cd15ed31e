use super::store::{PayrollStore, StoreEvent, new_id};
use crate::domain::employee::{Employee, EmployeeId};
use crate::domain::money::Money;
use crate::domain::payroll::{calc_totals, generate_payslips_for_run};
use crate::domain::payroll_run::{NewPayrollRun, PayrollRun, RunStatus};
use crate::domain::payslip::{Adjustments, LineItem, LineKind, PayTotals, Payslip};
use crate::error::{PayrollError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

/// A payroll run being put together before it is processed.
///
/// Holds the pay period, the ordered employee selection and per-employee
/// adjustments. Nothing here touches the store until `process_draft`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunDraft {
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub pay_date: Option<NaiveDate>,
    pub notes: String,
    employee_ids: Vec<EmployeeId>,
    adjustments: HashMap<EmployeeId, Adjustments>,
}

impl RunDraft {
    /// An empty draft: no dates, no selection, no adjustments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pay period and pay date.
    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate, pay_date: NaiveDate) -> Self {
        self.period_start = Some(start);
        self.period_end = Some(end);
        self.pay_date = Some(pay_date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Selected employees, in the order they were selected.
    pub fn employee_ids(&self) -> &[EmployeeId] {
        &self.employee_ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.employee_ids.iter().any(|e| e == id)
    }

    /// Adds the employee to the selection if absent, removes it otherwise.
    pub fn toggle_employee(&mut self, id: &str) {
        if self.is_selected(id) {
            self.employee_ids.retain(|e| e != id);
        } else {
            self.employee_ids.push(id.to_string());
        }
    }

    /// Adds the employee to the selection unless already there.
    pub fn select(&mut self, id: &str) {
        if !self.is_selected(id) {
            self.employee_ids.push(id.to_string());
        }
    }

    pub fn adjustments_for(&self, id: &str) -> Option<&Adjustments> {
        self.adjustments.get(id)
    }

    /// Replaces one employee's adjustments.
    pub fn set_adjustments(&mut self, id: &str, adjustments: Adjustments) {
        self.adjustments.insert(id.to_string(), adjustments);
    }

    /// Appends line items to whatever each employee already has.
    pub fn extend_adjustments(&mut self, more: HashMap<EmployeeId, Adjustments>) {
        for (id, adj) in more {
            let entry = self.adjustments.entry(id).or_default();
            entry.earnings.extend(adj.earnings);
            entry.deductions.extend(adj.deductions);
        }
    }

    /// Adds the same line item to every selected employee.
    pub fn bulk_add(&mut self, kind: LineKind, label: &str, amount: Money) {
        for id in &self.employee_ids {
            self.adjustments
                .entry(id.clone())
                .or_default()
                .push(kind, LineItem::new(label, amount));
        }
    }

    /// The pay period, when all three dates are set with the period in
    /// order and the pay date on or after the period end.
    fn schedule(&self) -> Result<(NaiveDate, NaiveDate, NaiveDate)> {
        match (self.period_start, self.period_end, self.pay_date) {
            (Some(start), Some(end), Some(pay)) if start <= end && pay >= end => {
                Ok((start, end, pay))
            }
            _ => Err(PayrollError::ValidationError(
                "Pay period must be set with start <= end <= pay date".to_string(),
            )),
        }
    }

    pub fn has_valid_dates(&self) -> bool {
        self.schedule().is_ok()
    }

    pub fn has_valid_selection(&self) -> bool {
        !self.employee_ids.is_empty()
    }

    /// Checks the dates, then the selection. The error names the first failed check.
    pub fn validate(&self) -> Result<()> {
        self.schedule()?;
        if !self.has_valid_selection() {
            return Err(PayrollError::ValidationError(
                "At least one employee must be selected".to_string(),
            ));
        }
        Ok(())
    }

    /// Totals for each selected employee found in `employees`, in selection order.
    pub fn preview(&self, employees: &[Employee]) -> Vec<(EmployeeId, PayTotals)> {
        self.employee_ids
            .iter()
            .filter_map(|id| employees.iter().find(|e| &e.id == id))
            .map(|employee| {
                let adj = self.adjustments.get(&employee.id);
                let totals = calc_totals(
                    employee.base_salary,
                    adj.map(|a| a.earnings.as_slice()).unwrap_or_default(),
                    adj.map(|a| a.deductions.as_slice()).unwrap_or_default(),
                );
                (employee.id.clone(), totals)
            })
            .collect()
    }

    /// Sum of net pay across a preview.
    pub fn grand_total(preview: &[(EmployeeId, PayTotals)]) -> Money {
        preview.iter().map(|(_, totals)| totals.net_pay).sum()
    }
}

fn warn_on_negative_pay(payslips: &[Payslip]) {
    for slip in payslips.iter().filter(|p| p.net_pay.is_negative()) {
        warn!(
            payslip = %slip.id,
            net_pay = %slip.net_pay,
            "Deductions exceed gross pay"
        );
    }
}

impl PayrollStore {
    /// Turns a draft into a processed run with payslips.
    ///
    /// Payslips follow the store's employee order. Selected ids with no
    /// matching employee are kept on the run but produce no payslip. The run
    /// and its payslips are stored together or not at all.
    pub async fn process_draft(&self, draft: &RunDraft) -> Result<(PayrollRun, Vec<Payslip>)> {
        if let Err(e) = draft.validate() {
            warn!("Refusing to process draft: {}", e);
            return Err(e);
        }
        let (period_start, period_end, pay_date) = draft.schedule()?;
        let run = NewPayrollRun {
            period_start,
            period_end,
            pay_date,
            status: RunStatus::Processed,
            notes: (!draft.notes.is_empty()).then(|| draft.notes.clone()),
            employee_ids: draft.employee_ids.clone(),
        }
        .into_run(new_id("run"));
        let (earnings, deductions) = Adjustments::split(&draft.adjustments);

        let (run, payslips) = self
            .apply(|state| {
                let employees: Vec<Employee> = state
                    .employees
                    .iter()
                    .filter(|e| draft.is_selected(&e.id))
                    .cloned()
                    .collect();
                let payslips =
                    generate_payslips_for_run(&run.id, &employees, &earnings, &deductions);

                state.payroll_runs.push(run.clone());
                let count = state.replace_payslips(payslips.clone());
                let events = vec![
                    StoreEvent::PayrollRunAdded(run.id.clone()),
                    StoreEvent::PayslipsAdded { count },
                ];
                Ok(((run, payslips), events))
            })
            .await?;

        warn_on_negative_pay(&payslips);
        info!(run = %run.id, payslips = payslips.len(), "Processed payroll run");
        Ok((run, payslips))
    }

    /// Moves an existing draft run to Processed, generating its payslips.
    ///
    /// The status check, the payslips and the status change happen under one
    /// write lock, so a run is finalized at most once.
    pub async fn finalize_run(
        &self,
        run_id: &str,
        adjustments: &HashMap<EmployeeId, Adjustments>,
    ) -> Result<Vec<Payslip>> {
        let (earnings, deductions) = Adjustments::split(adjustments);

        let payslips = self
            .apply(|state| {
                let run = state
                    .payroll_runs
                    .iter_mut()
                    .find(|r| r.id == run_id)
                    .ok_or_else(|| PayrollError::NotFound {
                        kind: "Payroll run",
                        id: run_id.to_string(),
                    })?;
                if run.is_processed() {
                    return Err(PayrollError::ValidationError(format!(
                        "Payroll run {run_id} is already processed"
                    )));
                }
                run.status = RunStatus::Processed;
                let employee_ids = run.employee_ids.clone();

                let employees: Vec<Employee> = state
                    .employees
                    .iter()
                    .filter(|e| employee_ids.contains(&e.id))
                    .cloned()
                    .collect();
                let payslips =
                    generate_payslips_for_run(run_id, &employees, &earnings, &deductions);

                let count = state.replace_payslips(payslips.clone());
                let events = vec![
                    StoreEvent::PayslipsAdded { count },
                    StoreEvent::PayrollRunUpdated(run_id.to_string()),
                ];
                Ok((payslips, events))
            })
            .await?;

        warn_on_negative_pay(&payslips);
        info!(run = %run_id, payslips = payslips.len(), "Finalized payroll run");
        Ok(payslips)
    }
}
