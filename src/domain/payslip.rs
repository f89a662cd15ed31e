use super::employee::EmployeeId;
use super::money::Money;
use super::payroll_run::RunId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A labelled amount on a payslip. Labels are free text.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LineItem {
    #[serde(rename = "type")]
    pub label: String,
    pub amount: Money,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(label: impl Into<String>, amount: impl Into<Money>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }
}

pub type Earning = LineItem;
pub type Deduction = LineItem;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Earning,
    Deduction,
}

/// Ad-hoc line items for one employee in one run.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Adjustments {
    pub earnings: Vec<Earning>,
    pub deductions: Vec<Deduction>,
}

impl Adjustments {
    /// Files the item under earnings or deductions.
    pub fn push(&mut self, kind: LineKind, item: LineItem) {
        match kind {
            LineKind::Earning => self.earnings.push(item),
            LineKind::Deduction => self.deductions.push(item),
        }
    }

    /// Splits per-employee adjustments into the two maps the engine takes.
    pub fn split(
        adjustments: &HashMap<EmployeeId, Adjustments>,
    ) -> (
        HashMap<EmployeeId, Vec<Earning>>,
        HashMap<EmployeeId, Vec<Deduction>>,
    ) {
        let earnings = adjustments
            .iter()
            .map(|(id, adj)| (id.clone(), adj.earnings.clone()))
            .collect();
        let deductions = adjustments
            .iter()
            .map(|(id, adj)| (id.clone(), adj.deductions.clone()))
            .collect();
        (earnings, deductions)
    }
}

/// The three totals every payslip carries.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayTotals {
    pub gross_pay: Money,
    pub total_deductions: Money,
    pub net_pay: Money,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub id: String,
    pub payroll_run_id: RunId,
    pub employee_id: EmployeeId,
    pub earnings: Vec<Earning>,
    pub deductions: Vec<Deduction>,
    pub gross_pay: Money,
    pub total_deductions: Money,
    pub net_pay: Money,
}

impl Payslip {
    /// `payslip-{run}-{employee}`, unique within a run.
    pub fn id_for(run_id: &str, employee_id: &str) -> String {
        format!("payslip-{run_id}-{employee_id}")
    }

    /// Sum of the itemized earnings, base salary excluded.
    pub fn earnings_total(&self) -> Money {
        self.earnings.iter().map(|e| e.amount).sum()
    }

    /// Sum of the itemized deductions, tax and pension excluded.
    pub fn other_deductions_total(&self) -> Money {
        self.deductions.iter().map(|d| d.amount).sum()
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayslipUpdate {
    pub earnings: Option<Vec<Earning>>,
    pub deductions: Option<Vec<Deduction>>,
    pub gross_pay: Option<Money>,
    pub total_deductions: Option<Money>,
    pub net_pay: Option<Money>,
}

impl PayslipUpdate {
    /// Overwrites the fields that are `Some`. Totals are not recomputed.
    pub fn apply(self, payslip: &mut Payslip) {
        if let Some(v) = self.earnings {
            payslip.earnings = v;
        }
        if let Some(v) = self.deductions {
            payslip.deductions = v;
        }
        if let Some(v) = self.gross_pay {
            payslip.gross_pay = v;
        }
        if let Some(v) = self.total_deductions {
            payslip.total_deductions = v;
        }
        if let Some(v) = self.net_pay {
            payslip.net_pay = v;
        }
    }
}
