use crate::domain::employee::EmployeeId;
use crate::domain::money::Money;
use crate::domain::payslip::{Adjustments, LineItem, LineKind};
use crate::error::{PayrollError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// One row of an adjustments file: `employee,kind,type,amount`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct AdjustmentRecord {
    pub employee: EmployeeId,
    pub kind: LineKind,
    #[serde(rename = "type")]
    pub label: String,
    pub amount: Money,
}

/// Reads per-employee earnings and deductions from a CSV source.
///
/// Whitespace around fields is trimmed. Each row is deserialized on its own,
/// so one malformed row does not stop the rest from being read.
pub struct AdjustmentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AdjustmentReader<R> {
    /// Creates a new `AdjustmentReader` over a headed CSV source.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator over the rows, one `Result` per row.
    pub fn records(self) -> impl Iterator<Item = Result<AdjustmentRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayrollError::from))
    }
}

/// Groups records by employee, keeping file order within each list.
pub fn group_adjustments<I>(records: I) -> HashMap<EmployeeId, Adjustments>
where
    I: IntoIterator<Item = AdjustmentRecord>,
{
    let mut grouped: HashMap<EmployeeId, Adjustments> = HashMap::new();
    for record in records {
        grouped
            .entry(record.employee)
            .or_default()
            .push(record.kind, LineItem::new(record.label, record.amount));
    }
    grouped
}
