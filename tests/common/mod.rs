use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes an adjustments file from `(employee, kind, type, amount)` rows.
pub fn adjustments_file(rows: &[(&str, &str, &str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "employee, kind, type, amount")?;
    for (employee, kind, label, amount) in rows {
        writeln!(file, "{employee}, {kind}, {label}, {amount}")?;
    }
    file.flush()?;
    Ok(file)
}
