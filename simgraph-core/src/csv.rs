use crate::error::Result;
use crate::model::TopEntry;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const CSV_EXTENSION: &str = "csv";

/// One `name;degree` line per entry, no header.
///
/// Names are written verbatim: a `;` inside a name shifts the columns of
/// that row.
pub fn serialize_csv(rows: &[TopEntry]) -> String {
    rows.iter()
        .map(|row| format!("{};{}\n", row.name, row.degree_input))
        .collect()
}

pub fn write_csv(path: &Path, rows: &[TopEntry]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serialize_csv(rows).as_bytes())?;
    Ok(())
}
