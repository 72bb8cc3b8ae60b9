use std::fs;

use camino::Utf8Path;

use crate::error::MetaError;
use crate::keys::Row;

/// Reads the sample table: UTF-8 with optional byte-order mark, header row
/// defines column names, one data row per sample.
pub fn read_rows(path: &Utf8Path) -> Result<Vec<Row>, MetaError> {
    let content = fs::read_to_string(path.as_std_path())
        .map_err(|err| MetaError::TableRead(format!("{path}: {err}")))?;
    parse_rows(&content)
}

pub fn parse_rows(content: &str) -> Result<Vec<Row>, MetaError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: Row = row.map_err(|err| MetaError::TableParse(err.to_string()))?;
        rows.push(row);
    }
    Ok(rows)
}
