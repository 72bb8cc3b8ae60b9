use std::collections::HashMap;

use crate::error::MetaError;

/// One spreadsheet row: source column name to raw cell value.
pub type Row = HashMap<String, String>;

pub const SAMPLE_NAME: &str = "Sample Name";
pub const EXHIBIT_TITLE: &str = "Minerva Title";
pub const BRCA1_MUTANT: &str = "BRCA1-mutant";
pub const BRCA2_MUTANT: &str = "BRCA2-mutant";

/// Canonical key to the column name actually found in the source table.
/// Keys absent from this table pass through unchanged.
const KEY_MAP: &[(&str, &str)] = &[
    ("Drinks Per Week", "Drinks Per Week Current Age"),
    ("Sample Name", "Sampe Name"),
    ("BRCA1-mutant", "BRCA1"),
    ("BRCA2-mutant", "BRCA2"),
];

/// Free-text survey responses sometimes carry this phrase alongside other
/// text; any cell containing it is treated as blank.
const UNKNOWN_SENTINEL: &str = "don't know";

pub fn source_column(key: &str) -> &str {
    KEY_MAP
        .iter()
        .find(|(canonical, _)| *canonical == key)
        .map(|(_, column)| *column)
        .unwrap_or(key)
}

pub fn resolve(row: &Row, key: &str) -> Result<String, MetaError> {
    let column = source_column(key);
    let value = row
        .get(column)
        .ok_or_else(|| MetaError::KeyMissing(column.to_string()))?;
    if value.contains(UNKNOWN_SENTINEL) {
        return Ok(String::new());
    }
    Ok(value.clone())
}

pub fn is_not_applicable(row: &Row, key: &str) -> Result<bool, MetaError> {
    Ok(resolve(row, key)? == "N/A")
}

pub fn is_affirmative(row: &Row, key: &str) -> Result<bool, MetaError> {
    let value = resolve(row, key)?;
    Ok(matches!(value.as_str(), "Yes" | "yes" | "True" | "true"))
}
