use crate::error::MetaError;
use crate::keys::{self, Row};

/// Known-bad sample names as entered in the source table.
const SAMPLE_FIXES: &[(&str, &str)] = &[("CCK17-M", "CK17-M")];

/// Derived storage paths whose published convention differs from the
/// auto-derived form.
const STORAGE_OVERRIDES: &[(&str, &str)] = &[("CK19_BCC", "Ck19_BCC"), ("CK22", "Ck22")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleIdentity {
    /// Sample name exactly as read from the row.
    pub raw: String,
    /// Name after typo-fix lookup.
    pub name: String,
    /// Directory/key segment used in the object store.
    pub storage_path: String,
}

impl SampleIdentity {
    pub fn from_row(row: &Row) -> Result<Self, MetaError> {
        let raw = keys::resolve(row, keys::SAMPLE_NAME)?;
        let name = correct_sample_name(&raw);
        let storage_path = to_storage_path(&name);
        Ok(Self {
            raw,
            name,
            storage_path,
        })
    }
}

pub fn correct_sample_name(raw: &str) -> String {
    lookup(SAMPLE_FIXES, raw).unwrap_or(raw).to_string()
}

pub fn to_storage_path(name: &str) -> String {
    let derived = name.replace('-', "_");
    match lookup(STORAGE_OVERRIDES, &derived) {
        Some(overridden) => overridden.to_string(),
        None => derived,
    }
}

fn lookup<'a>(table: &'a [(&str, &str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}
