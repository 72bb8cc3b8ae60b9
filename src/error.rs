use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MetaError {
    #[error("row is missing required column: {0}")]
    KeyMissing(String),

    #[error("failed to read sample table: {0}")]
    TableRead(String),

    #[error("failed to parse sample table: {0}")]
    TableParse(String),

    #[error("failed to read exhibit url list: {0}")]
    LinksRead(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("missing required setting: {0}")]
    MissingSetting(String),

    #[error("exhibit request failed: {0}")]
    ExhibitHttp(String),

    #[error("exhibit returned status {status}: {message}")]
    ExhibitStatus { status: u16, message: String },

    #[error("invalid exhibit document at {url}: {message}")]
    ExhibitParse { url: String, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
