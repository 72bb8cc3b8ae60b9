use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::MetaError;

pub const DEFAULT_CITATION: &str = "Gray GK, Li CM-C, Rosenbluth JM, et al.,  Developmental Cell, 2022. DOI: 10.1016/j.devcel.2022.05.003.";

const DEFAULT_OUT_DIR: &str = "exhibits";
const DEFAULT_BACKUP_DIR: &str = "exhibit-backups";

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub links: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub backup_dir: Option<String>,
    #[serde(default)]
    pub bucket_prefix: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
}

/// CLI flags layered over the config file; a set flag wins.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub links: Option<String>,
    pub table: Option<String>,
    pub out_dir: Option<String>,
    pub backup_dir: Option<String>,
    pub bucket_prefix: Option<String>,
    pub citation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub links: Utf8PathBuf,
    pub table: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,
    pub backup_dir: Utf8PathBuf,
    pub bucket_prefix: String,
    pub citation: String,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>, overrides: Overrides) -> Result<ResolvedConfig, MetaError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("minerva-meta.json"),
        };

        let config = if path.is_none() && !config_path.exists() {
            Config::default()
        } else {
            let content = fs::read_to_string(&config_path)
                .map_err(|_| MetaError::ConfigRead(config_path.clone()))?;
            serde_json::from_str(&content)
                .map_err(|err| MetaError::ConfigParse(err.to_string()))?
        };

        Self::resolve_config(config, overrides)
    }

    pub fn resolve_config(
        config: Config,
        overrides: Overrides,
    ) -> Result<ResolvedConfig, MetaError> {
        let links = overrides
            .links
            .or(config.links)
            .ok_or_else(|| MetaError::MissingSetting("links".to_string()))?;
        let table = overrides
            .table
            .or(config.table)
            .ok_or_else(|| MetaError::MissingSetting("table".to_string()))?;
        let bucket_prefix = overrides
            .bucket_prefix
            .or(config.bucket_prefix)
            .ok_or_else(|| MetaError::MissingSetting("bucket_prefix".to_string()))?;

        Ok(ResolvedConfig {
            links: Utf8PathBuf::from(links),
            table: Utf8PathBuf::from(table),
            out_dir: Utf8PathBuf::from(
                overrides
                    .out_dir
                    .or(config.out_dir)
                    .unwrap_or_else(|| DEFAULT_OUT_DIR.to_string()),
            ),
            backup_dir: Utf8PathBuf::from(
                overrides
                    .backup_dir
                    .or(config.backup_dir)
                    .unwrap_or_else(|| DEFAULT_BACKUP_DIR.to_string()),
            ),
            bucket_prefix,
            citation: overrides
                .citation
                .or(config.citation)
                .unwrap_or_else(|| DEFAULT_CITATION.to_string()),
        })
    }
}
