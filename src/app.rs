use std::collections::HashMap;
use std::fs;

use camino::Utf8Path;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ResolvedConfig;
use crate::error::MetaError;
use crate::exhibit::{self, ExhibitClient};
use crate::keys::{self, Row};
use crate::links::{self, ExhibitLink};
use crate::record;
use crate::render;
use crate::sample::SampleIdentity;
use crate::store::OutputStore;
use crate::table;

#[derive(Debug, Clone)]
pub struct PatchOptions {
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub items: Vec<PatchItemResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatchItemResult {
    pub sample: String,
    pub storage_path: String,
    pub url: String,
    pub title: String,
    pub action: String,
    pub backup_path: Option<String>,
    pub patched_path: Option<String>,
    pub upload_command: String,
    pub patched_at: String,
}

#[derive(Debug, Clone)]
pub struct SampleMeta {
    pub name: String,
    pub title: String,
    pub markdown: String,
}

/// Parses every row up front, keyed by storage path. Any malformed row
/// fails the whole batch; rows are never silently skipped.
pub fn collect_metas(
    rows: &[Row],
    citation: &str,
) -> Result<HashMap<String, SampleMeta>, MetaError> {
    let mut metas = HashMap::new();
    for row in rows {
        let identity = SampleIdentity::from_row(row)?;
        let parsed = record::parse_row(row, &identity, citation)?;
        let markdown = render::render(&parsed);
        let title = keys::resolve(row, keys::EXHIBIT_TITLE)?;
        metas.insert(
            identity.storage_path.clone(),
            SampleMeta {
                name: identity.name,
                title,
                markdown,
            },
        );
    }
    Ok(metas)
}

/// Renders the markdown block for every row without touching the network.
pub fn preview(table_path: &Utf8Path, citation: &str) -> Result<Vec<(String, String)>, MetaError> {
    let rows = table::read_rows(table_path)?;
    let mut previews = Vec::new();
    for row in &rows {
        let identity = SampleIdentity::from_row(row)?;
        let parsed = record::parse_row(row, &identity, citation)?;
        previews.push((identity.name, render::render(&parsed)));
    }
    Ok(previews)
}

pub struct App<E: ExhibitClient> {
    store: OutputStore,
    exhibit: E,
}

impl<E: ExhibitClient> App<E> {
    pub fn new(store: OutputStore, exhibit: E) -> Self {
        Self { store, exhibit }
    }

    pub fn run(
        &self,
        config: &ResolvedConfig,
        options: PatchOptions,
    ) -> Result<BatchResult, MetaError> {
        let rows = table::read_rows(&config.table)?;
        let metas = collect_metas(&rows, &config.citation)?;
        info!(samples = metas.len(), "parsed sample table");

        let list_text = fs::read_to_string(config.links.as_std_path())
            .map_err(|err| MetaError::LinksRead(format!("{}: {err}", config.links)))?;
        let candidates = links::parse_links(&list_text);

        let mut items = Vec::new();
        for link in &candidates {
            let Some(meta) = metas.get(&link.sample) else {
                debug!(url = %link.url, "no sample table entry for exhibit, skipping");
                continue;
            };
            items.push(self.patch_one(link, meta, config, &options)?);
        }
        info!(
            patched = items.len(),
            candidates = candidates.len(),
            "batch complete"
        );
        Ok(BatchResult { items })
    }

    fn patch_one(
        &self,
        link: &ExhibitLink,
        meta: &SampleMeta,
        config: &ResolvedConfig,
        options: &PatchOptions,
    ) -> Result<PatchItemResult, MetaError> {
        let patched_path = self.store.patched_path(&link.sample);
        let upload_command =
            OutputStore::upload_command(&config.bucket_prefix, &link.sample, &patched_path);

        if options.dry_run {
            return Ok(PatchItemResult {
                sample: meta.name.clone(),
                storage_path: link.sample.clone(),
                url: link.url.clone(),
                title: meta.title.clone(),
                action: "planned".to_string(),
                backup_path: None,
                patched_path: None,
                upload_command,
                patched_at: Utc::now().to_rfc3339(),
            });
        }

        let body = self.exhibit.fetch(&link.url)?;
        let mut doc = exhibit::parse_exhibit(&link.url, &body)?;

        // Backup keeps the fetched body byte-for-byte, before any patching.
        let backup_path = self.store.backup_path(&link.sample);
        OutputStore::write_bytes_atomic(&backup_path, body.as_bytes())?;

        exhibit::patch_exhibit(&link.url, &mut doc, &meta.title, &meta.markdown)?;
        let content = serde_json::to_vec_pretty(&doc)
            .map_err(|err| MetaError::Filesystem(err.to_string()))?;
        OutputStore::write_bytes_atomic(&patched_path, &content)?;
        debug!(sample = %meta.name, path = %patched_path, "patched exhibit written");

        Ok(PatchItemResult {
            sample: meta.name.clone(),
            storage_path: link.sample.clone(),
            url: link.url.clone(),
            title: meta.title.clone(),
            action: "patched".to_string(),
            backup_path: Some(backup_path.to_string()),
            patched_path: Some(patched_path.to_string()),
            upload_command,
            patched_at: Utc::now().to_rfc3339(),
        })
    }
}
