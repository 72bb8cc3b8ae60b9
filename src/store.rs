use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::MetaError;

pub const EXHIBIT_FILENAME: &str = "exhibit.json";

/// Per-sample output layout: one directory per storage path under the
/// output root for patched documents, mirrored under the backup root for
/// unmodified originals.
#[derive(Debug, Clone)]
pub struct OutputStore {
    out_root: Utf8PathBuf,
    backup_root: Utf8PathBuf,
}

impl OutputStore {
    pub fn new(out_root: Utf8PathBuf, backup_root: Utf8PathBuf) -> Self {
        Self {
            out_root,
            backup_root,
        }
    }

    pub fn out_root(&self) -> &Utf8Path {
        &self.out_root
    }

    pub fn backup_root(&self) -> &Utf8Path {
        &self.backup_root
    }

    pub fn patched_path(&self, storage_path: &str) -> Utf8PathBuf {
        self.out_root.join(storage_path).join(EXHIBIT_FILENAME)
    }

    pub fn backup_path(&self, storage_path: &str) -> Utf8PathBuf {
        self.backup_root.join(storage_path).join(EXHIBIT_FILENAME)
    }

    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), MetaError> {
        let parent = path
            .parent()
            .ok_or_else(|| MetaError::Filesystem("invalid destination path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| MetaError::Filesystem(err.to_string()))?;
        let temp = tempfile::Builder::new()
            .prefix("minerva-meta")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| MetaError::Filesystem(err.to_string()))?;
        fs::write(temp.path(), content).map_err(|err| MetaError::Filesystem(err.to_string()))?;
        if path.as_std_path().exists() {
            fs::remove_file(path.as_std_path())
                .map_err(|err| MetaError::Filesystem(err.to_string()))?;
        }
        temp.persist(path.as_std_path())
            .map_err(|err| MetaError::Filesystem(err.to_string()))?;
        Ok(())
    }

    pub fn upload_command(bucket_prefix: &str, storage_path: &str, local: &Utf8Path) -> String {
        format!(
            "aws s3 cp --acl public-read {local} s3://{bucket_prefix}/{storage_path}/{EXHIBIT_FILENAME}"
        )
    }
}
