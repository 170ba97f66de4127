//! YAML-file-backed stores.
//!
//! Each store owns its document for one open/append/write cycle. Loading
//! reports the existing item count and writing reports the new total, both
//! as info-level notifications.
pub mod accounts;
pub mod assignments;
pub mod groups;

pub use accounts::AccountStore;
pub use assignments::AssignmentStore;
pub use groups::GroupStore;

use crate::document::YamlDocument;
use crate::error::StoreError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One store file plus its editable document.
#[derive(Debug)]
pub(crate) struct StoreFile {
    entity: &'static str,
    path: PathBuf,
    document: YamlDocument,
}

impl StoreFile {
    /// Read and parse `path`; any failure is a read error for `entity`.
    pub(crate) fn open(entity: &'static str, path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|err| StoreError::read(entity, path, err))?;
        let document = YamlDocument::parse(&text).map_err(|err| StoreError::read(entity, path, err))?;
        Ok(Self {
            entity,
            path: path.to_path_buf(),
            document,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn document(&self) -> &YamlDocument {
        &self.document
    }

    pub(crate) fn report_loaded(&self, count: usize) {
        tracing::info!(
            "{count} {} loaded from file '{}'",
            self.entity,
            self.path.display()
        );
    }

    /// Append to the in-memory document and return the new item count.
    pub(crate) fn append<T: Serialize>(
        &mut self,
        section: &[&str],
        items: &[T],
    ) -> Result<usize, StoreError> {
        self.document
            .append(section, items)
            .map_err(|err| StoreError::write(self.entity, &self.path, err))
    }

    /// Replace the file on disk with the current document.
    pub(crate) fn write(&self, count: usize) -> Result<(), StoreError> {
        write_atomic(&self.path, self.document.as_str())
            .map_err(|err| StoreError::write(self.entity, &self.path, err))?;
        tracing::info!(
            "{count} {} written to file '{}'",
            self.entity,
            self.path.display()
        );
        Ok(())
    }
}

/// Write through a sibling temp file and rename it over `dest`.
fn write_atomic(dest: &Path, text: &str) -> std::io::Result<()> {
    let file_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("store");
    let tmp_path = dest
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"));
    fs::write(&tmp_path, text.as_bytes())?;
    if let Err(err) = fs::rename(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    /// Write `contents` to `dir/name`, creating parent directories.
    pub(crate) fn write_store(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(&path, contents).expect("write store file");
        path
    }
}
