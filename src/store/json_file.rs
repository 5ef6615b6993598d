use crate::error::{ImportanceError, Result};
use crate::store::IssueStore;
use crate::types::event::ScoreUpdateCommand;
use fs2::FileExt;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const SCORE_FIELD: &str = "importance_score";

/// Document store backed by a single JSON file laid out as
/// `{ "<collection>": { "<issue_id>": { ...fields } } }`.
///
/// Writers serialize on an exclusive lock held on a `<file>.lock` sidecar for
/// the whole read-modify-write, so updates to different issues never clobber
/// each other.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    collection: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, collection: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            collection: collection.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_root(&self) -> Result<Value> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        serde_json::from_str(&raw).map_err(|e| self.unavailable(e))
    }

    fn write_root(&self, root: &Value) -> Result<()> {
        let rendered = serde_json::to_string_pretty(root)?;
        let mut staging =
            NamedTempFile::new_in(self.parent_dir()).map_err(|e| self.unavailable(e))?;
        staging
            .write_all(rendered.as_bytes())
            .map_err(|e| self.unavailable(e))?;
        staging
            .persist(&self.path)
            .map_err(|e| self.unavailable(e.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".lock");
        self.parent_dir().join(name)
    }

    /// Blocks until this process holds the store's write lock.
    ///
    /// The lock is released when the returned file is dropped.
    fn acquire_lock(&self) -> Result<File> {
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(|e| self.unavailable(e))?;
        FileExt::lock_exclusive(&lock_file).map_err(|e| self.unavailable(e))?;
        Ok(lock_file)
    }

    fn document_mut<'a>(
        &self,
        root: &'a mut Value,
        issue_id: &str,
    ) -> Result<&'a mut Map<String, Value>> {
        let collection = root
            .get_mut(&self.collection)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                ImportanceError::StoreUnavailable(format!(
                    "{}: collection `{}` not found",
                    self.path.display(),
                    self.collection
                ))
            })?;
        collection
            .get_mut(issue_id)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                ImportanceError::StoreUnavailable(format!(
                    "{}: document `{}/{}` not found",
                    self.path.display(),
                    self.collection,
                    issue_id
                ))
            })
    }

    fn unavailable(&self, cause: impl std::fmt::Display) -> ImportanceError {
        ImportanceError::StoreUnavailable(format!("{}: {}", self.path.display(), cause))
    }
}

impl IssueStore for JsonFileStore {
    fn update_importance(&mut self, command: &ScoreUpdateCommand) -> Result<()> {
        let _lock = self.acquire_lock()?;
        let mut root = self.read_root()?;
        let document = self.document_mut(&mut root, &command.issue_id)?;
        document.insert(SCORE_FIELD.to_string(), Value::from(command.importance_score));
        self.write_root(&root)?;
        tracing::debug!(
            store = %self.path.display(),
            collection = %self.collection,
            issue_id = %command.issue_id,
            "importance score persisted"
        );
        Ok(())
    }
}
