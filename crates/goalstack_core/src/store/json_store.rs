//! JSON file-backed goal store.
//!
//! # Responsibility
//! - Read and atomically rewrite the per-user goal document.
//!
//! # Invariants
//! - A missing file and an empty file both load as an empty stack.
//! - `save` never truncates the previous document before the new one is
//!   fully written.
//!
//! # See also
//! - `store::document` for the wire shape.

use crate::stack::GoalStack;
use crate::store::document::{decode, encode};
use crate::store::fs::atomic_write;
use crate::store::{GoalStore, StoreError, StoreResult};
use log::{error, info};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Goal store persisted as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty store file when missing.
    ///
    /// Existing content is left untouched.
    pub fn ensure_exists(&self) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;
        }
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                info!("event=store_create module=store status=ok");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn read_text(&self) -> StoreResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl GoalStore for JsonFileStore {
    fn load(&self) -> StoreResult<GoalStack> {
        let started_at = Instant::now();
        match self.read_text().and_then(|text| decode(&text)) {
            Ok(stack) => {
                info!(
                    "event=store_load module=store status=ok goals={} has_current={} duration_ms={}",
                    stack.len(),
                    stack.current_id().is_some(),
                    started_at.elapsed().as_millis()
                );
                Ok(stack)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error corrupt={} duration_ms={} error={}",
                    err.is_corrupt(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, stack: &GoalStack) -> StoreResult<()> {
        let started_at = Instant::now();
        let text = encode(stack)?;
        match atomic_write(&self.path, text.as_bytes()) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok goals={} bytes={} duration_ms={}",
                    stack.len(),
                    text.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(self.io_error(source))
            }
        }
    }
}
