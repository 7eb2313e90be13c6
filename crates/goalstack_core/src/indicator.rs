//! Prompt indicator file.
//!
//! # Responsibility
//! - Render the one-line prompt fragment for the current goal.
//! - Overwrite the indicator file on every invocation.
//!
//! # Invariants
//! - Content is `""` with no current goal, otherwise `"[<text>] "`.

use crate::model::goal::Goal;
use crate::store::fs::atomic_write;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Failure to write the indicator file.
#[derive(Debug)]
pub struct IndicatorError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl Display for IndicatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to write prompt indicator {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for IndicatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Prompt fragment for `current`.
pub fn indicator_text(current: Option<&Goal>) -> String {
    match current {
        Some(goal) => format!("[{}] ", goal.text),
        None => String::new(),
    }
}

/// Overwrites the indicator file at `path`.
pub fn write_indicator(path: impl Into<PathBuf>, current: Option<&Goal>) -> Result<(), IndicatorError> {
    let path = path.into();
    let text = indicator_text(current);
    match atomic_write(&path, text.as_bytes()) {
        Ok(()) => {
            info!(
                "event=indicator_write module=indicator status=ok empty={}",
                text.is_empty()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=indicator_write module=indicator status=error error={}",
                source
            );
            Err(IndicatorError { path, source })
        }
    }
}
