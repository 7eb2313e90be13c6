//! Goal store contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the full goal stack.
//! - Keep the on-disk document format inside the store boundary.
//!
//! # Invariants
//! - A missing or blank store is an empty stack, never an error.
//! - Loaded stacks have passed `GoalStack::from_parts` validation.
//! - Corrupt data is reported distinctly from IO failures.
//! - No locking: concurrent invocations race and the last writer wins.

use crate::stack::StackError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod document;
pub(crate) mod fs;
pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::InMemoryGoalStore;

use crate::stack::GoalStack;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from goal store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The persisted document is not valid store JSON.
    Malformed(serde_json::Error),
    /// The document parsed but violates goal stack invariants.
    Integrity(StackError),
    /// The stack could not be rendered to JSON.
    Encode(serde_json::Error),
}

impl StoreError {
    /// Returns whether this error means the persisted data is unusable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Integrity(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "goal store io error at {}: {source}", path.display()),
            Self::Malformed(err) => write!(f, "goal store is corrupt: {err}"),
            Self::Integrity(err) => write!(f, "goal store is corrupt: {err}"),
            Self::Encode(err) => write!(f, "failed to encode goal store: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed(err) => Some(err),
            Self::Integrity(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StackError> for StoreError {
    fn from(value: StackError) -> Self {
        Self::Integrity(value)
    }
}

/// Durable home of a [`GoalStack`].
pub trait GoalStore {
    /// Reads the whole stack.
    fn load(&self) -> StoreResult<GoalStack>;
    /// Replaces the persisted stack with `stack`.
    fn save(&self, stack: &GoalStack) -> StoreResult<()>;
}

impl<S: GoalStore + ?Sized> GoalStore for &S {
    fn load(&self) -> StoreResult<GoalStack> {
        (**self).load()
    }

    fn save(&self, stack: &GoalStack) -> StoreResult<()> {
        (**self).save(stack)
    }
}
