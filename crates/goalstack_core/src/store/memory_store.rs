//! In-memory goal store.
//!
//! Keeps the encoded document text rather than the live stack, so loads and
//! saves exercise the same encode/decode path as the file store.

use crate::stack::GoalStack;
use crate::store::document::{decode, encode};
use crate::store::{GoalStore, StoreResult};
use std::cell::RefCell;

/// Goal store backed by a string buffer.
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    document: RefCell<String>,
}

impl InMemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw document text.
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(text.into()),
        }
    }

    /// Returns the currently stored document text.
    pub fn document(&self) -> String {
        self.document.borrow().clone()
    }
}

impl GoalStore for InMemoryGoalStore {
    fn load(&self) -> StoreResult<GoalStack> {
        decode(&self.document.borrow())
    }

    fn save(&self, stack: &GoalStack) -> StoreResult<()> {
        let text = encode(stack)?;
        self.document.replace(text);
        Ok(())
    }
}
