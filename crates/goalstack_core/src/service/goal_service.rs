//! Goal stack use-case service.
//!
//! # Responsibility
//! - Run one load → mutate → save cycle per command.
//!
//! # Invariants
//! - The store is written only after the engine operation fully succeeded.
//! - Popping an empty stack does not rewrite the store.

use crate::stack::{render, GoalStack};
use crate::store::{GoalStore, StoreResult};
use log::info;

/// Use-case facade over a goal store.
pub struct GoalService<S: GoalStore> {
    store: S,
}

impl<S: GoalStore> GoalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the current stack without modifying it.
    pub fn load(&self) -> StoreResult<GoalStack> {
        self.store.load()
    }

    /// Pushes `text` as a child of the current goal and persists.
    ///
    /// Returns the updated stack; its current goal is the new goal.
    pub fn push(&self, text: impl Into<String>) -> StoreResult<GoalStack> {
        let mut stack = self.store.load()?;
        let is_root = stack.push(text).is_root();
        self.store.save(&stack)?;
        info!(
            "event=goal_push module=service status=ok root={} goals={}",
            is_root,
            stack.len()
        );
        Ok(stack)
    }

    /// Completes the current goal and persists.
    ///
    /// Returns the updated stack; its current goal is the popped goal's
    /// parent, or none when the chain is drained.
    pub fn pop(&self) -> StoreResult<GoalStack> {
        let mut stack = self.store.load()?;
        if stack.current_id().is_none() {
            info!("event=goal_pop module=service status=noop reason=empty_stack");
            return Ok(stack);
        }

        let drained = stack.pop()?.is_none();
        self.store.save(&stack)?;
        info!(
            "event=goal_pop module=service status=ok drained={}",
            drained
        );
        Ok(stack)
    }

    /// Renders the active chain of the persisted stack.
    pub fn status(&self) -> StoreResult<String> {
        let stack = self.store.load()?;
        Ok(render(&stack)?)
    }
}
