//! Goal stack engine and status view.
//!
//! # Responsibility
//! - Mutate the in-memory `(collection, current)` pair via push/pop.
//! - Render the active chain for display.
//!
//! # Invariants
//! - Nothing in this module performs IO; persistence belongs to `store`.

pub mod engine;
pub mod status;

pub use engine::{GoalStack, StackError, StackResult};
pub use status::{render, EMPTY_STACK_MESSAGE};
