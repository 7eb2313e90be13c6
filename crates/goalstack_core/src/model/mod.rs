//! Goal domain model.
//!
//! # Responsibility
//! - Define the goal record, its identifier and its timestamp format.
//!
//! # Invariants
//! - Goals are identified by a digest of their creation fields, never by a
//!   counter.
//! - Goals are never deleted; completion is the only state transition.

pub mod goal;
pub mod identity;
pub mod timestamp;
