//! Content-addressed goal identifiers.
//!
//! # Responsibility
//! - Derive a stable identifier from a goal's immutable creation fields.
//!
//! # Invariants
//! - `goal_id` is pure: equal inputs always produce equal identifiers, across
//!   processes and reloads.
//! - Field boundaries are length-prefixed, so `("ab", "c")` and `("a", "bc")`
//!   hash differently.
//! - Collisions are not mitigated; two goals with the same parent, text and
//!   microsecond creation instant share one identifier.

use crate::model::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{Display, Formatter};

/// Hex-encoded SHA-256 digest naming one goal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Short prefix for human-facing output.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(self.0.as_str())
    }
}

impl Display for GoalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GoalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for GoalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Derives the identifier for `(parent, text, created_at)`.
///
/// A root goal hashes an empty parent field.
pub fn goal_id(parent: Option<&GoalId>, text: &str, created_at: &DateTime<Utc>) -> GoalId {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, parent.map(GoalId::as_str).unwrap_or_default());
    update_field(&mut hasher, text);
    update_field(&mut hasher, &timestamp::format(created_at));
    GoalId(hex::encode(hasher.finalize()))
}

fn update_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
