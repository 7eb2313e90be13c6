//! Store document encoding.
//!
//! Wire shape:
//! `{"goals": {<id>: {"parent", "text", "done", "created_at", "completed_at"}}, "current": <id>|null}`

use crate::model::goal::Goal;
use crate::model::identity::GoalId;
use crate::stack::GoalStack;
use crate::store::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct StoreDocument {
    goals: BTreeMap<GoalId, Goal>,
    current: Option<GoalId>,
}

#[derive(Debug, Serialize)]
struct StoreDocumentRef<'a> {
    goals: &'a BTreeMap<GoalId, Goal>,
    current: Option<&'a GoalId>,
}

/// Encodes `stack` as pretty JSON with goals sorted by id.
pub fn encode(stack: &GoalStack) -> StoreResult<String> {
    let document = StoreDocumentRef {
        goals: stack.goals(),
        current: stack.current_id(),
    };
    let mut text = serde_json::to_string_pretty(&document).map_err(StoreError::Encode)?;
    text.push('\n');
    Ok(text)
}

/// Decodes store text; blank input is an empty stack.
///
/// # Errors
/// - [`StoreError::Malformed`] for invalid JSON or missing fields.
/// - [`StoreError::Integrity`] for invariant violations.
pub fn decode(text: &str) -> StoreResult<GoalStack> {
    if text.trim().is_empty() {
        return Ok(GoalStack::new());
    }
    let document: StoreDocument = serde_json::from_str(text).map_err(StoreError::Malformed)?;
    Ok(GoalStack::from_parts(document.goals, document.current)?)
}
