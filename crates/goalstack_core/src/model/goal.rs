//! Goal domain model.
//!
//! # Responsibility
//! - Define the record stored for every pushed goal.
//! - Own the one-time completion transition.
//!
//! # Invariants
//! - `done == true` iff `completed_at.is_some()`.
//! - `completed_at >= created_at` when set.
//! - `parent`, `text` and `created_at` never change after creation, so
//!   [`Goal::id`] is stable for the goal's lifetime.

use crate::model::identity::{goal_id, GoalId};
use crate::model::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One node of a parent-linked goal chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Back-reference into the goal collection. `None` means root goal.
    pub parent: Option<GoalId>,
    /// Human-readable description.
    pub text: String,
    /// Set once by pop, never reverted.
    pub done: bool,
    /// Creation instant; also an identity input.
    #[serde(with = "timestamp::serde_utc")]
    pub created_at: DateTime<Utc>,
    /// Completion instant, present only when `done`.
    #[serde(with = "timestamp::serde_utc_option")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Goal record invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    DoneWithoutCompletion,
    CompletionWithoutDone,
    CompletedBeforeCreated {
        created_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoneWithoutCompletion => write!(f, "goal is done but has no completed_at"),
            Self::CompletionWithoutDone => write!(f, "goal has completed_at but is not done"),
            Self::CompletedBeforeCreated {
                created_at,
                completed_at,
            } => write!(
                f,
                "completed_at ({}) must be >= created_at ({})",
                timestamp::format(completed_at),
                timestamp::format(created_at)
            ),
        }
    }
}

impl Error for GoalValidationError {}

impl Goal {
    /// Creates an open goal.
    ///
    /// `created_at` is truncated to microseconds so the goal survives a
    /// save/load cycle unchanged.
    pub fn new(parent: Option<GoalId>, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            parent,
            text: text.into(),
            done: false,
            created_at: timestamp::truncate(created_at),
            completed_at: None,
        }
    }

    /// Content-addressed identifier of this goal.
    pub fn id(&self) -> GoalId {
        goal_id(self.parent.as_ref(), &self.text, &self.created_at)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Marks this goal complete at `at`.
    ///
    /// An instant earlier than `created_at` (wall clock stepped back) is
    /// clamped to `created_at`. Sub-microsecond precision is dropped.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.done = true;
        self.completed_at = Some(timestamp::truncate(at).max(self.created_at));
    }

    /// Checks the done/completed_at invariants.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        match (self.done, self.completed_at) {
            (true, None) => Err(GoalValidationError::DoneWithoutCompletion),
            (false, Some(_)) => Err(GoalValidationError::CompletionWithoutDone),
            (true, Some(completed_at)) if completed_at < self.created_at => {
                Err(GoalValidationError::CompletedBeforeCreated {
                    created_at: self.created_at,
                    completed_at,
                })
            }
            _ => Ok(()),
        }
    }
}
