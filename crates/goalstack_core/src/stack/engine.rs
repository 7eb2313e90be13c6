//! In-memory goal stack state machine.
//!
//! # Responsibility
//! - Hold the goal collection and the current pointer.
//! - Implement push/pop over that state without touching storage.
//!
//! # Invariants
//! - Every non-root goal's parent is a key of the collection.
//! - Every key equals the recomputed identity of its goal.
//! - `current`, when set, names an open goal whose ancestors are all open.
//! - Operations either fully apply or leave the state untouched.

use crate::model::goal::{Goal, GoalValidationError};
use crate::model::identity::GoalId;
use crate::model::timestamp;
use chrono::{DateTime, Utc};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Data-integrity failures detected in a goal stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// A referenced goal id is absent from the collection.
    MissingGoal(GoalId),
    /// A goal points to a parent that is absent from the collection.
    MissingParent { goal: GoalId, parent: GoalId },
    /// Stored key does not match the goal's recomputed identity.
    IdentityMismatch { key: GoalId, computed: GoalId },
    /// Goal record violates done/completion invariants.
    InvalidGoal {
        goal: GoalId,
        source: GoalValidationError,
    },
    /// The current pointer names a completed goal.
    CurrentCompleted(GoalId),
    /// A goal above the current one on the active chain is completed.
    CompletedAncestor { current: GoalId, ancestor: GoalId },
    /// Following parents loops back to an already visited goal.
    CycleDetected(GoalId),
}

impl Display for StackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGoal(id) => write!(f, "goal not found: {id}"),
            Self::MissingParent { goal, parent } => {
                write!(f, "goal {goal} references missing parent {parent}")
            }
            Self::IdentityMismatch { key, computed } => {
                write!(f, "goal stored as {key} hashes to {computed}")
            }
            Self::InvalidGoal { goal, source } => write!(f, "invalid goal {goal}: {source}"),
            Self::CurrentCompleted(id) => write!(f, "current goal {id} is already done"),
            Self::CompletedAncestor { current, ancestor } => write!(
                f,
                "goal {ancestor} above current goal {current} is already done"
            ),
            Self::CycleDetected(id) => write!(f, "parent chain loops at goal {id}"),
        }
    }
}

impl Error for StackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGoal { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type StackResult<T> = Result<T, StackError>;

/// Goal collection plus the pointer to the goal on top of the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalStack {
    goals: BTreeMap<GoalId, Goal>,
    current: Option<GoalId>,
}

impl GoalStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stack from untrusted parts, checking every invariant.
    ///
    /// # Errors
    /// - Any [`StackError`] variant describing the first violation found.
    pub fn from_parts(
        goals: BTreeMap<GoalId, Goal>,
        current: Option<GoalId>,
    ) -> StackResult<Self> {
        for (key, goal) in &goals {
            goal.validate().map_err(|source| StackError::InvalidGoal {
                goal: key.clone(),
                source,
            })?;

            let computed = goal.id();
            if &computed != key {
                return Err(StackError::IdentityMismatch {
                    key: key.clone(),
                    computed,
                });
            }

            if let Some(parent) = &goal.parent {
                if !goals.contains_key(parent) {
                    return Err(StackError::MissingParent {
                        goal: key.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        let stack = Self { goals, current };
        if let Some(current) = &stack.current {
            let chain = stack.chain_from(current)?;
            let (_, top) = chain[0];
            if top.done {
                return Err(StackError::CurrentCompleted(current.clone()));
            }
            if let Some((ancestor, _)) = chain.iter().skip(1).find(|(_, goal)| goal.done) {
                return Err(StackError::CompletedAncestor {
                    current: current.clone(),
                    ancestor: (*ancestor).clone(),
                });
            }
        }

        Ok(stack)
    }

    /// Splits the stack into its collection and current pointer.
    pub fn into_parts(self) -> (BTreeMap<GoalId, Goal>, Option<GoalId>) {
        (self.goals, self.current)
    }

    pub fn goals(&self) -> &BTreeMap<GoalId, Goal> {
        &self.goals
    }

    pub fn get(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.get(id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn current_id(&self) -> Option<&GoalId> {
        self.current.as_ref()
    }

    /// Resolves the current pointer.
    ///
    /// # Errors
    /// - [`StackError::MissingGoal`] when the pointer names no goal.
    pub fn current_goal(&self) -> StackResult<Option<&Goal>> {
        match &self.current {
            Some(id) => self.lookup(id).map(Some),
            None => Ok(None),
        }
    }

    /// Number of goals on the active chain (current up to its root).
    pub fn depth(&self) -> StackResult<usize> {
        Ok(self.active_chain()?.len())
    }

    /// Goals from current up to the root, current first.
    ///
    /// Empty when there is no current goal.
    pub fn active_chain(&self) -> StackResult<Vec<(&GoalId, &Goal)>> {
        match &self.current {
            Some(current) => self.chain_from(current),
            None => Ok(Vec::new()),
        }
    }

    /// Pushes a goal created now as a child of the current goal.
    pub fn push(&mut self, text: impl Into<String>) -> &Goal {
        self.push_at(text, timestamp::now())
    }

    /// Pushes a goal with an explicit creation instant, truncated to
    /// microseconds.
    ///
    /// The new goal becomes current. An identical `(parent, text, instant)`
    /// triple replaces the earlier entry under the same identifier.
    pub fn push_at(&mut self, text: impl Into<String>, created_at: DateTime<Utc>) -> &Goal {
        let goal = Goal::new(self.current.clone(), text, created_at);
        let id = goal.id();
        self.current = Some(id.clone());
        match self.goals.entry(id) {
            Entry::Vacant(entry) => entry.insert(goal),
            Entry::Occupied(mut entry) => {
                entry.insert(goal);
                entry.into_mut()
            }
        }
    }

    /// Completes the current goal now and moves to its parent.
    pub fn pop(&mut self) -> StackResult<Option<&Goal>> {
        self.pop_at(timestamp::now())
    }

    /// Completes the current goal at `completed_at` and moves to its parent.
    ///
    /// Popping an empty stack is a no-op that returns `Ok(None)`.
    ///
    /// # Errors
    /// - [`StackError::MissingGoal`] when current is dangling.
    /// - [`StackError::MissingParent`] when current's parent is dangling.
    ///
    /// On error the stack is left unchanged.
    pub fn pop_at(&mut self, completed_at: DateTime<Utc>) -> StackResult<Option<&Goal>> {
        let Some(current_id) = self.current.clone() else {
            return Ok(None);
        };

        let parent = self.lookup(&current_id)?.parent.clone();
        if let Some(parent) = &parent {
            if !self.goals.contains_key(parent) {
                return Err(StackError::MissingParent {
                    goal: current_id,
                    parent: parent.clone(),
                });
            }
        }

        if let Some(goal) = self.goals.get_mut(&current_id) {
            goal.complete(completed_at);
        }
        self.current = parent;
        self.current_goal()
    }

    fn lookup(&self, id: &GoalId) -> StackResult<&Goal> {
        self.goals
            .get(id)
            .ok_or_else(|| StackError::MissingGoal(id.clone()))
    }

    fn chain_from<'a>(&'a self, start: &GoalId) -> StackResult<Vec<(&'a GoalId, &'a Goal)>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut cursor = Some(start.clone());

        while let Some(id) = cursor {
            if !visited.insert(id.clone()) {
                return Err(StackError::CycleDetected(id));
            }
            let (key, goal) = self
                .goals
                .get_key_value(&id)
                .ok_or_else(|| StackError::MissingGoal(id.clone()))?;
            chain.push((key, goal));
            cursor = goal.parent.clone();
        }

        Ok(chain)
    }
}
