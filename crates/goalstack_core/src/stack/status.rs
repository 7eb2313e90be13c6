//! Read-only status view of the active goal chain.

use crate::model::goal::Goal;
use crate::stack::engine::{GoalStack, StackResult};
use chrono::{DateTime, Utc};

/// Message rendered when no goal is in progress.
pub const EMPTY_STACK_MESSAGE: &str = "All goals finished!";

const ACTIVE_MARKER: &str = "->";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders the chain from the current goal up to its root.
///
/// The first line is the current goal. Completed entries show their
/// completion instant.
///
/// # Errors
/// - Propagates [`crate::stack::StackError`] when the chain cannot be
///   resolved.
pub fn render(stack: &GoalStack) -> StackResult<String> {
    let chain = stack.active_chain()?;
    if chain.is_empty() {
        return Ok(EMPTY_STACK_MESSAGE.to_string());
    }

    let lines = chain
        .iter()
        .enumerate()
        .map(|(index, (_, goal))| render_line(goal, index == 0))
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}

fn render_line(goal: &Goal, active: bool) -> String {
    let marker = if active { ACTIVE_MARKER } else { "  " };
    let mut line = format!(
        "{marker} {}  (started {})",
        goal.text,
        display_time(&goal.created_at)
    );
    if let Some(completed_at) = goal.completed_at.filter(|_| goal.done) {
        line.push_str(&format!(" [done {}]", display_time(&completed_at)));
    }
    line
}

fn display_time(instant: &DateTime<Utc>) -> String {
    instant.format(DISPLAY_TIME_FORMAT).to_string()
}
