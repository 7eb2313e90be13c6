use chrono::{DateTime, Duration, TimeZone, Utc};
use goalstack_core::{Goal, GoalId, GoalStack, StackError};
use std::collections::BTreeMap;

fn t(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap() + Duration::seconds(seconds)
}

fn collection(goals: &[Goal]) -> BTreeMap<GoalId, Goal> {
    goals.iter().map(|goal| (goal.id(), goal.clone())).collect()
}

#[test]
fn push_on_empty_stack_creates_root_goal() {
    let mut stack = GoalStack::new();
    let goal = stack.push("write spec").clone();

    assert_eq!(goal.text, "write spec");
    assert_eq!(goal.parent, None);
    assert!(!goal.done);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.current_goal().unwrap(), Some(&goal));
    assert_eq!(stack.current_id(), Some(&goal.id()));
}

#[test]
fn push_nests_under_current_goal() {
    let mut stack = GoalStack::new();
    let a_id = stack.push_at("A", t(0)).id();
    let b = stack.push_at("B", t(1)).clone();

    assert_eq!(b.text, "B");
    assert_eq!(b.parent, Some(a_id));
    assert_eq!(stack.current_goal().unwrap().unwrap().text, "B");
    assert_eq!(stack.depth().unwrap(), 2);
}

#[test]
fn pop_completes_current_and_returns_parent() {
    let mut stack = GoalStack::new();
    stack.push_at("A", t(0));
    let b_id = stack.push_at("B", t(1)).id();

    let current = stack.pop_at(t(5)).unwrap().cloned();
    assert_eq!(current.unwrap().text, "A");

    let b = stack.get(&b_id).unwrap();
    assert!(b.done);
    assert_eq!(b.completed_at, Some(t(5)));
    assert_eq!(stack.len(), 2);
}

#[test]
fn pop_last_goal_drains_the_stack() {
    let mut stack = GoalStack::new();
    let id = stack.push_at("only", t(0)).id();

    assert_eq!(stack.pop_at(t(1)).unwrap(), None);
    assert_eq!(stack.current_id(), None);
    assert!(stack.get(&id).unwrap().done);
    assert!(stack.active_chain().unwrap().is_empty());
}

#[test]
fn pop_on_empty_stack_is_a_noop() {
    let mut stack = GoalStack::new();
    assert_eq!(stack.pop().unwrap(), None);
    assert!(stack.is_empty());

    let mut drained = GoalStack::new();
    drained.push_at("x", t(0));
    drained.pop_at(t(1)).unwrap();
    let before = drained.clone();
    assert_eq!(drained.pop_at(t(2)).unwrap(), None);
    assert_eq!(drained, before);
}

#[test]
fn push_then_pop_restores_previous_current() {
    for prefix in [0usize, 1, 3] {
        let mut stack = GoalStack::new();
        for index in 0..prefix {
            stack.push_at(format!("goal {index}"), t(index as i64));
        }
        let before = stack.current_id().cloned();

        let pushed_id = stack.push_at("temporary", t(100)).id();
        stack.pop_at(t(101)).unwrap();

        assert_eq!(stack.current_id().cloned(), before);
        let pushed = stack.get(&pushed_id).unwrap();
        assert!(pushed.done);
        assert!(pushed.completed_at.unwrap() >= pushed.created_at);
    }
}

#[test]
fn completed_goals_stay_in_collection_as_history() {
    let mut stack = GoalStack::new();
    stack.push_at("A", t(0));
    stack.pop_at(t(1)).unwrap();
    stack.push_at("B", t(2));
    stack.pop_at(t(3)).unwrap();

    assert_eq!(stack.len(), 2);
    for goal in stack.goals().values() {
        assert!(goal.done);
        assert!(goal.completed_at.unwrap() >= goal.created_at);
    }
}

#[test]
fn pop_with_clock_behind_creation_keeps_completion_ordered() {
    let mut stack = GoalStack::new();
    let id = stack.push_at("skewed", t(10)).id();
    stack.pop_at(t(0)).unwrap();

    let goal = stack.get(&id).unwrap();
    assert_eq!(goal.completed_at, Some(t(10)));
}

#[test]
fn active_chain_walks_from_current_to_root() {
    let mut stack = GoalStack::new();
    stack.push_at("root", t(0));
    stack.push_at("middle", t(1));
    stack.push_at("leaf", t(2));

    let texts = stack
        .active_chain()
        .unwrap()
        .iter()
        .map(|(_, goal)| goal.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["leaf", "middle", "root"]);
}

#[test]
fn from_parts_accepts_consistent_state() {
    let mut stack = GoalStack::new();
    stack.push_at("A", t(0));
    stack.push_at("B", t(1));
    stack.pop_at(t(2)).unwrap();
    let expected = stack.clone();

    let (goals, current) = stack.into_parts();
    assert_eq!(GoalStack::from_parts(goals, current).unwrap(), expected);
}

#[test]
fn from_parts_rejects_missing_parent() {
    let orphan = Goal::new(Some(GoalId::from("gone")), "orphan", t(0));
    let err = GoalStack::from_parts(collection(&[orphan.clone()]), None).unwrap_err();

    assert_eq!(
        err,
        StackError::MissingParent {
            goal: orphan.id(),
            parent: GoalId::from("gone"),
        }
    );
}

#[test]
fn from_parts_rejects_dangling_current() {
    let goal = Goal::new(None, "A", t(0));
    let err =
        GoalStack::from_parts(collection(&[goal]), Some(GoalId::from("nowhere"))).unwrap_err();

    assert_eq!(err, StackError::MissingGoal(GoalId::from("nowhere")));
}

#[test]
fn from_parts_rejects_completed_current() {
    let mut goal = Goal::new(None, "A", t(0));
    goal.complete(t(1));
    let err = GoalStack::from_parts(collection(&[goal.clone()]), Some(goal.id())).unwrap_err();

    assert_eq!(err, StackError::CurrentCompleted(goal.id()));
}

#[test]
fn from_parts_rejects_completed_ancestor() {
    let mut root = Goal::new(None, "root", t(0));
    let child = Goal::new(Some(root.id()), "child", t(1));
    root.complete(t(2));
    let err = GoalStack::from_parts(collection(&[root.clone(), child.clone()]), Some(child.id()))
        .unwrap_err();

    assert_eq!(
        err,
        StackError::CompletedAncestor {
            current: child.id(),
            ancestor: root.id(),
        }
    );
}

#[test]
fn from_parts_rejects_key_that_is_not_the_goal_identity() {
    let goal = Goal::new(None, "A", t(0));
    let mut goals = BTreeMap::new();
    goals.insert(GoalId::from("forged"), goal.clone());
    let err = GoalStack::from_parts(goals, None).unwrap_err();

    assert_eq!(
        err,
        StackError::IdentityMismatch {
            key: GoalId::from("forged"),
            computed: goal.id(),
        }
    );
}

#[test]
fn from_parts_rejects_invalid_goal_record() {
    let mut goal = Goal::new(None, "A", t(0));
    goal.done = true;
    let err = GoalStack::from_parts(collection(&[goal.clone()]), None).unwrap_err();

    assert!(matches!(err, StackError::InvalidGoal { goal: id, .. } if id == goal.id()));
}

#[test]
fn push_and_pop_drop_sub_microsecond_precision() {
    let mut stack = GoalStack::new();
    let precise = t(0) + Duration::nanoseconds(1_234_567);
    let created_at = stack.push_at("precise", precise).created_at;
    assert_eq!(created_at, t(0) + Duration::microseconds(1_234));

    let id = stack.current_id().cloned().unwrap();
    stack.pop_at(precise + Duration::nanoseconds(2_000_999)).unwrap();
    assert_eq!(
        stack.get(&id).unwrap().completed_at,
        Some(t(0) + Duration::microseconds(3_235))
    );
}
