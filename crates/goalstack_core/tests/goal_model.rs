use chrono::{DateTime, TimeZone, Timelike, Utc};
use goalstack_core::{goal_id, Goal, GoalId, GoalValidationError};

fn instant(micros: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0)
        .unwrap()
        .with_nanosecond(micros * 1_000)
        .unwrap()
}

#[test]
fn goal_id_is_deterministic() {
    let parent = GoalId::from("abc");
    let first = goal_id(Some(&parent), "write spec", &instant(1));
    let second = goal_id(Some(&parent), "write spec", &instant(1));

    assert_eq!(first, second);
    assert_eq!(first.as_str().len(), 64);
    assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn goal_id_changes_with_each_input() {
    let parent = GoalId::from("abc");
    let base = goal_id(Some(&parent), "write spec", &instant(1));

    assert_ne!(base, goal_id(None, "write spec", &instant(1)));
    assert_ne!(base, goal_id(Some(&GoalId::from("abd")), "write spec", &instant(1)));
    assert_ne!(base, goal_id(Some(&parent), "write spec!", &instant(1)));
    assert_ne!(base, goal_id(Some(&parent), "write spec", &instant(2)));
}

#[test]
fn goal_id_keeps_field_boundaries() {
    let shifted = goal_id(Some(&GoalId::from("ab")), "c", &instant(0));
    let other = goal_id(Some(&GoalId::from("a")), "bc", &instant(0));
    assert_ne!(shifted, other);
}

#[test]
fn goal_new_sets_defaults_and_id_matches_identity() {
    let goal = Goal::new(None, "hello", instant(5));

    assert!(goal.is_root());
    assert!(!goal.done);
    assert_eq!(goal.completed_at, None);
    assert_eq!(goal.id(), goal_id(None, "hello", &instant(5)));
    assert!(goal.validate().is_ok());
}

#[test]
fn complete_sets_done_and_clamps_to_created_at() {
    let mut goal = Goal::new(None, "hello", instant(10));
    goal.complete(instant(3));

    assert!(goal.done);
    assert_eq!(goal.completed_at, Some(instant(10)));
    assert!(goal.validate().is_ok());
}

#[test]
fn validate_rejects_inconsistent_completion() {
    let mut goal = Goal::new(None, "hello", instant(10));
    goal.done = true;
    assert_eq!(
        goal.validate().unwrap_err(),
        GoalValidationError::DoneWithoutCompletion
    );

    goal.done = false;
    goal.completed_at = Some(instant(20));
    assert_eq!(
        goal.validate().unwrap_err(),
        GoalValidationError::CompletionWithoutDone
    );

    goal.done = true;
    goal.completed_at = Some(instant(1));
    assert_eq!(
        goal.validate().unwrap_err(),
        GoalValidationError::CompletedBeforeCreated {
            created_at: instant(10),
            completed_at: instant(1),
        }
    );
}

#[test]
fn goal_serialization_uses_expected_wire_fields() {
    let parent = GoalId::from("parent-id");
    let mut goal = Goal::new(Some(parent), "ship it", instant(123_456));
    goal.complete(instant(654_321));

    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["parent"], "parent-id");
    assert_eq!(json["text"], "ship it");
    assert_eq!(json["done"], true);
    assert_eq!(json["created_at"], "2026-10-18T09:30:00.123456+0000");
    assert_eq!(json["completed_at"], "2026-10-18T09:30:00.654321+0000");

    let decoded: Goal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, goal);
    assert_eq!(decoded.id(), goal.id());
}

#[test]
fn open_root_goal_serializes_nulls() {
    let goal = Goal::new(None, "root", instant(0));
    let json = serde_json::to_value(&goal).unwrap();

    assert!(json["parent"].is_null());
    assert!(json["completed_at"].is_null());
    assert_eq!(json["created_at"], "2026-10-18T09:30:00.000000+0000");
}

#[test]
fn deserialize_rejects_bad_timestamp() {
    let value = serde_json::json!({
        "parent": null,
        "text": "bad",
        "done": false,
        "created_at": "last tuesday",
        "completed_at": null
    });

    let err = serde_json::from_value::<Goal>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid timestamp `last tuesday`"),
        "unexpected error: {err}"
    );
}
