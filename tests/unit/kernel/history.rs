use super::*;

fn snap(text: &str, version: u64) -> Snapshot {
    let rope = Rope::from_str(text);
    let lines = rope.len_lines();
    Snapshot {
        rope,
        alignments: vec![Alignment::Left; lines],
        cursor: 0,
        version,
    }
}

#[test]
fn typing_coalesces_into_one_step() {
    let mut history = EditHistory::new();
    history.record(snap("", 0), EditKind::Typing);
    history.record(snap("a", 1), EditKind::Typing);
    history.record(snap("ab", 2), EditKind::Typing);

    let restored = history.undo(snap("abc", 3)).unwrap();
    assert_eq!(restored.rope.to_string(), "");
    assert!(!history.can_undo());
}

#[test]
fn break_group_starts_new_step() {
    let mut history = EditHistory::new();
    history.record(snap("", 0), EditKind::Typing);
    history.break_group();
    history.record(snap("a", 1), EditKind::Typing);

    assert_eq!(history.undo(snap("ab", 2)).unwrap().rope.to_string(), "a");
    assert_eq!(history.undo(snap("a", 1)).unwrap().rope.to_string(), "");
}

#[test]
fn other_edits_never_coalesce() {
    let mut history = EditHistory::new();
    history.record(snap("x", 0), EditKind::Other);
    history.record(snap("x", 1), EditKind::Other);

    assert!(history.undo(snap("x", 2)).is_some());
    assert!(history.undo(snap("x", 1)).is_some());
    assert!(history.undo(snap("x", 0)).is_none());
}

#[test]
fn redo_replays_and_new_edit_clears_it() {
    let mut history = EditHistory::new();
    history.record(snap("", 0), EditKind::Other);

    let before = history.undo(snap("a", 1)).unwrap();
    assert!(history.can_redo());
    let after = history.redo(before).unwrap();
    assert_eq!(after.version, 1);

    history.undo(after).unwrap();
    history.record(snap("", 0), EditKind::Other);
    assert!(!history.can_redo());
}

#[test]
fn limit_drops_oldest_steps() {
    let mut history = EditHistory::with_limit(2);
    for v in 0..5 {
        history.record(snap("", v), EditKind::Other);
    }
    assert_eq!(history.undo(snap("", 5)).unwrap().version, 4);
    assert_eq!(history.undo(snap("", 4)).unwrap().version, 3);
    assert!(history.undo(snap("", 3)).is_none());
}
