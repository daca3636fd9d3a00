use super::{Append, GraphState, Reducer, StateSchema, StateUpdate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct LedgerState {
    entries: Vec<String>,
    label: String,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct LedgerUpdate {
    entries: Vec<String>,
    label: Option<String>,
}

impl StateSchema for LedgerState {
    type Update = LedgerUpdate;

    fn apply(current: &Self, update: Self::Update) -> Self {
        Self {
            entries: Append.reduce(current.entries.clone(), update.entries),
            label: update.label.unwrap_or_else(|| current.label.clone()),
        }
    }
}

#[test]
fn append_keeps_existing_entries_in_order() {
    let initial = LedgerState {
        entries: vec!["a".to_string()],
        label: "first".to_string(),
    };
    let next = LedgerState::apply(
        &initial,
        LedgerUpdate {
            entries: vec!["b".to_string(), "c".to_string()],
            label: None,
        },
    );
    assert_eq!(next.entries, vec!["a", "b", "c"]);
    assert_eq!(next.label, "first");
}

#[test]
fn empty_update_is_identity() {
    let state = GraphState::new(LedgerState {
        entries: vec!["x".to_string()],
        label: "kept".to_string(),
    });
    let next = state.clone().apply(StateUpdate::empty());
    assert_eq!(next, state);
}

#[test]
fn label_update_replaces_label() {
    let initial = LedgerState::default();
    let next = LedgerState::apply(
        &initial,
        LedgerUpdate {
            entries: vec![],
            label: Some("second".to_string()),
        },
    );
    assert_eq!(next.label, "second");
    assert!(next.entries.is_empty());
}
