//! JSON loading and validation of DFA descriptions.
//!
//! The input schema has four required top-level keys: `states` (records
//! carrying a `state` name plus one optional entry per alphabet symbol naming
//! the transition target), `alphabet`, `start_state`, and `accept_states`.
//! Validation is strict: every state referenced as start, as accepting, or as
//! a transition target must be declared in `states`, and any violation is a
//! fatal [`LoadError`] rather than a silent skip.

use crate::dfa::Dfa;
use crate::state_set::{StateId, StateSet};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// A load-time failure: malformed or inconsistent input.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input file is missing required key: '{key}'")]
    MissingKey { key: &'static str },

    #[error("{context} must be {expected}")]
    WrongType {
        context: String,
        expected: &'static str,
    },

    #[error("state object missing 'state' key")]
    StateMissingName,

    #[error("start state '{name}' not in states")]
    UnknownStartState { name: String },

    #[error("accept state object missing 'state' key")]
    AcceptMissingName,

    #[error("accept state '{name}' not in states")]
    UnknownAcceptState { name: String },

    #[error("transition target '{target}' (from '{from}' on '{symbol}') not in states")]
    UnknownTransitionTarget {
        from: String,
        symbol: String,
        target: String,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Parse and validate a DFA description from JSON text.
pub fn load_str(source: &str) -> LoadResult<Dfa> {
    let value: Value = serde_json::from_str(source)?;
    load_value(&value)
}

/// Validate an already-parsed JSON document.
pub fn load_value(value: &Value) -> LoadResult<Dfa> {
    let root = value.as_object().ok_or_else(|| LoadError::WrongType {
        context: "input document".to_string(),
        expected: "a JSON object",
    })?;

    let states_raw = as_array(require(root, "states")?, "key 'states'")?;
    let alphabet_raw = as_array(require(root, "alphabet")?, "key 'alphabet'")?;
    let start_name = as_str(require(root, "start_state")?, "key 'start_state'")?;
    let accept_raw = as_array(require(root, "accept_states")?, "key 'accept_states'")?;

    let mut alphabet = Vec::with_capacity(alphabet_raw.len());
    for entry in alphabet_raw {
        alphabet.push(as_str(entry, "alphabet entry")?.to_string());
    }

    // First pass: intern every declared state. Duplicate records merge into
    // one state; the record list is a set of names.
    let mut state_names: Vec<String> = Vec::with_capacity(states_raw.len());
    let mut state_index: HashMap<String, StateId> = HashMap::with_capacity(states_raw.len());
    let mut records: Vec<(StateId, &Map<String, Value>)> = Vec::with_capacity(states_raw.len());

    for entry in states_raw {
        let record = entry.as_object().ok_or_else(|| LoadError::WrongType {
            context: "state entry".to_string(),
            expected: "an object",
        })?;
        let name = match record.get("state") {
            None => return Err(LoadError::StateMissingName),
            Some(v) => as_str(v, "'state' key of a state object")?,
        };
        let id = *state_index.entry(name.to_string()).or_insert_with(|| {
            state_names.push(name.to_string());
            (state_names.len() - 1) as StateId
        });
        records.push((id, record));
    }

    // Second pass: fill the transition table. Only keys that name alphabet
    // symbols are read; other record keys are ignored. A repeated
    // (state, symbol) cell keeps the last definition.
    let width = alphabet.len();
    let mut table: Vec<Option<StateId>> = vec![None; state_names.len() * width];

    for &(source_id, record) in &records {
        for (symbol_idx, symbol) in alphabet.iter().enumerate() {
            let Some(target_val) = record.get(symbol) else {
                continue;
            };
            let target = as_str(
                target_val,
                format!(
                    "transition on '{symbol}' from '{}'",
                    state_names[source_id as usize]
                ),
            )?;
            let target_id = state_index.get(target).copied().ok_or_else(|| {
                LoadError::UnknownTransitionTarget {
                    from: state_names[source_id as usize].clone(),
                    symbol: symbol.clone(),
                    target: target.to_string(),
                }
            })?;
            table[source_id as usize * width + symbol_idx] = Some(target_id);
        }
    }

    let start = state_index
        .get(start_name)
        .copied()
        .ok_or_else(|| LoadError::UnknownStartState {
            name: start_name.to_string(),
        })?;

    let mut accepting = StateSet::with_capacity(state_names.len());
    for entry in accept_raw {
        let record = entry.as_object().ok_or_else(|| LoadError::WrongType {
            context: "accept state entry".to_string(),
            expected: "an object",
        })?;
        let name = match record.get("state") {
            None => return Err(LoadError::AcceptMissingName),
            Some(v) => as_str(v, "'state' key of an accept state object")?,
        };
        let id = state_index
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::UnknownAcceptState {
                name: name.to_string(),
            })?;
        accepting.insert(id);
    }

    Ok(Dfa::new(
        state_names,
        state_index,
        alphabet,
        start,
        accepting,
        table,
    ))
}

fn require<'a>(root: &'a Map<String, Value>, key: &'static str) -> LoadResult<&'a Value> {
    root.get(key).ok_or(LoadError::MissingKey { key })
}

fn as_array<'a>(value: &'a Value, context: impl Into<String>) -> LoadResult<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| LoadError::WrongType {
        context: context.into(),
        expected: "an array",
    })
}

fn as_str<'a>(value: &'a Value, context: impl Into<String>) -> LoadResult<&'a str> {
    value.as_str().ok_or_else(|| LoadError::WrongType {
        context: context.into(),
        expected: "a string",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "states": [
            { "state": "q0", "a": "q1" },
            { "state": "q1", "a": "q2", "b": "q0" },
            { "state": "q2" }
        ],
        "alphabet": ["a", "b"],
        "start_state": "q0",
        "accept_states": [{ "state": "q2" }]
    }"#;

    #[test]
    fn test_valid_input() {
        let dfa = load_str(VALID).unwrap();
        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.num_symbols(), 2);
        assert_eq!(dfa.state_name(dfa.start()), "q0");
        assert_eq!(dfa.accepting().len(), 1);
    }

    #[test]
    fn test_partial_relation_is_valid() {
        // q2 defines no transitions at all; q0 lacks 'b'.
        let dfa = load_str(VALID).unwrap();
        let q0 = dfa.state_id("q0").unwrap();
        let q2 = dfa.state_id("q2").unwrap();
        assert_eq!(dfa.transition(q0, 1), None);
        assert_eq!(dfa.successors(q2).count(), 0);
    }

    #[test]
    fn test_not_valid_json() {
        let err = load_str("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().starts_with("input file is not valid JSON"));
    }

    #[test]
    fn test_root_not_object() {
        let err = load_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, LoadError::WrongType { .. }));
    }

    #[test]
    fn test_missing_required_keys() {
        for key in ["states", "alphabet", "start_state", "accept_states"] {
            let value: Value = serde_json::from_str(VALID).unwrap();
            let mut root = value.as_object().unwrap().clone();
            root.remove(key);
            let err = load_value(&Value::Object(root)).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("input file is missing required key: '{key}'")
            );
        }
    }

    #[test]
    fn test_state_missing_name() {
        let err = load_str(
            r#"{
                "states": [{ "a": "q0" }],
                "alphabet": ["a"],
                "start_state": "q0",
                "accept_states": []
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::StateMissingName));
        assert_eq!(err.to_string(), "state object missing 'state' key");
    }

    #[test]
    fn test_unknown_start_state() {
        let err = load_str(
            r#"{
                "states": [{ "state": "q0" }],
                "alphabet": [],
                "start_state": "q7",
                "accept_states": []
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "start state 'q7' not in states");
    }

    #[test]
    fn test_accept_missing_name() {
        let err = load_str(
            r#"{
                "states": [{ "state": "q0" }],
                "alphabet": [],
                "start_state": "q0",
                "accept_states": [{}]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::AcceptMissingName));
    }

    #[test]
    fn test_unknown_accept_state() {
        let err = load_str(
            r#"{
                "states": [{ "state": "q0" }],
                "alphabet": [],
                "start_state": "q0",
                "accept_states": [{ "state": "q3" }]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "accept state 'q3' not in states");
    }

    #[test]
    fn test_unknown_transition_target() {
        let err = load_str(
            r#"{
                "states": [{ "state": "q0", "a": "q9" }],
                "alphabet": ["a"],
                "start_state": "q0",
                "accept_states": []
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownTransitionTarget { .. }));
        assert!(err.to_string().contains("'q9'"));
    }

    #[test]
    fn test_non_string_transition_target() {
        let err = load_str(
            r#"{
                "states": [{ "state": "q0", "a": 3 }],
                "alphabet": ["a"],
                "start_state": "q0",
                "accept_states": []
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::WrongType { .. }));
    }

    #[test]
    fn test_duplicate_state_records_merge() {
        let dfa = load_str(
            r#"{
                "states": [
                    { "state": "q0", "a": "q0" },
                    { "state": "q1" },
                    { "state": "q0", "b": "q1" }
                ],
                "alphabet": ["a", "b"],
                "start_state": "q0",
                "accept_states": []
            }"#,
        )
        .unwrap();

        assert_eq!(dfa.num_states(), 2);
        let q0 = dfa.state_id("q0").unwrap();
        let q1 = dfa.state_id("q1").unwrap();
        // Transitions from both records accumulate.
        assert_eq!(dfa.transition(q0, 0), Some(q0));
        assert_eq!(dfa.transition(q0, 1), Some(q1));
    }

    #[test]
    fn test_repeated_cell_keeps_last_definition() {
        let dfa = load_str(
            r#"{
                "states": [
                    { "state": "q0", "a": "q1" },
                    { "state": "q1" },
                    { "state": "q2" },
                    { "state": "q0", "a": "q2" }
                ],
                "alphabet": ["a"],
                "start_state": "q0",
                "accept_states": []
            }"#,
        )
        .unwrap();

        let q0 = dfa.state_id("q0").unwrap();
        let q2 = dfa.state_id("q2").unwrap();
        assert_eq!(dfa.transition(q0, 0), Some(q2));
    }

    #[test]
    fn test_keys_outside_alphabet_ignored() {
        let dfa = load_str(
            r#"{
                "states": [{ "state": "q0", "note": "not a symbol", "x": "q9" }],
                "alphabet": ["a"],
                "start_state": "q0",
                "accept_states": []
            }"#,
        )
        .unwrap();
        assert_eq!(dfa.num_states(), 1);
        assert_eq!(dfa.successors(0).count(), 0);
    }
}
