//! Immutable DFA representation: interned arenas and a dense transition table.

use crate::state_set::{StateId, StateSet, SymbolId};
use std::collections::HashMap;

/// A validated deterministic finite automaton.
///
/// State names and alphabet symbols are interned into `u32` indices at load
/// time; the transition function is a dense row-major table with one row per
/// state and one column per symbol. The relation may be partial: an absent
/// entry means the symbol cannot be consumed from that state.
///
/// The automaton is immutable once constructed. The loader is the only
/// producer, so every id stored here is already checked against the arenas.
#[derive(Debug, Clone)]
pub struct Dfa {
    state_names: Vec<String>,
    state_index: HashMap<String, StateId>,
    alphabet: Vec<String>,
    start: StateId,
    accepting: StateSet,
    /// Row-major: `table[state * alphabet.len() + symbol]`.
    table: Vec<Option<StateId>>,
}

impl Dfa {
    pub(crate) fn new(
        state_names: Vec<String>,
        state_index: HashMap<String, StateId>,
        alphabet: Vec<String>,
        start: StateId,
        accepting: StateSet,
        table: Vec<Option<StateId>>,
    ) -> Self {
        Self {
            state_names,
            state_index,
            alphabet,
            start,
            accepting,
            table,
        }
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.state_names.len()
    }

    /// Number of alphabet symbols.
    pub fn num_symbols(&self) -> usize {
        self.alphabet.len()
    }

    /// The designated start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The accepting states.
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// The alphabet, in declaration order.
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    /// The name a state was declared under.
    pub fn state_name(&self, state: StateId) -> &str {
        &self.state_names[state as usize]
    }

    /// The name of an alphabet symbol.
    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        &self.alphabet[symbol as usize]
    }

    /// Resolve a state name to its id.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_index.get(name).copied()
    }

    /// The transition from a state on a symbol, if one is defined.
    pub fn transition(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.table[state as usize * self.alphabet.len() + symbol as usize]
    }

    /// Iterate over the defined outgoing edges of a state as
    /// `(symbol, target)` pairs.
    pub fn successors(&self, state: StateId) -> impl Iterator<Item = (SymbolId, StateId)> + '_ {
        let width = self.alphabet.len();
        let row = &self.table[state as usize * width..(state as usize + 1) * width];
        row.iter()
            .enumerate()
            .filter_map(|(symbol, target)| target.map(|t| (symbol as SymbolId, t)))
    }
}
