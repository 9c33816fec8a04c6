//! DFA data model and JSON loader for the vacuo emptiness analyzer.
//!
//! This crate owns everything upstream of the analysis: the interned,
//! immutable [`Dfa`] representation and the [`loader`] that turns a raw JSON
//! description into a validated automaton or a tagged [`LoadError`]. The
//! analyzer never sees a partially-validated automaton; every referenced
//! state is checked against the declared state set at load time.

pub mod dfa;
pub mod loader;
pub mod state_set;

pub use dfa::Dfa;
pub use loader::{load_str, load_value, LoadError, LoadResult};
pub use state_set::{StateId, StateSet, SymbolId};
