//! The emptiness decision: does the automaton accept any string at all?

use crate::reach::{explore, Reachability};
use tracing::debug;
use vacuo_automaton::{Dfa, StateSet};

/// Outcome of an emptiness analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No accepting state is reachable: the language is empty.
    Empty { states_reached: usize },
    /// Some accepting state is reachable. `witness` is a shortest accepted
    /// symbol sequence; it is empty when the start state itself accepts.
    NonEmpty {
        states_reached: usize,
        witness: Vec<String>,
    },
}

impl Verdict {
    /// The boolean the tool ultimately reports.
    pub fn language_is_empty(&self) -> bool {
        matches!(self, Verdict::Empty { .. })
    }

    /// Number of states visited by the traversal.
    pub fn states_reached(&self) -> usize {
        match self {
            Verdict::Empty { states_reached } | Verdict::NonEmpty { states_reached, .. } => {
                *states_reached
            }
        }
    }
}

/// True iff no accepting state is reachable from the start state.
///
/// Pure and total: both sets may be empty. An empty accepting set always
/// yields `true`.
pub fn is_language_empty(reachable: &StateSet, accepting: &StateSet) -> bool {
    !reachable.intersects(accepting)
}

/// Run the full analysis: reachability, intersection test, and witness
/// extraction on the non-empty side.
pub fn analyze(dfa: &Dfa) -> Verdict {
    let reach = explore(dfa);
    let states_reached = reach.reachable().len();

    if is_language_empty(reach.reachable(), dfa.accepting()) {
        debug!(states_reached, "no accepting state reachable");
        return Verdict::Empty { states_reached };
    }

    let witness = shortest_witness(dfa, &reach);
    debug!(states_reached, witness_len = witness.len(), "accepting state reachable");
    Verdict::NonEmpty {
        states_reached,
        witness,
    }
}

/// Among all reachable accepting states, keep the shortest discovery path.
/// BFS discovery paths are shortest paths, so the minimum over accepting
/// states is a globally shortest accepted string.
fn shortest_witness(dfa: &Dfa, reach: &Reachability) -> Vec<String> {
    dfa.accepting()
        .iter()
        .filter_map(|state| reach.path_to(state))
        .min_by_key(|path| path.len())
        .map(|path| {
            path.into_iter()
                .map(|symbol| dfa.symbol_name(symbol).to_string())
                .collect()
        })
        .unwrap_or_default()
}
