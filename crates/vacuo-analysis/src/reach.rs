//! Breadth-first reachability over the transition table.

use std::collections::VecDeque;
use tracing::debug;
use vacuo_automaton::{Dfa, StateId, StateSet, SymbolId};

/// Result of a reachability traversal: the visited set plus, for every
/// visited state except the start, the `(state, symbol)` edge it was first
/// discovered through. The predecessor links let callers rebuild a shortest
/// path from the start to any reached state.
#[derive(Debug)]
pub struct Reachability {
    visited: StateSet,
    predecessor: Vec<Option<(StateId, SymbolId)>>,
    start: StateId,
}

impl Reachability {
    /// The set of reached states, start included.
    pub fn reachable(&self) -> &StateSet {
        &self.visited
    }

    /// Consume the traversal, keeping only the reached set.
    pub fn into_reachable(self) -> StateSet {
        self.visited
    }

    /// Rebuild the symbol sequence of the discovery path from the start
    /// state to `target`. Empty when `target` is the start state itself;
    /// `None` when `target` was not reached.
    pub fn path_to(&self, target: StateId) -> Option<Vec<SymbolId>> {
        if !self.visited.contains(target) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        while current != self.start {
            // Every visited non-start state has a predecessor link.
            let (prev, symbol) = self.predecessor[current as usize]?;
            path.push(symbol);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Visit every state reachable from the start state.
///
/// Standard BFS over the implicit directed graph whose edges are the defined
/// transitions; the symbol labeling an edge plays no role in reachability
/// beyond being recorded in the predecessor link. A state is marked visited
/// when enqueued, so each reachable state enters the queue exactly once and
/// the traversal runs in O(states + transitions).
pub fn explore(dfa: &Dfa) -> Reachability {
    let mut visited = StateSet::with_capacity(dfa.num_states());
    let mut predecessor: Vec<Option<(StateId, SymbolId)>> = vec![None; dfa.num_states()];
    let mut queue = VecDeque::new();

    visited.insert(dfa.start());
    queue.push_back(dfa.start());

    while let Some(current) = queue.pop_front() {
        for (symbol, target) in dfa.successors(current) {
            if !visited.contains(target) {
                visited.insert(target);
                predecessor[target as usize] = Some((current, symbol));
                queue.push_back(target);
            }
        }
    }

    debug!(
        states_reached = visited.len(),
        total_states = dfa.num_states(),
        "reachability traversal complete"
    );

    Reachability {
        visited,
        predecessor,
        start: dfa.start(),
    }
}

/// The set of states reachable from the start state by zero or more
/// transitions, start included.
pub fn reachable_states(dfa: &Dfa) -> StateSet {
    explore(dfa).into_reachable()
}
