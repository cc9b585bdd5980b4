//! Reachable state enumeration and per-depth statistics

use std::collections::{HashSet, VecDeque};

use crate::{Result, ports::GameRules, solver::EncodedState};

/// Every position reachable from the initial state, terminal ones included.
#[derive(Debug, Clone)]
pub struct ReachableStates<S> {
    /// Positions in breadth-first discovery order, keyed by encoding
    pub states: Vec<(EncodedState, S)>,
    /// Keys of positions where the game has ended
    pub terminal: HashSet<EncodedState>,
}

impl<S> ReachableStates<S> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Positions where somebody still has to move
    pub fn non_terminal(&self) -> impl Iterator<Item = &(EncodedState, S)> {
        self.states
            .iter()
            .filter(|(key, _)| !self.terminal.contains(key))
    }
}

/// Collect every position reachable from `rules.initial_state()`.
///
/// This walks the same graph the solver's discovery phase walks, but keeps
/// the full positions (not just table entries) so callers can check
/// properties such as encoding round-trips against them.
pub fn collect_reachable_states<R: GameRules>(rules: &R) -> Result<ReachableStates<R::State>> {
    let mut visited = HashSet::new();
    let mut terminal = HashSet::new();
    let mut states = Vec::new();
    let mut queue = VecDeque::new();

    let root = rules.initial_state();
    let root_key = rules.encode(&root);
    visited.insert(root_key);
    queue.push_back((root_key, root, false));

    while let Some((key, state, is_terminal)) = queue.pop_front() {
        if is_terminal {
            terminal.insert(key);
        } else {
            for action in rules.legal_actions(&state) {
                let (next, outcome) = rules.step(&state, action)?;
                let next_key = rules.encode(&next);
                if visited.insert(next_key) {
                    queue.push_back((next_key, next, outcome.is_terminal()));
                }
            }
        }
        states.push((key, state));
    }

    Ok(ReachableStates { states, terminal })
}
