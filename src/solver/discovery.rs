//! Breadth-first population of both players' tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{agent::Agent, encoding::EncodedState, reward::RewardEntry};
use crate::{Result, game::StepOutcome, ports::GameRules};

/// Sizes of the tables produced by [`discover`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryStats {
    /// Number of frontier layers expanded
    pub layers: usize,
    /// States recorded for player 1
    pub first_states: usize,
    /// States recorded for player 2
    pub second_states: usize,
    /// (state, action) pairs recorded across both tables
    pub entries: usize,
}

/// Record one entry per legal move of every position reachable from the
/// initial state.
///
/// Layer `d` holds the positions after `d` moves; even layers belong to
/// `first`, odd layers to `second`. Moves that end the game seed their final
/// value and are not expanded further.
pub fn discover<R: GameRules>(
    rules: &R,
    first: &mut Agent,
    second: &mut Agent,
) -> Result<DiscoveryStats> {
    let initial = rules.initial_state();
    let mut frontier: BTreeMap<EncodedState, R::State> = BTreeMap::new();
    frontier.insert(rules.encode(&initial), initial);

    let mut stats = DiscoveryStats::default();
    let mut first_to_move = true;

    while !frontier.is_empty() {
        let agent = if first_to_move { &mut *first } else { &mut *second };
        let mut next_layer = BTreeMap::new();
        let mut recorded = 0usize;

        for (key, state) in &frontier {
            for action in rules.legal_actions(state) {
                let (next, outcome) = rules.step(state, action)?;
                let next_key = rules.encode(&next);
                if agent.insert_if_absent(*key, action, RewardEntry::new(next_key, outcome)) {
                    recorded += 1;
                }
                if outcome == StepOutcome::WaitingNextAction {
                    next_layer.entry(next_key).or_insert(next);
                }
            }
        }

        debug!(
            layer = stats.layers,
            player = %agent.player(),
            states = frontier.len(),
            entries = recorded,
            "expanded discovery layer"
        );

        stats.layers += 1;
        stats.entries += recorded;
        frontier = next_layer;
        first_to_move = !first_to_move;
    }

    stats.first_states = first.len();
    stats.second_states = second.len();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::{Player, RowGame},
        solver::Value,
    };

    fn discover_board(size: usize) -> (Agent, Agent, DiscoveryStats) {
        let rules = RowGame::new(size).unwrap();
        let mut first = Agent::new(Player::First, size);
        let mut second = Agent::new(Player::Second, size);
        let stats = discover(&rules, &mut first, &mut second).unwrap();
        (first, second, stats)
    }

    #[test]
    fn test_three_cell_counts() {
        let (first, second, stats) = discover_board(3);
        assert_eq!(stats.first_states, 7);
        assert_eq!(stats.second_states, 3);
        assert_eq!(first.entry_count(), 9);
        assert_eq!(second.entry_count(), 6);
        assert_eq!(stats.entries, 15);
        assert_eq!(stats.layers, 3);
    }

    #[test]
    fn test_larger_board_counts() {
        let (first, second, _) = discover_board(4);
        assert_eq!((first.len(), second.len()), (13, 10));
        assert_eq!((first.entry_count(), second.entry_count()), (28, 18));

        let (first, second, _) = discover_board(5);
        assert_eq!((first.len(), second.len()), (33, 23));
        assert_eq!((first.entry_count(), second.entry_count()), (77, 56));
    }

    #[test]
    fn test_terminal_moves_are_seeded() {
        let (first, second, _) = discover_board(3);
        for (_, _, entry) in first.entries().chain(second.entries()) {
            match entry.outcome() {
                StepOutcome::Win => assert_eq!(entry.value(), Value::Win),
                StepOutcome::Draw => assert_eq!(entry.value(), Value::Draw),
                StepOutcome::WaitingNextAction => assert_eq!(entry.value(), Value::Undefined),
            }
        }
    }

    #[test]
    fn test_single_cell_board() {
        let (first, second, stats) = discover_board(1);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(stats.layers, 1);
        let root = EncodedState::from_raw(0);
        assert_eq!(first.value_of(root).unwrap(), Value::Draw);
    }

    #[test]
    fn test_two_cell_board_resolves_during_discovery() {
        let (first, second, _) = discover_board(2);
        assert_eq!((first.len(), second.len()), (1, 2));
        for (_, _, entry) in second.entries() {
            assert_eq!(entry.outcome(), StepOutcome::Draw);
        }
    }
}
