//! Per (state, action) reward entries

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{encoding::EncodedState, value::Value};
use crate::game::StepOutcome;

/// Training pass counter. Epoch 0 means "never visited"; training starts at 1.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Epoch(u32);

impl Epoch {
    pub const NEVER: Epoch = Epoch(0);

    pub const fn new(value: u32) -> Self {
        Epoch(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Epoch {
        Epoch(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an agent knows about one move.
///
/// `successor` and `outcome` are fixed by the rules when the move is first
/// discovered. `value` and `last_visited` belong to training and are only
/// written by passes that target the agent owning this entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntry {
    successor: EncodedState,
    outcome: StepOutcome,
    value: Value,
    last_visited: Epoch,
}

impl RewardEntry {
    /// Record a freshly discovered move.
    ///
    /// Immediate wins and draws are seeded with their final value; moves that
    /// continue the game start out [`Value::Undefined`].
    pub fn new(successor: EncodedState, outcome: StepOutcome) -> Self {
        Self {
            successor,
            outcome,
            value: Value::from_outcome(outcome),
            last_visited: Epoch::NEVER,
        }
    }

    pub fn successor(&self) -> EncodedState {
        self.successor
    }

    pub fn outcome(&self) -> StepOutcome {
        self.outcome
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn last_visited(&self) -> Epoch {
        self.last_visited
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub(crate) fn mark_visited(&mut self, epoch: Epoch) {
        self.last_visited = epoch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_seeds_terminal_values() {
        let key = EncodedState::from_raw(0b01);
        assert_eq!(RewardEntry::new(key, StepOutcome::Win).value(), Value::Win);
        assert_eq!(RewardEntry::new(key, StepOutcome::Draw).value(), Value::Draw);

        let open = RewardEntry::new(key, StepOutcome::WaitingNextAction);
        assert_eq!(open.value(), Value::Undefined);
        assert_eq!(open.last_visited(), Epoch::NEVER);
        assert!(!open.is_terminal());
    }

    #[test]
    fn test_training_fields_are_mutable() {
        let mut entry = RewardEntry::new(EncodedState::from_raw(4), StepOutcome::WaitingNextAction);
        entry.set_value(Value::Lose);
        entry.mark_visited(Epoch::new(3));
        assert_eq!(entry.value(), Value::Lose);
        assert_eq!(entry.last_visited(), Epoch::new(3));
        assert_eq!(entry.successor(), EncodedState::from_raw(4));
    }

    #[test]
    fn test_epoch_sequence() {
        let first = Epoch::NEVER.next();
        assert_eq!(first, Epoch::new(1));
        assert!(first.next() > first);
        assert_eq!(first.to_string(), "1");
    }
}
