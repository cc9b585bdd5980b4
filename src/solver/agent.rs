//! Per-player policy/value tables
//!
//! An [`Agent`] maps every position where its player is to move onto the
//! reward entries of the moves available there. Tables are filled once by
//! discovery and refined in place by training; queries never add entries.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use serde::{Deserialize, Serialize};

use super::{encoding::EncodedState, engine::Solver, reward::RewardEntry, value::Value};
use crate::{Error, Result, config::SolverConfig, game::Player, ports::GameRules, types::Action};

/// Moves recorded for one position, ordered by column.
pub type ActionTable = BTreeMap<Action, RewardEntry>;

/// Policy/value table for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    player: Player,
    board_size: usize,
    table: BTreeMap<EncodedState, ActionTable>,
}

impl Agent {
    /// Create an empty table for `player`.
    pub fn new(player: Player, board_size: usize) -> Self {
        Self {
            player,
            board_size,
            table: BTreeMap::new(),
        }
    }

    /// Discover the full game and train both players to a fixed point.
    ///
    /// Returns `(player 1 agent, player 2 agent)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowgame::{game::RowGame, ports::GameRules, solver::{Agent, Value}};
    ///
    /// let rules = RowGame::new(3).unwrap();
    /// let (first, _second) = Agent::new_agents(&rules).unwrap();
    /// let start = rules.encode(&rules.initial_state());
    /// assert_eq!(first.value_of(start).unwrap(), Value::Win);
    /// ```
    pub fn new_agents<R: GameRules>(rules: &R) -> Result<(Agent, Agent)> {
        Self::new_agents_with(rules, SolverConfig::default())
    }

    /// Like [`Agent::new_agents`] with an explicit solver configuration.
    pub fn new_agents_with<R: GameRules>(
        rules: &R,
        config: SolverConfig,
    ) -> Result<(Agent, Agent)> {
        let mut solver = Solver::new(rules, config)?;
        solver.train()?;
        Ok(solver.into_agents())
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Insert `entry` unless the (state, action) pair is already recorded.
    ///
    /// Returns `true` when the entry was inserted.
    pub fn insert_if_absent(
        &mut self,
        state: EncodedState,
        action: Action,
        entry: RewardEntry,
    ) -> bool {
        match self.table.entry(state).or_default().entry(action) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, state: EncodedState) -> bool {
        self.table.contains_key(&state)
    }

    /// All moves recorded at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntry`] for undiscovered or terminal states.
    pub fn actions(&self, state: EncodedState) -> Result<&ActionTable> {
        self.table
            .get(&state)
            .ok_or_else(|| self.missing_entry(state))
    }

    /// Reward entry of one move.
    pub fn reward(&self, state: EncodedState, action: Action) -> Result<&RewardEntry> {
        self.actions(state)?
            .get(&action)
            .ok_or_else(|| self.missing_action(state, action))
    }

    pub(crate) fn reward_mut(
        &mut self,
        state: EncodedState,
        action: Action,
    ) -> Result<&mut RewardEntry> {
        let (player, board_size) = (self.player, self.board_size);
        let actions = self
            .table
            .get_mut(&state)
            .ok_or_else(|| Error::MissingEntry {
                state: state.label(board_size),
                player: player.to_string(),
            })?;
        actions
            .get_mut(&action)
            .ok_or_else(|| Error::MissingAction {
                state: state.label(board_size),
                action: action.column(),
            })
    }

    /// Best believed value among the moves recorded at `state`.
    pub fn value_of(&self, state: EncodedState) -> Result<Value> {
        self.actions(state)?
            .values()
            .map(RewardEntry::value)
            .max()
            .ok_or_else(|| self.missing_entry(state))
    }

    /// Moves at `state` whose value equals [`Agent::value_of`], ascending.
    ///
    /// Never empty for a recorded state.
    pub fn optimal_actions(&self, state: EncodedState) -> Result<Vec<Action>> {
        let best = self.value_of(state)?;
        Ok(self
            .actions(state)?
            .iter()
            .filter(|(_, entry)| entry.value() == best)
            .map(|(&action, _)| action)
            .collect())
    }

    /// Recorded states in ascending key order.
    pub fn states(&self) -> impl Iterator<Item = EncodedState> + '_ {
        self.table.keys().copied()
    }

    /// Every (state, action, entry) triple in key order.
    pub fn entries(&self) -> impl Iterator<Item = (EncodedState, Action, &RewardEntry)> + '_ {
        self.table.iter().flat_map(|(&state, actions)| {
            actions
                .iter()
                .map(move |(&action, entry)| (state, action, entry))
        })
    }

    /// Number of recorded states.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of recorded (state, action) pairs.
    pub fn entry_count(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    /// Label of `state` on this agent's board.
    pub fn label(&self, state: EncodedState) -> String {
        state.label(self.board_size)
    }

    fn missing_entry(&self, state: EncodedState) -> Error {
        Error::MissingEntry {
            state: self.label(state),
            player: self.player.to_string(),
        }
    }

    fn missing_action(&self, state: EncodedState, action: Action) -> Error {
        Error::MissingAction {
            state: self.label(state),
            action: action.column(),
        }
    }
}

/// One line per state: `<label> [<value>] -> {(a), (b)}`.
impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let value = self.value_of(state).map_err(|_| fmt::Error)?;
            let actions = self.optimal_actions(state).map_err(|_| fmt::Error)?;
            let actions: Vec<String> = actions.iter().map(ToString::to_string).collect();
            write!(
                f,
                "{} [{value}] -> {{{}}}",
                state.display(self.board_size),
                actions.join(", ")
            )?;
        }
        Ok(())
    }
}
