//! Game-rules port - the boundary between the solver and a concrete game
//!
//! The solver never inspects boards itself. Everything it needs (the
//! starting position, the legal moves, the deterministic transition and the
//! compact key for each position) comes through this trait.

use crate::{Result, game::StepOutcome, solver::EncodedState, types::Action};

/// Deterministic rules of a two-player alternating game.
///
/// Implementations guarantee:
/// - `step` is deterministic and total over `legal_actions`;
/// - the reachable state space is finite and cycle-free;
/// - [`StepOutcome::Win`] means the player who just moved created the
///   winning condition.
///
/// # Examples
///
/// ```
/// use rowgame::{game::RowGame, ports::GameRules};
///
/// let rules = RowGame::new(3).unwrap();
/// let start = rules.initial_state();
/// assert_eq!(rules.legal_actions(&start).len(), 3);
/// ```
pub trait GameRules {
    /// Full game position handed back and forth through [`GameRules::step`].
    type State: Clone;

    /// Number of cells encoded into each [`EncodedState`].
    fn board_size(&self) -> usize;

    /// Position before the first move (player 1 to act).
    fn initial_state(&self) -> Self::State;

    /// Legal moves in ascending order.
    fn legal_actions(&self, state: &Self::State) -> Vec<Action>;

    /// Apply `action` and report the successor with its immediate outcome.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] when `action` is not legal.
    fn step(&self, state: &Self::State, action: Action) -> Result<(Self::State, StepOutcome)>;

    /// Compact key for `state`.
    fn encode(&self, state: &Self::State) -> EncodedState;
}
