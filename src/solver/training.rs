//! One epoch of alternating backward induction
//!
//! An epoch refines the values of one agent against the current optimal
//! replies of the other. Exploration is an iterative depth-first walk over
//! the target's optimal moves; every time a frame resolves to a value, that
//! value is written back along the trajectory that led to it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    agent::Agent,
    encoding::EncodedState,
    reward::{Epoch, RewardEntry},
    value::Value,
};
use crate::{
    Result,
    game::{Player, StepOutcome},
    types::Action,
};

/// Summary of a single training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochReport {
    pub epoch: Epoch,
    /// Player whose table was refined
    pub player: Player,
    /// Whether any value was written
    pub changed: bool,
    /// Frames popped from the exploration stack
    pub visited: usize,
    /// Trajectories written back
    pub backtracks: usize,
}

/// A pending (state, action) together with the trajectory length it extends.
#[derive(Debug, Clone, Copy)]
struct Frame {
    state: EncodedState,
    action: Action,
    depth: usize,
}

/// Refine `target` for one epoch, reading `opponent` only.
///
/// Exploration starts from the target's currently optimal moves at each of
/// `seeds`. Seeds are processed in reverse order, matching the stack
/// discipline of the walk itself.
///
/// # Errors
///
/// Returns [`crate::Error::MissingEntry`] or [`crate::Error::MissingAction`]
/// if the tables were not produced by discovery over the same rules.
pub fn train_epoch(
    target: &mut Agent,
    opponent: &Agent,
    epoch: Epoch,
    seeds: &[EncodedState],
) -> Result<EpochReport> {
    let mut stack = Vec::new();
    for &seed in seeds {
        for action in target.optimal_actions(seed)? {
            stack.push(Frame {
                state: seed,
                action,
                depth: 0,
            });
        }
    }

    let mut trajectory: Vec<(EncodedState, Action)> = Vec::new();
    let mut report = EpochReport {
        epoch,
        player: target.player(),
        changed: false,
        visited: 0,
        backtracks: 0,
    };

    while let Some(frame) = stack.pop() {
        report.visited += 1;
        trajectory.truncate(frame.depth);
        trajectory.push((frame.state, frame.action));

        let entry = target.reward(frame.state, frame.action)?.clone();
        let depth = trajectory.len();
        let candidate = candidate_value(target, opponent, &entry, epoch, depth, &mut stack)?;

        if let Some(value) = candidate {
            report.backtracks += 1;
            if backtrack(target, &trajectory, value, epoch)? {
                report.changed = true;
            }
        }
    }

    Ok(report)
}

/// Value of a move as far as it can be decided at this frame.
///
/// Continuing replies are not resolved here; they schedule the target's
/// optimal moves at the following position and leave the decision to the
/// deeper frames.
fn candidate_value(
    target: &Agent,
    opponent: &Agent,
    entry: &RewardEntry,
    epoch: Epoch,
    depth: usize,
    stack: &mut Vec<Frame>,
) -> Result<Option<Value>> {
    if entry.last_visited() == epoch {
        return Ok(Some(entry.value()));
    }

    match entry.outcome() {
        StepOutcome::Win => return Ok(Some(Value::Win)),
        StepOutcome::Draw => return Ok(Some(Value::Draw)),
        StepOutcome::WaitingNextAction => {}
    }

    let reply_state = entry.successor();
    let mut immediate = Value::Undefined;
    for reply in opponent.optimal_actions(reply_state)? {
        let response = opponent.reward(reply_state, reply)?;
        match response.outcome() {
            StepOutcome::Win => immediate = immediate.max(Value::Lose),
            StepOutcome::Draw => immediate = immediate.max(Value::Draw),
            StepOutcome::WaitingNextAction => {
                let next = response.successor();
                for action in target.optimal_actions(next)? {
                    stack.push(Frame {
                        state: next,
                        action,
                        depth,
                    });
                }
            }
        }
    }

    Ok(immediate.is_defined().then_some(immediate))
}

/// Write `value` along `trajectory`, deepest entry first.
///
/// Entries already touched this epoch only move upwards; the rest are
/// overwritten. Returns whether anything was written.
fn backtrack(
    target: &mut Agent,
    trajectory: &[(EncodedState, Action)],
    value: Value,
    epoch: Epoch,
) -> Result<bool> {
    let mut updated = false;
    for &(state, action) in trajectory.iter().rev() {
        let entry = target.reward_mut(state, action)?;
        let write = if entry.last_visited() == epoch {
            value > entry.value()
        } else {
            value != entry.value()
        };
        if write {
            trace!(state = state.value(), %action, from = %entry.value(), to = %value, "updated value");
            entry.set_value(value);
            updated = true;
        }
        entry.mark_visited(epoch);
    }
    Ok(updated)
}
