//! Solver driver: discovery followed by alternating training epochs

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    agent::Agent,
    discovery::{DiscoveryStats, discover},
    encoding::EncodedState,
    reward::Epoch,
    training::{EpochReport, train_epoch},
};
use crate::{
    Result,
    config::{Coverage, SolverConfig},
    game::{Player, StepOutcome},
    ports::GameRules,
};

/// Outcome of [`Solver::train`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub discovery: DiscoveryStats,
    /// Every epoch run so far, in order
    pub epochs: Vec<EpochReport>,
}

impl TrainingReport {
    pub fn epoch_count(&self) -> usize {
        self.epochs.len()
    }

    /// Epoch that reported no change, if training has converged.
    pub fn converged_at(&self) -> Option<Epoch> {
        self.epochs
            .last()
            .filter(|report| !report.changed)
            .map(|report| report.epoch)
    }
}

/// Owns both agents between epochs.
///
/// [`Agent::new_agents`] covers the common case; keeping a `Solver` around
/// lets callers inspect intermediate tables or run extra epochs after
/// convergence.
///
/// # Examples
///
/// ```
/// use rowgame::{config::SolverConfig, game::{Player, RowGame}, solver::Solver};
///
/// let rules = RowGame::new(4).unwrap();
/// let mut solver = Solver::new(&rules, SolverConfig::default()).unwrap();
/// let report = solver.train().unwrap();
/// assert!(report.converged_at().is_some());
///
/// // a converged table is a fixed point
/// assert!(!solver.run_epoch_for(Player::First).unwrap().changed);
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    first: Agent,
    second: Agent,
    initial: EncodedState,
    epoch: Epoch,
    next_player: Player,
    discovery: DiscoveryStats,
    history: Vec<EpochReport>,
}

impl Solver {
    /// Create both tables and run discovery.
    pub fn new<R: GameRules>(rules: &R, config: SolverConfig) -> Result<Self> {
        let board_size = rules.board_size();
        let mut first = Agent::new(Player::First, board_size);
        let mut second = Agent::new(Player::Second, board_size);
        let discovery = discover(rules, &mut first, &mut second)?;
        info!(
            board_size,
            first_states = discovery.first_states,
            second_states = discovery.second_states,
            entries = discovery.entries,
            "discovery complete"
        );

        Ok(Self {
            config,
            first,
            second,
            initial: rules.encode(&rules.initial_state()),
            epoch: Epoch::NEVER,
            next_player: Player::First,
            discovery,
            history: Vec::new(),
        })
    }

    pub fn discovery(&self) -> DiscoveryStats {
        self.discovery
    }

    /// Key of the initial position.
    pub fn initial(&self) -> EncodedState {
        self.initial
    }

    /// Epochs run so far.
    pub fn history(&self) -> &[EpochReport] {
        &self.history
    }

    /// Run the next epoch in the alternation, starting with player 1.
    pub fn run_epoch(&mut self) -> Result<EpochReport> {
        let report = self.run_epoch_for(self.next_player)?;
        self.next_player = report.player.opponent();
        Ok(report)
    }

    /// Run one epoch refining `player`'s table, outside the alternation.
    ///
    /// The epoch counter still advances, so entries visited by earlier
    /// epochs are treated as stale.
    pub fn run_epoch_for(&mut self, player: Player) -> Result<EpochReport> {
        let seeds = self.seeds(player)?;
        self.epoch = self.epoch.next();
        let (target, opponent) = match player {
            Player::First => (&mut self.first, &self.second),
            Player::Second => (&mut self.second, &self.first),
        };
        let report = train_epoch(target, opponent, self.epoch, &seeds)?;
        debug!(
            epoch = %report.epoch,
            player = %report.player,
            seeds = seeds.len(),
            visited = report.visited,
            backtracks = report.backtracks,
            changed = report.changed,
            "epoch finished"
        );
        self.history.push(report);
        Ok(report)
    }

    /// Positions whose optimal moves start an epoch for `player`.
    pub fn seeds(&self, player: Player) -> Result<Vec<EncodedState>> {
        match (self.config.coverage, player) {
            (Coverage::Exhaustive, Player::First) => Ok(self.first.states().collect()),
            (Coverage::Exhaustive, Player::Second) => Ok(self.second.states().collect()),
            (Coverage::Principal, Player::First) => Ok(vec![self.initial]),
            (Coverage::Principal, Player::Second) => {
                let mut seeds = Vec::new();
                for action in self.first.optimal_actions(self.initial)? {
                    let entry = self.first.reward(self.initial, action)?;
                    if entry.outcome() == StepOutcome::WaitingNextAction {
                        seeds.push(entry.successor());
                    }
                }
                Ok(seeds)
            }
        }
    }

    /// Alternate epochs until one reports no change.
    pub fn train(&mut self) -> Result<TrainingReport> {
        loop {
            let report = self.run_epoch()?;
            info!(
                epoch = %report.epoch,
                player = %report.player,
                changed = report.changed,
                "training epoch"
            );
            if !report.changed {
                break;
            }
        }

        info!(
            epochs = self.history.len(),
            coverage = %self.config.coverage,
            "training converged"
        );
        Ok(self.report())
    }

    /// Discovery statistics plus the epoch history so far.
    pub fn report(&self) -> TrainingReport {
        TrainingReport {
            discovery: self.discovery,
            epochs: self.history.clone(),
        }
    }

    pub fn first(&self) -> &Agent {
        &self.first
    }

    pub fn second(&self) -> &Agent {
        &self.second
    }

    pub fn agent(&self, player: Player) -> &Agent {
        match player {
            Player::First => &self.first,
            Player::Second => &self.second,
        }
    }

    /// Give up ownership of `(player 1 agent, player 2 agent)`.
    pub fn into_agents(self) -> (Agent, Agent) {
        (self.first, self.second)
    }
}
