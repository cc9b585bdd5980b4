//! Saving solved agents and exporting their policies
//!
//! Full tables (values, visit epochs and all) are stored as MessagePack via
//! [`SavedAgents`]. [`PolicyExport`] is the human-readable JSON view: one
//! value and the optimal moves per position.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{agent::Agent, value::Value};
use crate::{Error, Result, config::Coverage, game::Player, types::check_board_size};

/// Serializable pair of solved agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAgents {
    /// Version of the save format
    pub version: u32,
    pub board_size: usize,
    /// Coverage the tables were trained with
    pub coverage: Coverage,
    pub first: Agent,
    pub second: Agent,
}

impl SavedAgents {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(first: Agent, second: Agent, coverage: Coverage) -> Result<Self> {
        let saved = Self {
            version: Self::VERSION,
            board_size: first.board_size(),
            coverage,
            first,
            second,
        };
        saved.validate()?;
        Ok(saved)
    }

    /// Check that the pair is consistent and in the current format.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Error::SerializationContext {
            operation: "validate saved agents".to_string(),
            message,
        };

        if self.version != Self::VERSION {
            return Err(invalid(format!(
                "unsupported save format version {}, expected {}",
                self.version,
                Self::VERSION
            )));
        }
        check_board_size(self.board_size).map_err(|e| invalid(e.to_string()))?;
        if self.first.player() != Player::First || self.second.player() != Player::Second {
            return Err(invalid("agents are stored in the wrong order".to_string()));
        }
        for agent in [&self.first, &self.second] {
            if agent.board_size() != self.board_size {
                return Err(invalid(format!(
                    "player {} table is for {} cells, expected {}",
                    agent.player(),
                    agent.board_size(),
                    self.board_size
                )));
            }
        }
        Ok(())
    }

    /// Split into `(player 1 agent, player 2 agent)`.
    pub fn into_agents(self) -> (Agent, Agent) {
        (self.first, self.second)
    }

    /// Write the agents as MessagePack.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).map_err(|e| Error::SerializationContext {
            operation: "serialize agents to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })
    }

    /// Read agents written by [`SavedAgents::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedAgents = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize agents from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        saved.validate()?;
        Ok(saved)
    }
}

/// Value and optimal moves of one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePolicy {
    pub value: Value,
    pub optimal_actions: Vec<usize>,
}

/// JSON view of both players' policies, keyed by position label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyExport {
    pub board_size: usize,
    pub first: BTreeMap<String, StatePolicy>,
    pub second: BTreeMap<String, StatePolicy>,
}

impl PolicyExport {
    pub fn from_agents(first: &Agent, second: &Agent) -> Result<Self> {
        Ok(Self {
            board_size: first.board_size(),
            first: Self::policies(first)?,
            second: Self::policies(second)?,
        })
    }

    fn policies(agent: &Agent) -> Result<BTreeMap<String, StatePolicy>> {
        agent
            .states()
            .map(|state| {
                let policy = StatePolicy {
                    value: agent.value_of(state)?,
                    optimal_actions: agent
                        .optimal_actions(state)?
                        .into_iter()
                        .map(usize::from)
                        .collect(),
                };
                Ok((agent.label(state), policy))
            })
            .collect()
    }

    /// Policy of `player` at the position labelled `label`.
    pub fn lookup(&self, player: Player, label: &str) -> Option<&StatePolicy> {
        match player {
            Player::First => self.first.get(label),
            Player::Second => self.second.get(label),
        }
    }

    /// Write pretty-printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
