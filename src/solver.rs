//! Exhaustive solver: state encoding, value tables and backward induction

pub mod agent;
pub mod discovery;
pub mod encoding;
pub mod engine;
pub mod reward;
pub mod serialization;
pub mod training;
pub mod value;

pub use agent::{ActionTable, Agent};
pub use discovery::{DiscoveryStats, discover};
pub use encoding::{EncodedLabel, EncodedState};
pub use engine::{Solver, TrainingReport};
pub use reward::{Epoch, RewardEntry};
pub use serialization::{PolicyExport, SavedAgents, StatePolicy};
pub use training::{EpochReport, train_epoch};
pub use value::Value;
