//! Ports (interfaces) for the solver's collaborators
//!
//! The solver depends on a rule set only through [`GameRules`]; the row game
//! in [`crate::game`] is the adapter shipped with this crate.

pub mod rules;

pub use rules::GameRules;
