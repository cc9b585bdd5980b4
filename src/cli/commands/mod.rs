//! Subcommands of the `rowgame` binary

pub mod inspect;
pub mod play;
pub mod solve;
