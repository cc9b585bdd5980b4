//! Command-line front end for the row game solver
//!
//! Commands solve a board length, inspect single positions of a solved
//! table, or play an interactive game against the solver.

pub mod commands;
pub mod config;
pub mod output;
