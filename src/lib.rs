//! # Othello Engine
//!
//! Othello (Reversi) on square boards of size 4, 6, 8 or 10, with a minimax
//! computer opponent that can use alpha-beta pruning and either a fixed
//! depth or a wall-clock budget.
//!
//! ## Modules
//!
//! - [`game`]: Board, move rules, turn skipping and undo
//! - [`ai`]: Search engine, heuristic, recorded search trees, agents
//! - [`persistence`]: Saving and loading games
//! - [`export`]: Writing the last search tree to a file
//! - [`session`]: Command surface for front ends
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod export;
pub mod game;
pub mod persistence;
pub mod session;
