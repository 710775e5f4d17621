//! Core Othello game logic: board representation, legality rules, sides, and
//! the turn controller with reversible history.

mod board;
mod player;
pub mod rules;
mod state;

pub use board::{Board, Cell, Pos, DIRECTIONS, SUPPORTED_SIZES};
pub use player::Side;
pub use state::{GameOutcome, GameState, GameStatus, Move};
