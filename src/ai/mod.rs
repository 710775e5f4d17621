mod agent;
pub mod config;
pub mod heuristic;
mod random;
pub mod search;
pub mod tree;

pub use agent::{Agent, SearchAgent};
pub use config::{AiMode, Budget, Pruning, SearchConfig};
pub use heuristic::{Heuristic, OthelloHeuristic};
pub use random::RandomAgent;
pub use search::{SearchEngine, SearchResult};
pub use tree::{SearchNode, SearchTree};
