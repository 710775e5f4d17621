use crate::ai::config::SearchConfig;
use crate::ai::search::SearchEngine;
use crate::game::{GameState, Pos};

/// Universal interface for computer players.
pub trait Agent {
    /// Pick a move for the side to move, or `None` if it has no legal move.
    fn select_move(&mut self, state: &GameState) -> Option<Pos>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Agent backed by the minimax search engine.
pub struct SearchAgent {
    engine: SearchEngine,
    config: SearchConfig,
}

impl SearchAgent {
    pub fn new(config: SearchConfig) -> Self {
        SearchAgent {
            engine: SearchEngine::new(),
            config,
        }
    }
}

impl Agent for SearchAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Pos> {
        self.engine
            .search(state, state.current_side(), self.config)
            .ok()
            .map(|result| result.best_move)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
