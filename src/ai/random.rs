use crate::game::{GameState, Pos};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Pos> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        Some(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::new();
        let state = GameState::new(8).unwrap();
        let legal = state.legal_moves();

        for _ in 0..100 {
            let mv = agent.select_move(&state).unwrap();
            assert!(legal.contains(&mv), "Move {mv} is not legal");
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent = RandomAgent::with_seed(7);
        let mut state = GameState::new(8).unwrap();

        while !state.is_game_over() {
            let mv = agent.select_move(&state).unwrap();
            state.apply_move(mv).unwrap();
        }

        assert!(state.outcome().is_some());
        assert!(agent.select_move(&state).is_none());
    }

    #[test]
    fn test_seeded_agents_agree() {
        let state = GameState::new(8).unwrap();
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.select_move(&state), b.select_move(&state));
        }
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
