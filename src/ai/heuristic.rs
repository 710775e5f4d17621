use crate::game::{rules, Board, Side};

/// Trait for evaluating a board position from a side's perspective.
///
/// Implementations must be pure: the same board and side always give the same
/// score.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, side: Side) -> f64;
}

/// Disc differential, mobility differential and positional weighting.
///
/// A finished game (full board, or neither side able to move) scores only the
/// disc differential, scaled so that any win outranks any unfinished position.
#[derive(Debug, Clone, Copy, Default)]
pub struct OthelloHeuristic;

impl OthelloHeuristic {
    pub const DISC_WEIGHT: f64 = 1.0;
    pub const MOBILITY_WEIGHT: f64 = 2.0;
    pub const CORNER_BONUS: f64 = 20.0;
    pub const EDGE_BONUS: f64 = 3.0;
    pub const FINAL_WEIGHT: f64 = 1000.0;

    fn positional(board: &Board, side: Side) -> f64 {
        let own = side.to_cell();
        let opp = side.other().to_cell();
        let mut score = 0.0;
        for pos in board.positions() {
            let bonus = if board.is_corner(pos) {
                Self::CORNER_BONUS
            } else if board.is_edge(pos) {
                Self::EDGE_BONUS
            } else {
                continue;
            };
            let cell = board.get(pos);
            if cell == own {
                score += bonus;
            } else if cell == opp {
                score -= bonus;
            }
        }
        score
    }
}

impl Heuristic for OthelloHeuristic {
    fn evaluate(&self, board: &Board, side: Side) -> f64 {
        let own_discs = board.count(side.to_cell()) as f64;
        let opp_discs = board.count(side.other().to_cell()) as f64;
        let disc_diff = own_discs - opp_discs;

        let own_moves = rules::legal_moves(board, side).len() as f64;
        let opp_moves = rules::legal_moves(board, side.other()).len() as f64;

        if board.is_full() || (own_moves == 0.0 && opp_moves == 0.0) {
            return Self::FINAL_WEIGHT * disc_diff;
        }

        Self::DISC_WEIGHT * disc_diff
            + Self::MOBILITY_WEIGHT * (own_moves - opp_moves)
            + Self::positional(board, side)
    }
}
