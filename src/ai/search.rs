//! Minimax search with optional alpha-beta pruning.
//!
//! Values are always taken from the searching side's point of view: plies
//! where that side moves maximise, the opponent's plies minimise. Children are
//! generated in row-major order and a move only replaces the incumbent when it
//! is strictly better, so the pruned and unpruned searches choose the same
//! move for the same position and depth.

use std::time::{Duration, Instant};

use crate::ai::config::{Budget, SearchConfig};
use crate::ai::heuristic::{Heuristic, OthelloHeuristic};
use crate::ai::tree::SearchTree;
use crate::error::SearchError;
use crate::game::{rules, Board, Cell, GameState, Pos, Side};

/// Outcome of one search call.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Pos,
    /// Backed-up value of `best_move` for the searching side.
    pub value: f64,
    /// Deepest fully completed depth.
    pub depth: u32,
    /// Nodes visited across every iteration of this call.
    pub nodes: u64,
    pub elapsed: Duration,
    pub tree: Option<SearchTree>,
}

/// A search-local position. `to_move` is `None` once the game has ended.
#[derive(Debug, Clone)]
struct Position {
    board: Board,
    to_move: Option<Side>,
}

impl Position {
    fn play(&self, pos: Pos, side: Side) -> Option<Position> {
        let mut board = self.board.clone();
        rules::apply(&mut board, pos, side).ok()?;
        let to_move = rules::next_to_move(&board, side);
        Some(Position { board, to_move })
    }
}

/// Per-call search context.
struct Searcher<'a, H> {
    heuristic: &'a H,
    side: Side,
    pruning: bool,
    deadline: Option<Instant>,
    nodes: u64,
    tree: Option<SearchTree>,
}

impl<H: Heuristic> Searcher<'_, H> {
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn record_child(&mut self, parent: Option<usize>, mv: Pos, side: Side, ply: u32) -> Option<usize> {
        let (tree, parent) = (self.tree.as_mut()?, parent?);
        Some(tree.add_child(parent, mv, side, ply))
    }

    fn record_value(&mut self, node: Option<usize>, value: f64) {
        if let (Some(tree), Some(id)) = (self.tree.as_mut(), node) {
            tree.set_value(id, value);
        }
    }

    fn record_pruned(&mut self, parent: Option<usize>, moves: &[Pos], side: Side, ply: u32) {
        if let (Some(tree), Some(parent)) = (self.tree.as_mut(), parent) {
            for &mv in moves {
                tree.add_pruned(parent, mv, side, ply);
            }
        }
    }

    /// Search every root move to `depth` plies. `None` if the deadline passed.
    fn search_root(&mut self, root: &Position, depth: u32) -> Option<(Pos, f64)> {
        let node = self.tree.as_ref().map(|_| SearchTree::ROOT);
        let mut best: Option<(Pos, f64)> = None;

        for mv in rules::legal_moves(&root.board, self.side) {
            let Some(child) = root.play(mv, self.side) else {
                continue;
            };
            let child_node = self.record_child(node, mv, self.side, 1);
            let alpha = match best {
                Some((_, value)) if self.pruning => value,
                _ => f64::NEG_INFINITY,
            };
            let value = self.minimax(&child, depth - 1, 1, alpha, f64::INFINITY, child_node)?;
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((mv, value));
            }
        }

        if let Some((mv, value)) = best {
            self.record_value(node, value);
            if let Some(tree) = self.tree.as_mut() {
                tree.best = Some(mv);
            }
        }
        best
    }

    fn minimax(
        &mut self,
        pos: &Position,
        depth: u32,
        ply: u32,
        mut alpha: f64,
        mut beta: f64,
        node: Option<usize>,
    ) -> Option<f64> {
        self.nodes += 1;
        if self.out_of_time() {
            return None;
        }

        let to_move = match pos.to_move {
            Some(side) if depth > 0 => side,
            _ => {
                let value = self.heuristic.evaluate(&pos.board, self.side);
                self.record_value(node, value);
                return Some(value);
            }
        };

        let maximizing = to_move == self.side;
        let moves = rules::legal_moves(&pos.board, to_move);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (i, &mv) in moves.iter().enumerate() {
            let Some(child) = pos.play(mv, to_move) else {
                continue;
            };
            let child_node = self.record_child(node, mv, to_move, ply + 1);
            let value = self.minimax(&child, depth - 1, ply + 1, alpha, beta, child_node)?;
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.pruning && alpha >= beta {
                self.record_pruned(node, &moves[i + 1..], to_move, ply + 1);
                break;
            }
        }

        self.record_value(node, best);
        Some(best)
    }
}

/// Move search engine, parameterised by its evaluator.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine<H = OthelloHeuristic> {
    heuristic: H,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine {
            heuristic: OthelloHeuristic,
        }
    }
}

impl<H: Heuristic> SearchEngine<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        SearchEngine { heuristic }
    }

    /// Choose a move for `side` in the position held by `state`.
    ///
    /// The state is only read. Returns [`SearchError::NoLegalMove`] when
    /// `side` cannot play.
    pub fn search(
        &self,
        state: &GameState,
        side: Side,
        config: SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        let root = Position {
            board: state.board().clone(),
            to_move: Some(side),
        };
        if state.is_game_over() || !rules::has_legal_move(&root.board, side) {
            return Err(SearchError::NoLegalMove { side });
        }

        let start = Instant::now();
        let result = match config.budget {
            Budget::Depth(depth) => self.fixed_depth(&root, side, depth.max(1), config, start),
            Budget::Time(millis) => {
                self.iterative(&root, side, Duration::from_millis(millis), config, start)
            }
        };
        result.ok_or(SearchError::NoLegalMove { side })
    }

    fn searcher(&self, side: Side, depth: u32, config: SearchConfig) -> Searcher<'_, H> {
        Searcher {
            heuristic: &self.heuristic,
            side,
            pruning: config.pruning_enabled(),
            deadline: None,
            nodes: 0,
            tree: config
                .record_tree
                .then(|| SearchTree::new(side, depth, config.pruning, config.budget)),
        }
    }

    fn fixed_depth(
        &self,
        root: &Position,
        side: Side,
        depth: u32,
        config: SearchConfig,
        start: Instant,
    ) -> Option<SearchResult> {
        let mut searcher = self.searcher(side, depth, config);
        let (best_move, value) = searcher.search_root(root, depth)?;
        log::debug!(
            "{side} depth {depth}: best {best_move} value {value} ({} nodes)",
            searcher.nodes
        );
        Some(SearchResult {
            best_move,
            value,
            depth,
            nodes: searcher.nodes,
            elapsed: start.elapsed(),
            tree: searcher.tree,
        })
    }

    /// Deepen one ply at a time until the budget runs out. A depth cut short
    /// by the deadline is discarded; depth 1 always completes.
    fn iterative(
        &self,
        root: &Position,
        side: Side,
        budget: Duration,
        config: SearchConfig,
        start: Instant,
    ) -> Option<SearchResult> {
        let deadline = start + budget;
        // Deeper than the number of empty cells explores nothing new.
        let max_depth = root.board.count(Cell::Empty).max(1) as u32;
        let mut best: Option<SearchResult> = None;
        let mut total_nodes = 0;

        for depth in 1..=max_depth {
            let mut searcher = self.searcher(side, depth, config);
            if depth > 1 {
                searcher.deadline = Some(deadline);
            }
            let completed = searcher.search_root(root, depth);
            total_nodes += searcher.nodes;
            let Some((best_move, value)) = completed else {
                log::debug!("{side} depth {depth} abandoned at deadline");
                break;
            };
            log::debug!(
                "{side} depth {depth}: best {best_move} value {value} ({} nodes, {:?})",
                searcher.nodes,
                start.elapsed()
            );
            best = Some(SearchResult {
                best_move,
                value,
                depth,
                nodes: total_nodes,
                elapsed: start.elapsed(),
                tree: searcher.tree,
            });
            if start.elapsed() >= budget {
                break;
            }
        }

        best.map(|mut result| {
            result.nodes = total_nodes;
            result.elapsed = start.elapsed();
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::config::Pruning;

    fn board_from(rows: &[&str]) -> Board {
        let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
        Board::from_rows(&rows).unwrap()
    }

    fn midgame() -> GameState {
        let mut state = GameState::new(8).unwrap();
        for pos in [(2, 3), (2, 2), (2, 1), (1, 1), (4, 5), (5, 5)] {
            state.apply_move(Pos::new(pos.0, pos.1)).unwrap();
        }
        state
    }

    #[test]
    fn selects_legal_move() {
        let engine = SearchEngine::new();
        let state = GameState::new(8).unwrap();
        let result = engine
            .search(&state, Side::Black, SearchConfig::depth(3))
            .unwrap();
        assert!(state.legal_moves().contains(&result.best_move));
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn search_does_not_mutate_state() {
        let engine = SearchEngine::new();
        let state = midgame();
        let before = state.clone();
        engine
            .search(&state, state.current_side(), SearchConfig::depth(3))
            .unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn takes_corner_when_available() {
        // Black can take the corner at (0,0) by flipping (1,1).
        let board = board_from(&[
            "......",
            ".W....",
            "..BB..",
            "..BW..",
            "......",
            "......",
        ]);
        let state = GameState::from_position(board, Side::Black);
        let engine = SearchEngine::new();
        let result = engine
            .search(&state, Side::Black, SearchConfig::depth(1))
            .unwrap();
        assert_eq!(result.best_move, Pos::new(0, 0));
    }

    #[test]
    fn pruning_preserves_choice_and_reduces_nodes() {
        let engine = SearchEngine::new();
        let state = midgame();
        let side = state.current_side();
        for depth in 1..=4 {
            let on = engine
                .search(&state, side, SearchConfig::depth(depth))
                .unwrap();
            let off = engine
                .search(&state, side, SearchConfig::depth(depth).with_pruning(Pruning::Off))
                .unwrap();
            assert_eq!(on.best_move, off.best_move, "depth {depth}");
            assert_eq!(on.value, off.value, "depth {depth}");
            assert!(on.nodes <= off.nodes, "depth {depth}: {} > {}", on.nodes, off.nodes);
        }
    }

    #[test]
    fn pruning_cuts_some_nodes_at_depth_four() {
        let engine = SearchEngine::new();
        let state = midgame();
        let side = state.current_side();
        let on = engine.search(&state, side, SearchConfig::depth(4)).unwrap();
        let off = engine
            .search(&state, side, SearchConfig::depth(4).with_pruning(Pruning::Off))
            .unwrap();
        assert!(on.nodes < off.nodes);
        assert!(on.tree.unwrap().pruned_count() > 0);
        assert_eq!(off.tree.unwrap().pruned_count(), 0);
    }

    #[test]
    fn search_is_deterministic() {
        let engine = SearchEngine::new();
        let state = midgame();
        let side = state.current_side();
        let a = engine.search(&state, side, SearchConfig::depth(3)).unwrap();
        let b = engine.search(&state, side, SearchConfig::depth(3)).unwrap();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.tree, b.tree);
    }

    #[test]
    fn no_legal_move_is_an_error() {
        let board = board_from(&[
            "BW..",
            "....",
            "....",
            "....",
        ]);
        let state = GameState::from_position(board, Side::White);
        let engine = SearchEngine::new();
        let err = engine
            .search(&state, Side::White, SearchConfig::depth(2))
            .unwrap_err();
        assert_eq!(err, SearchError::NoLegalMove { side: Side::White });
    }

    #[test]
    fn timed_search_completes_at_least_one_depth() {
        let engine = SearchEngine::new();
        let state = midgame();
        let result = engine
            .search(&state, state.current_side(), SearchConfig::timed(1))
            .unwrap();
        assert!(result.depth >= 1);
        assert!(state.legal_moves().contains(&result.best_move));
    }

    #[test]
    fn timed_search_matches_fixed_depth_at_completed_depth() {
        let engine = SearchEngine::new();
        let state = midgame();
        let side = state.current_side();
        let timed = engine.search(&state, side, SearchConfig::timed(200)).unwrap();
        let fixed = engine
            .search(&state, side, SearchConfig::depth(timed.depth))
            .unwrap();
        assert_eq!(timed.best_move, fixed.best_move);
        assert_eq!(timed.tree.unwrap().depth, timed.depth);
    }

    #[test]
    fn timed_search_stops_at_end_of_game() {
        // Two empty cells: depth can never exceed two, so the loop ends early.
        let board = board_from(&["BBBB", "BWWB", "BWW.", "BBB."]);
        let state = GameState::from_position(board, Side::Black);
        let engine = SearchEngine::new();
        let result = engine
            .search(&state, Side::Black, SearchConfig::timed(60_000))
            .unwrap();
        assert!(result.depth <= 2);
    }

    #[test]
    fn tree_is_skipped_when_recording_disabled() {
        let engine = SearchEngine::new();
        let state = GameState::new(6).unwrap();
        let config = SearchConfig {
            record_tree: false,
            ..SearchConfig::depth(2)
        };
        let result = engine.search(&state, Side::Black, config).unwrap();
        assert!(result.tree.is_none());
    }

    #[test]
    fn tree_root_value_matches_result() {
        let engine = SearchEngine::new();
        let state = GameState::new(6).unwrap();
        let result = engine
            .search(&state, Side::Black, SearchConfig::depth(2))
            .unwrap();
        let tree = result.tree.unwrap();
        assert_eq!(tree.root().value, Some(result.value));
        assert_eq!(tree.best, Some(result.best_move));
        assert_eq!(tree.root().children.len(), 4);
    }
}
