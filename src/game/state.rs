use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Pos};
use super::player::Side;
use super::rules;
use crate::error::{ConfigError, MoveError, ReplayError, UndoError};

/// One applied disc placement, with enough information to reverse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub pos: Pos,
    pub side: Side,
    pub flips: Vec<Pos>,
    /// The opponent had no reply, so `side` moved again.
    #[serde(default)]
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
}

impl GameOutcome {
    fn from_scores(black: usize, white: usize) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Side::Black),
            std::cmp::Ordering::Less => GameOutcome::Winner(Side::White),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    GameOver(GameOutcome),
}

/// Live game: board, side to move, and the full move history.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_side: Side,
    history: Vec<Move>,
    status: GameStatus,
}

impl GameState {
    /// Fresh game of the given size. Black moves first.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_position(Board::new(size)?, Side::Black))
    }

    /// Start from an arbitrary position with an empty history.
    ///
    /// The side to move is taken as given, even if it has no legal move; call
    /// [`GameState::advance_turn`] to resolve that.
    pub fn from_position(board: Board, side: Side) -> Self {
        let status = if board.is_full()
            || (!rules::has_legal_move(&board, side) && !rules::has_legal_move(&board, side.other()))
        {
            let (black, white) = board.scores();
            GameStatus::GameOver(GameOutcome::from_scores(black, white))
        } else {
            GameStatus::InProgress
        };
        GameState {
            board,
            current_side: side,
            history: Vec::new(),
            status,
        }
    }

    /// Rebuild a game by replaying `moves` from the opening position.
    pub fn replay(size: usize, moves: &[Move]) -> Result<Self, ReplayError> {
        let mut state = Self::new(size).map_err(ReplayError::Config)?;
        for (index, mv) in moves.iter().enumerate() {
            if mv.side != state.current_side {
                return Err(ReplayError::WrongSide {
                    index,
                    expected: state.current_side,
                });
            }
            let applied = state
                .apply_move(mv.pos)
                .map_err(|source| ReplayError::Illegal { index, source })?;
            if applied.flips != mv.flips {
                return Err(ReplayError::FlipMismatch { index });
            }
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::GameOver(outcome) => Some(outcome),
            GameStatus::InProgress => None,
        }
    }

    /// Disc counts as (black, white).
    pub fn scores(&self) -> (usize, usize) {
        self.board.scores()
    }

    /// Legal targets for the side to move, row-major.
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.is_game_over() {
            return Vec::new();
        }
        rules::legal_moves(&self.board, self.current_side)
    }

    /// Whether the side to move has at least one legal move.
    pub fn current_player_can_move(&self) -> bool {
        !self.is_game_over() && rules::has_legal_move(&self.board, self.current_side)
    }

    /// Place a disc for the side to move, then advance the turn.
    ///
    /// An illegal move returns an error and leaves the state untouched.
    pub fn apply_move(&mut self, pos: Pos) -> Result<&Move, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let side = self.current_side;
        let flips = rules::apply(&mut self.board, pos, side)?;
        self.history.push(Move {
            pos,
            side,
            flips,
            passed: false,
        });
        self.hand_over_turn();

        let passed = !self.is_game_over() && self.current_side == side;
        let last = self.history.len() - 1;
        self.history[last].passed = passed;
        Ok(&self.history[last])
    }

    /// Resolve a forced pass: when the side to move has no legal move, hand
    /// the turn over, or end the game if neither side can move. Does nothing
    /// while the side to move can still play.
    pub fn advance_turn(&mut self) {
        if self.is_game_over() || rules::has_legal_move(&self.board, self.current_side) {
            return;
        }
        self.hand_over_turn();
    }

    /// Pass the turn on from `current_side`, skipping an opponent who cannot
    /// move and ending the game when neither side can.
    fn hand_over_turn(&mut self) {
        match rules::next_to_move(&self.board, self.current_side) {
            Some(side) => self.current_side = side,
            None => {
                let (black, white) = self.board.scores();
                self.status = GameStatus::GameOver(GameOutcome::from_scores(black, white));
            }
        }
    }

    /// Take back the most recent disc placement, including any pass that
    /// followed it.
    pub fn undo(&mut self) -> Result<Move, UndoError> {
        let mv = self.history.pop().ok_or(UndoError::NoHistory)?;
        let opponent = mv.side.other().to_cell();
        self.board.set(mv.pos, Cell::Empty);
        for &p in &mv.flips {
            self.board.set(p, opponent);
        }
        self.current_side = mv.side;
        self.status = GameStatus::InProgress;
        Ok(mv)
    }
}
