use serde::{Deserialize, Serialize};

use crate::error::ReplayError;
use crate::game::{Board, GameState, Move, Side};

pub const FORMAT_VERSION: u32 = 1;

/// On-disk form of a saved game.
///
/// The board and side are stored alongside the history so a file can be
/// checked for consistency: replaying `history` from the opening position
/// must reproduce both exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub size: usize,
    pub current_side: Side,
    pub board: Vec<String>,
    pub history: Vec<Move>,
}

impl SavedGame {
    pub fn from_state(state: &GameState) -> Self {
        SavedGame {
            version: FORMAT_VERSION,
            size: state.size(),
            current_side: state.current_side(),
            board: state.board().to_rows(),
            history: state.history().to_vec(),
        }
    }

    /// Rebuild the game and verify it against the stored board and side.
    pub fn into_state(self) -> Result<GameState, String> {
        if self.version != FORMAT_VERSION {
            return Err(format!("unsupported format version {}", self.version));
        }
        let stored = Board::from_rows(&self.board)
            .ok_or_else(|| "board rows are malformed".to_string())?;
        if stored.size() != self.size {
            return Err(format!(
                "board is {}x{} but size says {}",
                stored.size(),
                stored.size(),
                self.size
            ));
        }
        let state = GameState::replay(self.size, &self.history).map_err(|e: ReplayError| e.to_string())?;
        if *state.board() != stored {
            return Err("replayed history does not reproduce the stored board".into());
        }
        if state.current_side() != self.current_side {
            return Err(format!(
                "replayed history leaves {} to move, file says {}",
                state.current_side(),
                self.current_side
            ));
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Pos;

    fn played(size: usize, plies: usize) -> GameState {
        let mut state = GameState::new(size).unwrap();
        for _ in 0..plies {
            let pos = state.legal_moves()[0];
            state.apply_move(pos).unwrap();
        }
        state
    }

    #[test]
    fn test_roundtrip_through_record() {
        let state = played(8, 5);
        let restored = SavedGame::from_state(&state).into_state().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_json_shape() {
        let state = played(4, 1);
        let json = serde_json::to_string(&SavedGame::from_state(&state)).unwrap();
        assert!(json.contains("\"current_side\":\"white\""));
        assert!(json.contains("\"size\":4"));
    }

    #[test]
    fn test_rejects_board_mismatch() {
        let state = played(6, 3);
        let mut record = SavedGame::from_state(&state);
        record.board[0] = "BBBBBB".into();
        assert!(record.into_state().is_err());
    }

    #[test]
    fn test_rejects_side_mismatch() {
        let state = played(6, 2);
        let mut record = SavedGame::from_state(&state);
        record.current_side = record.current_side.other();
        let err = record.into_state().unwrap_err();
        assert!(err.contains("to move"), "{err}");
    }

    #[test]
    fn test_rejects_illegal_history() {
        let state = played(8, 1);
        let mut record = SavedGame::from_state(&state);
        record.history[0].pos = Pos::new(0, 0);
        assert!(record.into_state().is_err());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut record = SavedGame::from_state(&played(4, 0));
        record.version = 99;
        assert!(record.into_state().unwrap_err().contains("version"));
    }
}
