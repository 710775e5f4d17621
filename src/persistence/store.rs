use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, SaveError};
use crate::game::GameState;
use crate::persistence::record::SavedGame;

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `state` to `path` as JSON.
///
/// The file is written next to its destination and renamed into place, so an
/// existing save is never left half-written.
pub fn save_game(state: &GameState, path: &Path) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(&SavedGame::from_state(state))?;
    let tmp = tmp_path(path);
    if let Err(source) = fs::write(&tmp, json) {
        let _ = fs::remove_file(&tmp);
        return Err(SaveError::Write { path: tmp, source });
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SaveError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    log::info!(
        "saved game to {} ({} moves)",
        path.display(),
        state.history().len()
    );
    Ok(())
}

/// Read and fully validate a saved game. Nothing outside the returned value is
/// touched, so a failure leaves the caller's current game as it was.
pub fn load_game(path: &Path) -> Result<GameState, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let record: SavedGame = serde_json::from_str(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let state = record.into_state().map_err(|reason| LoadError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    log::info!(
        "loaded {}x{} game from {} ({} moves)",
        state.size(),
        state.size(),
        path.display(),
        state.history().len()
    );
    Ok(state)
}
