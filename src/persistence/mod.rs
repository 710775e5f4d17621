//! Saving and loading games as self-contained JSON records.

mod record;
mod store;

pub use record::{SavedGame, FORMAT_VERSION};
pub use store::{load_game, save_game};
