//! Command surface for front ends.
//!
//! A [`Session`] owns the single live game. Front ends drive it only through
//! its commands and observe it only through its queries and [`GameEvent`]s.
//! Every board mutation, human or computer, goes through
//! [`GameState::apply_move`].

use std::path::Path;
use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::ai::{SearchConfig, SearchEngine, SearchResult};
use crate::error::{ConfigError, LoadError, SearchError, SessionError};
use crate::export::TreeExporter;
use crate::game::{Board, GameOutcome, GameState, GameStatus, Pos, Side};
use crate::persistence;

/// Read-only view of the game handed to front ends after each change.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub current_side: Side,
    /// Cells the side to move may play; front ends mark these as available.
    pub legal_moves: Vec<Pos>,
    /// Disc counts as (black, white).
    pub scores: (usize, usize),
    pub status: GameStatus,
    pub moves_played: usize,
}

impl Snapshot {
    fn of(state: &GameState) -> Self {
        Snapshot {
            board: state.board().clone(),
            current_side: state.current_side(),
            legal_moves: state.legal_moves(),
            scores: state.scores(),
            status: state.status(),
            moves_played: state.history().len(),
        }
    }
}

/// Notifications sent to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BoardChanged(Snapshot),
    GameOver(GameOutcome),
}

type PendingSearch = JoinHandle<Result<SearchResult, SearchError>>;

pub struct Session {
    state: GameState,
    config: SearchConfig,
    engine: SearchEngine,
    exporter: TreeExporter,
    pending: Option<PendingSearch>,
    subscribers: Vec<mpsc::Sender<GameEvent>>,
}

impl Session {
    /// Start a fresh game of `size`.
    pub fn new_game(size: usize, config: SearchConfig) -> Result<Self, ConfigError> {
        let state = GameState::new(size)?;
        log::info!("new {size}x{size} game, computer plays {:?}", config.ai);
        Ok(Self::with_state(state, config))
    }

    /// Start from a saved game.
    pub fn load_game(path: &Path, config: SearchConfig) -> Result<Self, LoadError> {
        let state = persistence::load_game(path)?;
        Ok(Self::with_state(state, config))
    }

    fn with_state(state: GameState, config: SearchConfig) -> Self {
        Session {
            state,
            config,
            engine: SearchEngine::new(),
            exporter: TreeExporter::new(),
            pending: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive an event for every subsequent change.
    pub fn subscribe(&mut self) -> mpsc::Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, was_over: bool) {
        let mut events = vec![GameEvent::BoardChanged(Snapshot::of(&self.state))];
        if let (false, Some(outcome)) = (was_over, self.state.outcome()) {
            log::info!("game over: {outcome:?}, score {:?}", self.state.scores());
            events.push(GameEvent::GameOver(outcome));
        }
        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::SearchInProgress);
        }
        Ok(())
    }

    fn apply(&mut self, pos: Pos) -> Result<(), SessionError> {
        let was_over = self.state.is_game_over();
        let mv = self.state.apply_move(pos)?;
        log::debug!(
            "{} played {} flipping {}{}",
            mv.side,
            mv.pos,
            mv.flips.len(),
            if mv.passed { ", opponent passes" } else { "" }
        );
        self.notify(was_over);
        Ok(())
    }

    /// Replace the current game with a fresh one, keeping the search settings.
    pub fn restart(&mut self, size: usize) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.state = GameState::new(size)?;
        self.exporter.record(None);
        log::info!("new {size}x{size} game");
        self.notify(false);
        Ok(())
    }

    /// Replace the current game with one loaded from `path`. On failure the
    /// current game is untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let state = persistence::load_game(path)?;
        self.state = state;
        self.exporter.record(None);
        self.notify(false);
        Ok(())
    }

    /// Play a move for the side to move on behalf of a human.
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.apply(Pos::new(row, col))
    }

    fn check_can_search(&self) -> Result<Side, SessionError> {
        self.ensure_idle()?;
        let side = self.state.current_side();
        if !self.state.current_player_can_move() {
            return Err(SearchError::NoLegalMove { side }.into());
        }
        Ok(side)
    }

    fn apply_search(&mut self, mut result: SearchResult) -> Result<Pos, SessionError> {
        log::info!(
            "computer chose {} (value {}, depth {}, {} nodes, {:?})",
            result.best_move,
            result.value,
            result.depth,
            result.nodes,
            result.elapsed
        );
        self.exporter.record(result.tree.take());
        self.apply(result.best_move)?;
        Ok(result.best_move)
    }

    /// Search and play a move for the side to move, blocking until done.
    pub fn request_computer_move(&mut self) -> Result<Pos, SessionError> {
        let side = self.check_can_search()?;
        let result = self.engine.search(&self.state, side, self.config)?;
        self.apply_search(result)
    }

    /// Start searching on a worker thread against a snapshot of the game.
    ///
    /// Until [`Session::finish_computer_move`] is called, every mutating
    /// command fails with [`SessionError::SearchInProgress`].
    pub fn start_computer_move(&mut self) -> Result<(), SessionError> {
        let side = self.check_can_search()?;
        let snapshot = self.state.clone();
        let engine = self.engine.clone();
        let config = self.config;
        self.pending = Some(std::thread::spawn(move || {
            engine.search(&snapshot, side, config)
        }));
        Ok(())
    }

    pub fn is_search_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a started search has finished and can be collected without
    /// blocking.
    pub fn is_search_finished(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| h.is_finished())
    }

    /// Wait for the worker started by [`Session::start_computer_move`] and
    /// play its move.
    pub fn finish_computer_move(&mut self) -> Result<Pos, SessionError> {
        let handle = self.pending.take().ok_or(SessionError::NoSearchPending)?;
        let result = handle.join().map_err(|_| SessionError::WorkerPanicked)??;
        self.apply_search(result)
    }

    /// Take back the last disc placement.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let mv = self.state.undo()?;
        log::debug!("undid {} at {}", mv.side, mv.pos);
        self.notify(true);
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        self.ensure_idle()?;
        persistence::save_game(&self.state, path)?;
        Ok(())
    }

    /// Write the tree of the most recent computer move.
    pub fn export_last_search(&self, path: &Path) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.exporter.export(path)?;
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn legal_moves(&self) -> Vec<Pos> {
        self.state.legal_moves()
    }

    /// Disc counts as (black, white).
    pub fn scores(&self) -> (usize, usize) {
        self.state.scores()
    }

    pub fn current_side(&self) -> Side {
        self.state.current_side()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    /// Whether the configured computer side is to move in a live game.
    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_game_over() && self.config.ai.computer_side() == Some(self.state.current_side())
    }
}
