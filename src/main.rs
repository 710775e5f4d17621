use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use othello_engine::ai::{AiMode, Budget, Pruning};
use othello_engine::config::AppConfig;
use othello_engine::error::SessionError;
use othello_engine::game::{Cell, GameOutcome, GameStatus, Pos};
use othello_engine::session::{GameEvent, Session, Snapshot};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Depth,
    Time,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Depth => "depth",
            Mode::Time => "time",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Clone, Copy, ValueEnum)]
enum Ai {
    Disabled,
    Black,
    White,
}

/// Play Othello against a minimax opponent.
#[derive(Parser)]
#[command(name = "othello", about = "Play Othello against a minimax opponent")]
struct Cli {
    /// Board size for a new game: 4, 6, 8 or 10
    #[arg(long, conflicts_with = "load")]
    size: Option<usize>,

    /// Resume a saved game instead of starting a new one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Which side the computer plays
    #[arg(long, value_enum)]
    ai: Option<Ai>,

    /// Search budget kind: fixed depth or time in milliseconds
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Depth in plies or time in milliseconds, depending on --mode
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    param: Option<u64>,

    /// Alpha-beta pruning
    #[arg(long, value_enum)]
    prune: Option<Switch>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Do not record search trees for export
    #[arg(long)]
    no_tree: bool,
}

fn apply_overrides(cli: &Cli, config: &mut AppConfig) -> Result<()> {
    if let Some(size) = cli.size {
        config.game.size = size;
    }
    if let Some(ai) = cli.ai {
        config.search.ai = match ai {
            Ai::Disabled => AiMode::Disabled,
            Ai::Black => AiMode::Black,
            Ai::White => AiMode::White,
        };
    }
    if let Some(prune) = cli.prune {
        config.search.pruning = match prune {
            Switch::On => Pruning::On,
            Switch::Off => Pruning::Off,
        };
    }
    let configured = match config.search.budget {
        Budget::Depth(_) => Mode::Depth,
        Budget::Time(_) => Mode::Time,
    };
    let mode = cli.mode.unwrap_or(configured);
    let param = match cli.param {
        Some(param) => param,
        None if mode == configured => config.search.budget.value(),
        None => bail!("--mode {} needs an explicit --param", mode.name()),
    };
    config.search.budget = match mode {
        Mode::Depth => Budget::Depth(
            u32::try_from(param).with_context(|| format!("depth {param} is too large"))?,
        ),
        Mode::Time => Budget::Time(param),
    };
    if cli.no_tree {
        config.search.record_tree = false;
    }
    config.validate()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    apply_overrides(&cli, &mut config)?;

    let mut session = match &cli.load {
        Some(path) => Session::load_game(path, config.search)
            .with_context(|| format!("loading game from {}", path.display()))?,
        None => Session::new_game(config.game.size, config.search)?,
    };
    let events = session.subscribe();
    render(&session.snapshot());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        while session.is_computer_turn() {
            print!("computer is thinking... ");
            io::stdout().flush()?;
            session.start_computer_move()?;
            let pos = session.finish_computer_move()?;
            println!("plays {pos}");
            drain(&events);
        }

        print!("{} > ", session.current_side());
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let result = match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["move", row, col] | ["m", row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => session.apply_human_move(row, col),
                _ => {
                    println!("row and column must be numbers");
                    continue;
                }
            },
            ["cpu"] => session.request_computer_move().map(|pos| println!("computer plays {pos}")),
            ["undo"] => undo_to_human_turn(&mut session),
            ["save"] => session.save(&config.paths.save_file),
            ["save", path] => session.save(Path::new(*path)),
            ["load", path] => session.load(Path::new(*path)),
            ["export"] => export(&session, &config.paths.export_file),
            ["export", path] => export(&session, Path::new(*path)),
            ["new"] => session.restart(config.game.size),
            ["new", size] => match size.parse::<usize>() {
                Ok(size) => session.restart(size),
                Err(_) => {
                    println!("size must be a number");
                    continue;
                }
            },
            ["help"] => {
                print_help();
                continue;
            }
            _ => {
                println!("unknown command, try `help`");
                continue;
            }
        };
        if let Err(err) = result {
            println!("{err}");
        }
        drain(&events);
    }
    Ok(())
}

/// Undo one placement, then keep going while the computer would just replay.
fn undo_to_human_turn(session: &mut Session) -> Result<(), SessionError> {
    session.undo()?;
    while session.is_computer_turn() && !session.state().history().is_empty() {
        session.undo()?;
    }
    Ok(())
}

fn export(session: &Session, path: &Path) -> Result<(), SessionError> {
    if let Err(err) = session.export_last_search(path) {
        log::warn!("export failed: {err}");
    }
    Ok(())
}

fn drain(events: &mpsc::Receiver<GameEvent>) {
    for event in events.try_iter() {
        match event {
            GameEvent::BoardChanged(snapshot) => render(&snapshot),
            GameEvent::GameOver(GameOutcome::Winner(side)) => println!("game over: {side} wins"),
            GameEvent::GameOver(GameOutcome::Draw) => println!("game over: draw"),
        }
    }
}

fn render(snapshot: &Snapshot) {
    let size = snapshot.board.size();
    let header: String = (0..size).map(|c| format!(" {c}")).collect();
    println!("  {header}");
    for row in 0..size {
        let cells: String = (0..size)
            .map(|col| {
                let pos = Pos::new(row, col);
                let symbol = match snapshot.board.get(pos) {
                    Cell::Empty if snapshot.legal_moves.contains(&pos) => '*',
                    cell => cell.symbol(),
                };
                format!(" {symbol}")
            })
            .collect();
        println!("{row:>2}{cells}");
    }
    let (black, white) = snapshot.scores;
    match snapshot.status {
        GameStatus::InProgress => {
            println!("Black {black} - White {white}, {} to move", snapshot.current_side)
        }
        GameStatus::GameOver(_) => println!("Black {black} - White {white}, final"),
    }
}

fn print_help() {
    println!(
        "commands: move <row> <col> | cpu | undo | save [path] | load <path> | \
         export [path] | new [size] | quit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(args: &[&str]) -> Result<AppConfig> {
        let cli = Cli::parse_from(std::iter::once("othello").chain(args.iter().copied()));
        let mut config = AppConfig::default();
        apply_overrides(&cli, &mut config)?;
        Ok(config)
    }

    #[test]
    fn test_switching_mode_requires_param() {
        assert!(overrides(&["--mode", "time"]).is_err());
        let config = overrides(&["--mode", "time", "--param", "1500"]).unwrap();
        assert_eq!(config.search.budget, Budget::Time(1500));
    }

    #[test]
    fn test_same_mode_keeps_configured_value() {
        let config = overrides(&["--mode", "depth"]).unwrap();
        assert_eq!(config.search.budget, Budget::Depth(4));
        let config = overrides(&["--param", "6", "--prune", "off"]).unwrap();
        assert_eq!(config.search.budget, Budget::Depth(6));
        assert_eq!(config.search.pruning, Pruning::Off);
    }

    #[test]
    fn test_size_and_load_conflict() {
        assert!(Cli::try_parse_from(["othello", "--size", "6", "--load", "game.oga"]).is_err());
    }
}
