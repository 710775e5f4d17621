//! Legality and flip computation. Everything here is a pure function of a
//! [`Board`] and the side placing a disc.

use super::board::{Board, Cell, Pos, DIRECTIONS};
use super::player::Side;
use crate::error::MoveError;

/// Discs flipped along a single ray, or empty if the ray does not bracket.
fn flips_along(board: &Board, from: Pos, dir: (isize, isize), side: Side) -> Vec<Pos> {
    let own = side.to_cell();
    let mut run = Vec::new();
    for pos in board.ray(from, dir) {
        match board.get(pos) {
            Cell::Empty => return Vec::new(),
            cell if cell == own => return run,
            _ => run.push(pos),
        }
    }
    Vec::new()
}

fn brackets(board: &Board, from: Pos, dir: (isize, isize), side: Side) -> bool {
    let own = side.to_cell();
    let mut seen_opponent = false;
    for pos in board.ray(from, dir) {
        match board.get(pos) {
            Cell::Empty => return false,
            cell if cell == own => return seen_opponent,
            _ => seen_opponent = true,
        }
    }
    false
}

/// Every disc `side` would flip by playing at `pos`, scanning rays in
/// [`DIRECTIONS`] order. Empty when the move is illegal.
pub fn flips_for(board: &Board, pos: Pos, side: Side) -> Vec<Pos> {
    if !board.contains(pos.row, pos.col) || board.get(pos) != Cell::Empty {
        return Vec::new();
    }
    DIRECTIONS
        .iter()
        .flat_map(|&dir| flips_along(board, pos, dir, side))
        .collect()
}

/// Whether `side` may play at `pos`. Cheaper than `!flips_for(..).is_empty()`.
pub fn is_legal(board: &Board, pos: Pos, side: Side) -> bool {
    board.contains(pos.row, pos.col)
        && board.get(pos) == Cell::Empty
        && DIRECTIONS.iter().any(|&dir| brackets(board, pos, dir, side))
}

/// Legal targets for `side` in canonical row-major order.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Pos> {
    board
        .positions()
        .filter(|&pos| is_legal(board, pos, side))
        .collect()
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    board.positions().any(|pos| is_legal(board, pos, side))
}

/// Place a disc for `side` at `pos` and flip every bracketed disc.
///
/// Returns the flipped positions. An illegal move leaves the board untouched.
pub fn apply(board: &mut Board, pos: Pos, side: Side) -> Result<Vec<Pos>, MoveError> {
    if !board.contains(pos.row, pos.col) {
        return Err(MoveError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            size: board.size(),
        });
    }
    if board.get(pos) != Cell::Empty {
        return Err(MoveError::Occupied {
            row: pos.row,
            col: pos.col,
        });
    }
    let flips = flips_for(board, pos, side);
    if flips.is_empty() {
        return Err(MoveError::NoFlips {
            row: pos.row,
            col: pos.col,
            side,
        });
    }
    board.set(pos, side.to_cell());
    for &p in &flips {
        board.set(p, side.to_cell());
    }
    Ok(flips)
}

/// Side to move after `mover` has placed a disc, or `None` when the game is
/// over.
///
/// The opponent moves next if it can; otherwise its turn is skipped and
/// `mover` goes again. If neither side can move, or the board is full, the
/// game ends.
pub fn next_to_move(board: &Board, mover: Side) -> Option<Side> {
    if board.is_full() {
        return None;
    }
    let opponent = mover.other();
    if has_legal_move(board, opponent) {
        Some(opponent)
    } else if has_legal_move(board, mover) {
        Some(mover)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_initial_black_has_four_moves() {
        let board = Board::new(8).unwrap();
        let moves = legal_moves(&board, Side::Black);
        assert_eq!(
            moves,
            vec![Pos::new(2, 3), Pos::new(3, 2), Pos::new(4, 5), Pos::new(5, 4)]
        );
    }

    #[test]
    fn test_initial_white_has_four_moves() {
        let board = Board::new(8).unwrap();
        assert_eq!(legal_moves(&board, Side::White).len(), 4);
    }

    #[test]
    fn test_flips_single_ray() {
        let board = Board::new(8).unwrap();
        assert_eq!(flips_for(&board, Pos::new(2, 3), Side::Black), vec![Pos::new(3, 3)]);
    }

    #[test]
    fn test_flips_multiple_rays() {
        let board = board_from(&[
            "B...",
            "WW..",
            ".WB.",
            "B...",
        ]);
        let flips = flips_for(&board, Pos::new(2, 0), Side::Black);
        assert_eq!(flips, vec![Pos::new(1, 0), Pos::new(2, 1)]);
    }

    #[test]
    fn test_flips_empty_for_occupied_or_unbracketed() {
        let board = Board::new(8).unwrap();
        assert!(flips_for(&board, Pos::new(3, 3), Side::Black).is_empty());
        assert!(flips_for(&board, Pos::new(0, 0), Side::Black).is_empty());
        assert!(flips_for(&board, Pos::new(9, 9), Side::Black).is_empty());
    }

    #[test]
    fn test_ray_reaching_edge_does_not_bracket() {
        let board = board_from(&[
            "....",
            ".WWW",
            "....",
            "....",
        ]);
        assert!(!is_legal(&board, Pos::new(1, 0), Side::Black));
    }

    #[test]
    fn test_apply_flips_and_places() {
        let mut board = Board::new(8).unwrap();
        let flips = apply(&mut board, Pos::new(2, 3), Side::Black).unwrap();
        assert_eq!(flips, vec![Pos::new(3, 3)]);
        assert_eq!(board.get(Pos::new(2, 3)), Cell::Black);
        assert_eq!(board.get(Pos::new(3, 3)), Cell::Black);
        assert_eq!(board.scores(), (4, 1));
    }

    #[test]
    fn test_apply_rejects_without_mutation() {
        let mut board = Board::new(8).unwrap();
        let before = board.clone();
        assert!(matches!(
            apply(&mut board, Pos::new(0, 0), Side::Black),
            Err(MoveError::NoFlips { .. })
        ));
        assert!(matches!(
            apply(&mut board, Pos::new(3, 3), Side::Black),
            Err(MoveError::Occupied { .. })
        ));
        assert!(matches!(
            apply(&mut board, Pos::new(8, 0), Side::Black),
            Err(MoveError::OutOfBounds { .. })
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_legal_moves_agree_with_flips() {
        let board = Board::new(6).unwrap();
        for pos in board.positions() {
            for side in [Side::Black, Side::White] {
                assert_eq!(
                    is_legal(&board, pos, side),
                    !flips_for(&board, pos, side).is_empty()
                );
            }
        }
    }

    #[test]
    fn test_next_to_move_alternates() {
        let board = Board::new(8).unwrap();
        assert_eq!(next_to_move(&board, Side::Black), Some(Side::White));
    }

    #[test]
    fn test_next_to_move_skips_stuck_opponent() {
        // The lone Black disc sits in a corner, so White can never bracket it.
        let board = board_from(&[
            "BW..",
            "....",
            "....",
            "....",
        ]);
        assert!(!has_legal_move(&board, Side::White));
        assert!(has_legal_move(&board, Side::Black));
        assert_eq!(next_to_move(&board, Side::Black), Some(Side::Black));
    }

    #[test]
    fn test_next_to_move_ends_when_nobody_can_move() {
        let board = board_from(&[
            "BBBB",
            "BBBB",
            "BBB.",
            "BBBB",
        ]);
        assert_eq!(next_to_move(&board, Side::Black), None);
        let full = board_from(&["BWBW", "WBWB", "BWBW", "WBWB"]);
        assert_eq!(next_to_move(&full, Side::White), None);
    }
}
