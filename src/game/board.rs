use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Board edge lengths the engine accepts.
pub const SUPPORTED_SIZES: [usize; 4] = [4, 6, 8, 10];

/// The eight compass rays scanned from a candidate cell, as (row, col) steps.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Single-character form used by the save format and text rendering.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'B' => Some(Cell::Black),
            'W' => Some(Cell::White),
            _ => None,
        }
    }
}

/// A board coordinate. Row 0 is the top, column 0 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square grid of cells. Disc counts are always derived from the cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with the standard four-disc center layout.
    ///
    /// White holds the top-left and bottom-right center cells, Black the other
    /// two.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        let mut board = Self::empty(size)?;
        let hi = size / 2;
        let lo = hi - 1;
        board.set(Pos::new(lo, lo), Cell::White);
        board.set(Pos::new(lo, hi), Cell::Black);
        board.set(Pos::new(hi, lo), Cell::Black);
        board.set(Pos::new(hi, hi), Cell::White);
        Ok(board)
    }

    /// Create a board with no discs at all.
    pub fn empty(size: usize) -> Result<Self, ConfigError> {
        if !SUPPORTED_SIZES.contains(&size) {
            return Err(ConfigError::UnsupportedSize(size));
        }
        Ok(Board {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Get the cell at a position. Callers check bounds with `contains`.
    pub fn get(&self, pos: Pos) -> Cell {
        debug_assert!(self.contains(pos.row, pos.col), "{pos} is off the board");
        self.cells[pos.row * self.size + pos.col]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        debug_assert!(self.contains(pos.row, pos.col), "{pos} is off the board");
        self.cells[pos.row * self.size + pos.col] = cell;
    }

    /// Step one cell from `pos` along `dir`, or `None` when leaving the grid.
    pub fn step(&self, pos: Pos, dir: (isize, isize)) -> Option<Pos> {
        let row = pos.row.checked_add_signed(dir.0)?;
        let col = pos.col.checked_add_signed(dir.1)?;
        self.contains(row, col).then(|| Pos::new(row, col))
    }

    /// All cells strictly beyond `from` along `dir`, nearest first.
    pub fn ray(&self, from: Pos, dir: (isize, isize)) -> impl Iterator<Item = Pos> + '_ {
        std::iter::successors(self.step(from, dir), move |&p| self.step(p, dir))
    }

    /// Every position in canonical row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size * size).map(move |i| Pos::new(i / size, i % size))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Disc counts as (black, white).
    pub fn scores(&self) -> (usize, usize) {
        (self.count(Cell::Black), self.count(Cell::White))
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn is_corner(&self, pos: Pos) -> bool {
        let last = self.size - 1;
        (pos.row == 0 || pos.row == last) && (pos.col == 0 || pos.col == last)
    }

    pub fn is_edge(&self, pos: Pos) -> bool {
        let last = self.size - 1;
        pos.row == 0 || pos.row == last || pos.col == 0 || pos.col == last
    }

    /// One string of cell symbols per row, top to bottom.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    /// Parse rows produced by [`Board::to_rows`]. Returns `None` if the shape
    /// or any symbol is wrong.
    pub fn from_rows(rows: &[String]) -> Option<Self> {
        let size = rows.len();
        let mut board = Self::empty(size).ok()?;
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != size {
                return None;
            }
            for (col, c) in line.chars().enumerate() {
                board.set(Pos::new(row, col), Cell::from_symbol(c)?);
            }
        }
        Some(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.to_rows() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
