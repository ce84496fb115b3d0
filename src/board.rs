use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    Empty,
    /// Piece-A, the purple magnet. Its move is called a repulsion.
    Repel,
    /// Piece-B, the red magnet. Its move is called an attraction.
    Attract,
    Wall,
    Marker,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => 'E',
            Cell::Repel => 'P',
            Cell::Attract => 'R',
            Cell::Wall => 'G',
            Cell::Marker => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'E' => Some(Cell::Empty),
            'P' => Some(Cell::Repel),
            'R' => Some(Cell::Attract),
            'G' => Some(Cell::Wall),
            '*' => Some(Cell::Marker),
            _ => None,
        }
    }

    pub fn is_piece(self) -> bool {
        matches!(self, Cell::Repel | Cell::Attract)
    }

    /// Cells that a piece may eventually occupy.
    pub fn is_fillable(self) -> bool {
        !matches!(self, Cell::Wall | Cell::Marker)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("malformed board: the grid has no cells")]
    Empty,
    #[error("malformed board: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("malformed board: unknown cell symbol {symbol:?} in row {row}")]
    UnknownSymbol { row: usize, symbol: char },
    #[error("target {target} is outside the {rows}x{cols} board")]
    TargetOffBoard {
        target: Coord,
        rows: usize,
        cols: usize,
    },
}

/// An immutable snapshot of the puzzle grid.
///
/// Cells are stored row-major. Nothing in the crate mutates a board after it
/// has been built; moves produce a fresh copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from a grid of rows.
    ///
    /// Fails if there are no rows, the first row is empty, or the rows differ
    /// in length.
    pub fn new(grid: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in grid.into_iter().enumerate() {
            if line.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            cells.extend(line);
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    pub fn get(&self, at: Coord) -> Option<Cell> {
        if self.contains(at) {
            Some(self.cells[at.row * self.cols + at.col])
        } else {
            None
        }
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Coord::new(i / cols, i % cols), cell))
    }

    /// Coordinates of all movable pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_piece())
            .map(|(at, _)| at)
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_piece()).count()
    }

    pub fn fillable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_fillable()).count()
    }

    /// Copy of this board with the contents of `from` moved to `to` and
    /// `from` left empty. Callers check legality first.
    pub(crate) fn relocate(&self, from: Coord, to: Coord) -> Board {
        let mut cells = self.cells.clone();
        let src = from.row * self.cols + from.col;
        let dst = to.row * self.cols + to.col;
        cells[dst] = cells[src];
        cells[src] = Cell::Empty;
        Board {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Scatters the pieces and empty cells over the fillable cells, keeping
    /// walls and markers where they are.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        let mut movable: Vec<Cell> = self
            .cells
            .iter()
            .copied()
            .filter(|cell| cell.is_fillable())
            .collect();
        movable.shuffle(rng);

        let mut movable = movable.into_iter();
        let cells = self
            .cells
            .iter()
            .map(|&cell| {
                if cell.is_fillable() {
                    movable.next().unwrap_or(cell)
                } else {
                    cell
                }
            })
            .collect();

        Board {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Vec::new();
        for line in s.lines() {
            let row = grid.len();
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            let cells = symbols
                .into_iter()
                .map(|symbol| {
                    Cell::from_symbol(symbol).ok_or(BoardError::UnknownSymbol { row, symbol })
                })
                .collect::<Result<Vec<_>, _>>()?;
            grid.push(cells);
        }
        Board::new(grid)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
