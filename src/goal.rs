use crate::board::{Board, BoardError, Cell, Coord};

/// What a search is trying to reach.
pub trait Goal {
    fn is_satisfied(&self, board: &Board) -> bool;

    /// Estimate of how far `board` is from the goal. Zero iff
    /// [`Goal::is_satisfied`].
    fn distance(&self, board: &Board) -> usize;

    /// Cheap structural check run before searching. Returning `false` means
    /// no sequence of moves can ever satisfy the goal.
    fn is_reachable(&self, _board: &Board) -> bool {
        true
    }
}

/// True iff no cell is empty.
pub fn is_goal(board: &Board) -> bool {
    FillAll.is_satisfied(board)
}

/// Every non-wall, non-marker cell holds a piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillAll;

impl Goal for FillAll {
    fn is_satisfied(&self, board: &Board) -> bool {
        !board.cells().contains(&Cell::Empty)
    }

    fn distance(&self, board: &Board) -> usize {
        board.count(Cell::Empty)
    }

    fn is_reachable(&self, board: &Board) -> bool {
        board.piece_count() >= board.fillable_count()
    }
}

/// Every target cell holds a piece, whatever happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverTargets {
    targets: Vec<Coord>,
}

impl CoverTargets {
    /// Fails if a target lies outside `board`.
    pub fn new(
        board: &Board,
        targets: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, BoardError> {
        let mut targets: Vec<Coord> = targets.into_iter().collect();
        if let Some(&outside) = targets.iter().find(|&&at| !board.contains(at)) {
            return Err(BoardError::TargetOffBoard {
                target: outside,
                rows: board.rows(),
                cols: board.cols(),
            });
        }
        targets.sort();
        targets.dedup();
        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[Coord] {
        &self.targets
    }
}

impl Goal for CoverTargets {
    fn is_satisfied(&self, board: &Board) -> bool {
        self.distance(board) == 0
    }

    /// Sum over uncovered targets of the Manhattan distance to the nearest
    /// piece.
    fn distance(&self, board: &Board) -> usize {
        let pieces: Vec<Coord> = board.pieces().collect();
        self.targets
            .iter()
            .filter(|&&at| !board.get(at).is_some_and(Cell::is_piece))
            .map(|&at| {
                pieces
                    .iter()
                    .map(|p| p.row.abs_diff(at.row) + p.col.abs_diff(at.col))
                    .min()
                    .unwrap_or(board.rows() + board.cols())
            })
            .sum()
    }

    fn is_reachable(&self, board: &Board) -> bool {
        let fillable = self
            .targets
            .iter()
            .all(|&at| board.get(at).is_some_and(Cell::is_fillable));
        fillable && board.piece_count() >= self.targets.len()
    }
}
