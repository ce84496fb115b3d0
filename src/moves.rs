use crate::board::{Board, Cell, Coord};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour order used everywhere moves are generated. Search results
    /// are only reproducible because this never changes.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The neighbour of `at` in this direction, if it is on the board.
    pub fn step_from(&self, board: &Board, at: Coord) -> Option<Coord> {
        let (dr, dc) = self.as_offset();
        let row = at.row.checked_add_signed(dr)?;
        let col = at.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        board.contains(next).then_some(next)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One piece moving one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub from: Coord,
    pub to: Coord,
}

impl Step {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    pub fn direction(&self) -> Option<Direction> {
        match (
            self.to.row as isize - self.from.row as isize,
            self.to.col as isize - self.from.col as isize,
        ) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(dir) => write!(f, "{} {} -> {}", dir, self.from, self.to),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoPiece,
    OffBoard,
    NotAdjacent,
    Occupied,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::NoPiece => "there is no movable piece at the origin",
            Rejection::OffBoard => "the destination is off the board",
            Rejection::NotAdjacent => "the destination is not next to the origin",
            Rejection::Occupied => "the destination is not empty",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid move {from} -> {to}: {reason}")]
pub struct InvalidMove {
    pub from: Coord,
    pub to: Coord,
    pub reason: Rejection,
}

/// Empty neighbours of `at`, in up, down, left, right order.
///
/// Only bounds and emptiness are checked; the caller decides whether `at`
/// holds something that can move.
pub fn legal_destinations(board: &Board, at: Coord) -> Vec<Coord> {
    Direction::ALL
        .iter()
        .filter_map(|dir| dir.step_from(board, at))
        .filter(|&next| board.get(next) == Some(Cell::Empty))
        .collect()
}

/// Moves the piece at `from` to the adjacent empty cell `to`.
///
/// Repulsion and attraction are the same plain relocation: the origin is
/// emptied and the destination takes the piece. No other cell changes. The
/// input board is never modified.
pub fn apply_move(board: &Board, from: Coord, to: Coord) -> Result<Board, InvalidMove> {
    let reject = |reason| InvalidMove { from, to, reason };

    if !board.get(from).is_some_and(Cell::is_piece) {
        return Err(reject(Rejection::NoPiece));
    }
    let Some(target) = board.get(to) else {
        return Err(reject(Rejection::OffBoard));
    };
    if Step::new(from, to).direction().is_none() {
        return Err(reject(Rejection::NotAdjacent));
    }
    if target != Cell::Empty {
        return Err(reject(Rejection::Occupied));
    }

    Ok(board.relocate(from, to))
}

/// Applies `steps` in order, stopping at the first illegal one.
pub fn replay<'a, I>(board: &Board, steps: I) -> Result<Board, InvalidMove>
where
    I: IntoIterator<Item = &'a Step>,
{
    steps
        .into_iter()
        .try_fold(board.clone(), |current, step| {
            apply_move(&current, step.from, step.to)
        })
}

/// Every legal step on the board: pieces row-major, destinations in
/// [`Direction::ALL`] order.
pub fn successors(board: &Board) -> impl Iterator<Item = (Step, Board)> + '_ {
    board.pieces().flat_map(move |from| {
        legal_destinations(board, from)
            .into_iter()
            .map(move |to| (Step::new(from, to), board.relocate(from, to)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, TestResult};
    use quickcheck_macros::quickcheck;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn destinations_follow_up_down_left_right() {
        let b = board("EEE\nEPE\nEEE");
        assert_eq!(
            legal_destinations(&b, Coord::new(1, 1)),
            vec![
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
            ]
        );
    }

    #[test]
    fn destinations_skip_edges_and_occupied_cells() {
        let b = board("PG\nE*");
        assert_eq!(legal_destinations(&b, Coord::new(0, 0)), vec![Coord::new(1, 0)]);

        let b = board("PR");
        assert!(legal_destinations(&b, Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn moving_keeps_the_piece_kind() {
        let b = board("PER");
        let b = apply_move(&b, Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        assert_eq!(b, board("EPR"));
        let b = apply_move(&b, Coord::new(0, 2), Coord::new(0, 0));
        assert_eq!(
            b.unwrap_err().reason,
            Rejection::NotAdjacent,
            "pieces only move one cell"
        );
    }

    #[test]
    fn attraction_moves_only_the_red_piece() {
        let b = board("PERE");
        let after = apply_move(&b, Coord::new(0, 2), Coord::new(0, 1)).unwrap();
        assert_eq!(after, board("PREE"));
        let after = apply_move(&b, Coord::new(0, 2), Coord::new(0, 3)).unwrap();
        assert_eq!(after, board("PEER"));
    }

    #[test]
    fn illegal_moves_are_reported() {
        let b = board("PG\nE*");
        let origin = Coord::new(0, 0);
        assert_eq!(
            apply_move(&b, origin, Coord::new(0, 1)).unwrap_err().reason,
            Rejection::Occupied
        );
        assert_eq!(
            apply_move(&b, origin, Coord::new(0, 2)).unwrap_err().reason,
            Rejection::OffBoard
        );
        assert_eq!(
            apply_move(&b, Coord::new(1, 0), Coord::new(0, 0)).unwrap_err().reason,
            Rejection::NoPiece
        );
        assert_eq!(
            apply_move(&b, Coord::new(0, 1), Coord::new(1, 1)).unwrap_err().reason,
            Rejection::NoPiece,
            "walls never move"
        );
    }

    #[test]
    fn replay_stops_at_the_first_bad_step() {
        let b = board("PEE");
        let steps = [
            Step::new(Coord::new(0, 0), Coord::new(0, 1)),
            Step::new(Coord::new(0, 1), Coord::new(0, 2)),
        ];
        assert_eq!(replay(&b, &steps), Ok(board("EEP")));

        let bad = [steps[1]];
        assert!(replay(&b, &bad).is_err());
    }

    #[test]
    fn successors_enumerate_pieces_row_major() {
        let b = board("PE\nER");
        let steps: Vec<Step> = successors(&b).map(|(step, _)| step).collect();
        assert_eq!(
            steps,
            vec![
                Step::new(Coord::new(0, 0), Coord::new(1, 0)),
                Step::new(Coord::new(0, 0), Coord::new(0, 1)),
                Step::new(Coord::new(1, 1), Coord::new(0, 1)),
                Step::new(Coord::new(1, 1), Coord::new(1, 0)),
            ]
        );
    }

    #[derive(Debug, Clone)]
    struct SmallBoard(Board);

    impl Arbitrary for SmallBoard {
        fn arbitrary(g: &mut Gen) -> Self {
            let rows = usize::arbitrary(g) % 4 + 1;
            let cols = usize::arbitrary(g) % 4 + 1;
            let kinds = [Cell::Empty, Cell::Repel, Cell::Attract, Cell::Wall, Cell::Marker];
            let grid = (0..rows)
                .map(|_| (0..cols).map(|_| *g.choose(&kinds).unwrap()).collect())
                .collect();
            SmallBoard(Board::new(grid).unwrap())
        }
    }

    /// Every generated successor conserves the count of each cell kind.
    #[quickcheck]
    fn moves_conserve_cell_kinds(b: SmallBoard) -> TestResult {
        let b = b.0;
        let kinds = [Cell::Empty, Cell::Repel, Cell::Attract, Cell::Wall, Cell::Marker];
        for (step, next) in successors(&b) {
            if apply_move(&b, step.from, step.to).as_ref() != Ok(&next) {
                return TestResult::failed();
            }
            if kinds.iter().any(|&k| b.count(k) != next.count(k)) {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
}
