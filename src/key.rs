use crate::board::Board;
use std::fmt;

/// Canonical encoding of a board: its cell symbols, row-major.
///
/// Dimensions are fixed for the lifetime of a search, so the flattened
/// symbols alone identify a state. Keys are totally ordered and hashable;
/// two boards are the same state iff their keys are equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    pub fn of(board: &Board) -> Self {
        StateKey(
            board
                .cells()
                .iter()
                .map(|cell| cell.symbol() as u8)
                .collect(),
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        StateKey::of(board)
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey({})", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_row_major_symbols() {
        let board: Board = "PE\nG*".parse().unwrap();
        assert_eq!(StateKey::of(&board).as_bytes(), b"PEG*");
    }

    #[test]
    fn distinct_layouts_give_distinct_keys() {
        let a: Board = "PE".parse().unwrap();
        let b: Board = "EP".parse().unwrap();
        let c: Board = "RE".parse().unwrap();
        assert_ne!(StateKey::of(&a), StateKey::of(&b));
        assert_ne!(StateKey::of(&a), StateKey::of(&c));
        assert_eq!(StateKey::of(&a), StateKey::from(&a.clone()));
    }
}
