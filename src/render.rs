use crossterm::style::{Color, Stylize};
use logic_magnets::{Board, Cell, Coord};
use std::fmt::Write;

/// Background colour of each cell, as on the game's buttons.
pub fn color(cell: Cell) -> Color {
    match cell {
        Cell::Repel => Color::Magenta,
        Cell::Attract => Color::Red,
        Cell::Wall => Color::DarkGrey,
        Cell::Marker => Color::White,
        Cell::Empty => Color::Cyan,
    }
}

/// Board as coloured cells, one line per row. `highlight` is drawn bold.
pub fn paint(board: &Board, highlight: Option<Coord>) -> String {
    let mut out = String::new();
    for (at, cell) in board.iter() {
        let mut styled = format!(" {} ", cell.symbol()).with(Color::Black).on(color(cell));
        if Some(at) == highlight {
            styled = styled.bold();
        }
        let _ = write!(out, "{}", styled);
        if at.col + 1 == board.cols() {
            out.push('\n');
        }
    }
    out
}
