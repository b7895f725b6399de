// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_crate_level_docs)]
#![warn(invalid_codeblock_attributes)]

//! This crate implements a solver for classic and diagonal Sudoku that works
//! the way a careful human does: it propagates constraints until nothing new
//! can be deduced and only then resorts to (backtracking) guesswork. It
//! supports the following key features:
//!
//! * Parsing and printing Sudoku grids in an 81-character line format
//! * Solving by constraint propagation (elimination, naked twins, only
//! choice) combined with depth-first backtracking search
//! * An optional variant in which the two main diagonals must also contain
//! every digit exactly once
//! * An assignment trace that lets external tooling replay the solving
//! process step by step
//!
//! # Parsing and printing grids
//!
//! See [Grid::parse] for the exact format of a grid code: one character per
//! cell, read left-to-right, top-to-bottom, with `.` marking an empty cell.
//! Codes can be used to exchange grids, while the [Display](std::fmt::Display)
//! implementation pretty-prints a grid with separators after columns and rows
//! 3 and 6.
//!
//! ```
//! use sudoku_deduce::Grid;
//!
//! let grid = Grid::parse(
//!     "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..\
//!     2.3..9..5.1.3..").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Solving
//!
//! The [solve] function parses a grid code and runs the
//! [BacktrackingSolver](solver::BacktrackingSolver) on it. The chosen
//! [Variant](topology::Variant) decides whether the two main diagonals count
//! as units. The result distinguishes a solved grid from a provably
//! unsolveable puzzle; malformed input is rejected before any solving
//! starts.
//!
//! ```
//! use sudoku_deduce::solve;
//! use sudoku_deduce::solver::Solution;
//! use sudoku_deduce::topology::Variant;
//!
//! let puzzle =
//!     "2.............62....1....7...6..8...3...9...7...6..4...4....8....5\
//!     2.............3";
//! let outcome = solve(puzzle, Variant::Diagonals).unwrap();
//!
//! match outcome.solution() {
//!     Solution::Solved(grid) => println!("{}", grid),
//!     Solution::Impossible => println!("this puzzle has no solution")
//! }
//! ```
//!
//! Puzzles are solved deterministically: the same code in the same variant
//! always produces the same outcome, trace included.
//!
//! # Replaying the solving process
//!
//! Every explicit assignment made while solving, whether deduced by the
//! only-choice rule or guessed by the search engine, appends a snapshot of
//! the candidate state to the [Trace](trace::Trace) found in the
//! [Outcome](solver::Outcome). The trace can be handed to a
//! [Visualizer](trace::Visualizer) or serialized; either way it is a side
//! channel, and the solution does not depend on what happens to it.
//!
//! ```
//! use sudoku_deduce::solve;
//! use sudoku_deduce::topology::Variant;
//!
//! let outcome = solve(
//!     "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..\
//!     2.3..9..5.1.3..",
//!     Variant::Classic).unwrap();
//! println!("solved after {} assignments", outcome.trace().len());
//! ```
//!
//! # Checking validity
//!
//! The solver itself never hands out an invalid grid, but callers that
//! obtain grids from elsewhere can check them against the unit list of a
//! [Topology](topology::Topology).
//!
//! ```
//! use sudoku_deduce::Grid;
//! use sudoku_deduce::topology::{Topology, Variant};
//!
//! let topology = Topology::new(Variant::Classic);
//! let grid = Grid::parse(
//!     "48392165796734582125187649354813297672956413813679824537268951481\
//!     4253769695417382").unwrap();
//! assert!(topology.is_valid(&grid));
//! ```

pub mod board;
pub mod error;
pub mod solver;
pub mod topology;
pub mod trace;

use crate::error::{GridParseError, GridParseResult};
use crate::solver::{BacktrackingSolver, Outcome};
use crate::topology::{Cell, Variant};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The number of rows, columns, and digits of the grid.
pub(crate) const SIZE: usize = 9;

/// The total number of cells of the grid.
pub(crate) const CELL_COUNT: usize = SIZE * SIZE;

/// A 9x9 Sudoku grid in which each cell may or may not be occupied by a
/// digit from 1 to 9. This is the external representation of puzzles and
/// solutions; the candidate-set view the solver works on is the
/// [Board](board::Board).
///
/// `Grid` implements `Display`, rendering the grid with thick separators
/// after columns 3 and 6 and rows 3 and 6:
///
/// ```text
/// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
/// ║   │   │ 3 ║   │ 2 │   ║ 6 │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║ 9 │   │   ║ 3 │   │ 5 ║   │   │ 1 ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │ 1 ║ 8 │   │ 6 ║ 4 │   │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ║   │   │ 8 ║ 1 │   │ 2 ║ 9 │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║ 7 │   │   ║   │   │   ║   │   │ 8 ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │ 6 ║ 7 │   │ 8 ║ 2 │   │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ║   │   │ 2 ║ 6 │   │ 9 ║ 5 │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║ 8 │   │   ║ 2 │   │ 3 ║   │   │ 9 ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │ 5 ║   │ 1 │   ║ 3 │   │   ║
/// ╚═══╧═══╧═══╩═══╧═══╧═══╩═══╧═══╧═══╝
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Grid {
    cells: Vec<Option<usize>>
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(n) = cell {
        ('0' as u8 + n as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % 3 == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &Grid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.cells[y * SIZE + x]), ' ', '║', true)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if y % 3 == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

impl Grid {

    /// Creates a new, completely empty grid.
    pub fn empty() -> Grid {
        Grid {
            cells: vec![None; CELL_COUNT]
        }
    }

    /// Parses a code encoding a grid. The code has to consist of exactly 81
    /// characters, one per cell, assigned left-to-right, top-to-bottom, where
    /// each row is completed before the next one is started. A digit from 1
    /// to 9 is a given clue and the placeholder `'.'` is an empty cell.
    ///
    /// As an example, the code that starts with `"4...8..6."` places a 4, an
    /// 8, and a 6 in the first, fifth, and eighth cell of the top row.
    ///
    /// # Errors
    ///
    /// Any specialization of [GridParseError] (see that documentation).
    pub fn parse(code: &str) -> GridParseResult<Grid> {
        let chars: Vec<char> = code.chars().collect();

        if chars.len() != CELL_COUNT {
            return Err(GridParseError::WrongLength(chars.len()));
        }

        let mut cells = Vec::with_capacity(CELL_COUNT);

        for c in chars {
            match c {
                '.' => cells.push(None),
                '1'..='9' => cells.push(Some(c as usize - '0' as usize)),
                _ => return Err(GridParseError::InvalidCharacter(c))
            }
        }

        Ok(Grid {
            cells
        })
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [Grid::parse]. That is, a grid that is converted to a line and parsed
    /// again will not change, as is illustrated below.
    ///
    /// ```
    /// use sudoku_deduce::Grid;
    ///
    /// let code =
    ///     "2.............62....1....7...6..8...3...9...7...6..4...4....8....\
    ///     52.............3";
    /// let grid = Grid::parse(code).unwrap();
    /// assert_eq!(code, grid.to_line());
    /// ```
    pub fn to_line(&self) -> String {
        self.cells.iter()
            .map(|cell| {
                if let Some(n) = cell {
                    ('0' as u8 + *n as u8) as char
                }
                else {
                    '.'
                }
            })
            .collect()
    }

    /// Gets the digit in the given cell, or `None` if it is empty.
    pub fn get(&self, cell: Cell) -> Option<usize> {
        self.cells[cell.index()]
    }

    /// Sets the cell with the given row-major index to the given digit,
    /// which callers guarantee to be in the range `[1, 9]`.
    pub(crate) fn set_by_index(&mut self, index: usize, digit: usize) {
        self.cells[index] = Some(digit);
    }

    /// Gets a reference to the slice which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &[Option<usize>] {
        &self.cells
    }

    /// Counts the number of clues given by this grid, i.e. the number of
    /// non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// digit.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid must be filled in `other` with
    /// the same digit. Among other things, this allows checking that a
    /// solution actually keeps all given clues.
    pub fn is_subset(&self, other: &Grid) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(self_cell, other_cell)| {
                match self_cell {
                    Some(digit) => other_cell == &Some(*digit),
                    None => true
                }
            })
    }

    /// Indicates whether this grid configuration is a superset of another
    /// one. That is, all cells filled in the `other` grid must be filled in
    /// this one with the same digit.
    pub fn is_superset(&self, other: &Grid) -> bool {
        other.is_subset(self)
    }
}

/// Parses the given grid code and solves the puzzle under the rules of the
/// given [Variant]. This is the convenience entry point wrapping
/// [Grid::parse] and [BacktrackingSolver::solve]; see those for details. The
/// returned [Outcome] carries both the [Solution](solver::Solution) and the
/// assignment [Trace](trace::Trace).
///
/// # Errors
///
/// If `code` is not a well-formed grid code. An unsolveable but well-formed
/// puzzle is *not* an error; it yields
/// [Solution::Impossible](solver::Solution::Impossible).
pub fn solve(code: &str, variant: Variant) -> GridParseResult<Outcome> {
    let grid = Grid::parse(code)?;
    Ok(BacktrackingSolver::new(variant).solve(&grid))
}

#[cfg(test)]
pub(crate) mod tests {

    use super::*;

    use crate::solver::Solution;

    pub(crate) const CLASSIC_PUZZLE: &str = "\
        ..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8.\
        .2.3..9..5.1.3..";

    pub(crate) const SOLVED_CLASSIC: &str = "\
        48392165796734582125187649354813297672956413813679824537268951481\
        4253769695417382";

    pub(crate) const DIAGONAL_PUZZLE: &str = "\
        2.............62....1....7...6..8...3...9...7...6..4...4....8....\
        52.............3";

    #[test]
    fn parse_ok() {
        let grid = Grid::parse(CLASSIC_PUZZLE).unwrap();

        assert_eq!(None, grid.get(Cell::new(1, 1)));
        assert_eq!(Some(3), grid.get(Cell::new(1, 3)));
        assert_eq!(Some(2), grid.get(Cell::new(1, 5)));
        assert_eq!(Some(9), grid.get(Cell::new(2, 1)));
        assert_eq!(Some(7), grid.get(Cell::new(5, 1)));
        assert_eq!(Some(8), grid.get(Cell::new(5, 9)));
        assert_eq!(None, grid.get(Cell::new(9, 9)));
        assert_eq!(30, grid.count_clues());
    }

    #[test]
    fn parse_wrong_length() {
        assert_eq!(Err(GridParseError::WrongLength(3)), Grid::parse("123"));
        assert_eq!(Err(GridParseError::WrongLength(82)),
            Grid::parse(&".".repeat(82)));
        assert_eq!(Err(GridParseError::WrongLength(0)), Grid::parse(""));
    }

    #[test]
    fn parse_invalid_character() {
        let mut code = String::from("0");
        code.push_str(&".".repeat(80));
        assert_eq!(Err(GridParseError::InvalidCharacter('0')),
            Grid::parse(&code));

        let mut code = String::from("x");
        code.push_str(&".".repeat(80));
        assert_eq!(Err(GridParseError::InvalidCharacter('x')),
            Grid::parse(&code));
    }

    #[test]
    fn to_line_round_trip() {
        let grid = Grid::parse(DIAGONAL_PUZZLE).unwrap();
        assert_eq!(DIAGONAL_PUZZLE, grid.to_line());
        assert_eq!(grid, Grid::parse(&grid.to_line()).unwrap());
    }

    #[test]
    fn empty_grid_has_no_clues() {
        let grid = Grid::empty();

        assert_eq!(0, grid.count_clues());
        assert!(!grid.is_full());
        assert_eq!(".".repeat(81), grid.to_line());
    }

    #[test]
    fn full_grid_is_full() {
        let grid = Grid::parse(SOLVED_CLASSIC).unwrap();

        assert!(grid.is_full());
        assert_eq!(81, grid.count_clues());
    }

    #[test]
    fn subset_relations() {
        let empty = Grid::empty();
        let puzzle = Grid::parse(CLASSIC_PUZZLE).unwrap();
        let solved = Grid::parse(SOLVED_CLASSIC).unwrap();

        assert!(empty.is_subset(&puzzle));
        assert!(puzzle.is_subset(&solved));
        assert!(solved.is_superset(&puzzle));
        assert!(!solved.is_subset(&puzzle));
        assert!(puzzle.is_subset(&puzzle));
    }

    #[test]
    fn display_shape() {
        let grid = Grid::parse(SOLVED_CLASSIC).unwrap();
        let rendered = format!("{}", grid);
        let lines: Vec<&str> = rendered.split('\n').collect();

        assert_eq!(19, lines.len());
        assert_eq!("╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗", lines[0]);
        assert_eq!("║ 4 │ 8 │ 3 ║ 9 │ 2 │ 1 ║ 6 │ 5 │ 7 ║", lines[1]);
        assert_eq!("╟───┼───┼───╫───┼───┼───╫───┼───┼───╢", lines[2]);
        assert_eq!("╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣", lines[6]);
        assert_eq!("╚═══╧═══╧═══╩═══╧═══╧═══╩═══╧═══╧═══╝", lines[18]);
    }

    #[test]
    fn display_leaves_empty_cells_blank() {
        let grid = Grid::parse(CLASSIC_PUZZLE).unwrap();
        let rendered = format!("{}", grid);
        let lines: Vec<&str> = rendered.split('\n').collect();

        assert_eq!("║   │   │ 3 ║   │ 2 │   ║ 6 │   │   ║", lines[1]);
    }

    #[test]
    fn solve_convenience_function() {
        let outcome = solve(CLASSIC_PUZZLE, Variant::Classic).unwrap();
        let expected = Grid::parse(SOLVED_CLASSIC).unwrap();

        assert_eq!(&Solution::Solved(expected), outcome.solution());
    }

    #[test]
    fn solve_rejects_malformed_input_before_solving() {
        assert_eq!(Err(GridParseError::WrongLength(9)),
            solve("123456789", Variant::Classic).map(|_| ()));
    }
}
