//! This module contains the logic for solving Sudoku.
//!
//! Most importantly, this module contains the definition of the
//! [BacktrackingSolver], which interleaves the propagation rules from the
//! [strategy] module with depth-first search: it reduces the board to a
//! fixed point and, where propagation stalls, branches on the undetermined
//! cell with the fewest remaining candidates.

pub mod strategy;

use crate::board::Board;
use crate::topology::{Cell, Topology, Variant};
use crate::trace::Trace;
use crate::{Grid, SIZE};

use strategy::reduce;

/// An enumeration of the two possible results of a solve. Since the solver
/// stops at the first solution encountered by its deterministic depth-first
/// traversal, a wrapped grid is *a* solution, with no claim of uniqueness.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// Indicates that the puzzle is not solveable at all. This covers both
    /// grids whose givens are contradictory outright and grids that merely
    /// admit no completion; either way, every search branch ended in a
    /// contradiction.
    Impossible,

    /// Indicates that the puzzle was solved; the fully determined grid is
    /// wrapped in this instance.
    Solved(Grid)
}

/// Everything one invocation of [BacktrackingSolver::solve] produces: the
/// [Solution] and the assignment [Trace] accumulated along the way. The
/// solution is always delivered, whatever a consumer of the trace later does
/// with it.
#[derive(Clone, Debug)]
pub struct Outcome {
    solution: Solution,
    trace: Trace
}

impl Outcome {

    /// Gets the solution of this solve.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Gets the assignment trace recorded during this solve.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Decomposes this outcome into the solution and the trace.
    pub fn into_parts(self) -> (Solution, Trace) {
        (self.solution, self.trace)
    }
}

/// Finds the undetermined cell with the fewest remaining candidates, ties
/// broken by the row-major cell order. This is the minimum-remaining-values
/// heuristic; it keeps the average branching factor low.
///
/// Must only be called on boards that are neither solved nor contradictory,
/// so that at least one cell with more than one candidate exists.
fn find_min_candidates(topology: &Topology, board: &Board) -> Cell {
    let mut min_cell = topology.cells()[0];
    let mut min_len = SIZE + 1;

    for &cell in topology.cells() {
        let len = board.candidates(cell).len();

        if len > 1 && len < min_len {
            min_cell = cell;
            min_len = len;
        }
    }

    min_cell
}

/// A solver for classic and diagonal Sudoku which combines constraint
/// propagation with depth-first backtracking. Each search node
/// first runs the [reduce] fixed point; only where that stalls does the
/// solver guess, cloning the board per candidate so sibling branches never
/// observe each other's changes.
///
/// The traversal is fully deterministic: the branch cell is chosen by the
/// minimum-remaining-values heuristic with row-major tie-break, and its
/// digits are tried in ascending order. Identical input therefore always
/// yields an identical [Outcome], trace included.
pub struct BacktrackingSolver {
    topology: Topology
}

impl BacktrackingSolver {

    /// Creates a new solver for the given [Variant]. The topology is built
    /// once here and reused across all solves.
    pub fn new(variant: Variant) -> BacktrackingSolver {
        BacktrackingSolver {
            topology: Topology::new(variant)
        }
    }

    /// Gets the [Topology] this solver solves under, e.g. to validate a
    /// returned grid or to lay it out for display.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Solves, or attempts to solve, the puzzle given by `grid`. Returns the
    /// [Outcome] holding the first solution found by the deterministic
    /// depth-first traversal, or [Solution::Impossible] if no branch leads to
    /// one, together with the recorded assignment trace.
    pub fn solve(&self, grid: &Grid) -> Outcome {
        let mut trace = Trace::new();
        let board = Board::from_grid(grid);
        let solution = match self.solve_rec(board, &mut trace) {
            Some(board) => Solution::Solved(board.to_grid()),
            None => Solution::Impossible
        };

        Outcome {
            solution,
            trace
        }
    }

    fn solve_rec(&self, mut board: Board, trace: &mut Trace) -> Option<Board> {
        if reduce(&self.topology, &mut board, trace).is_err() {
            return None;
        }

        if board.is_solved() {
            return Some(board);
        }

        let cell = find_min_candidates(&self.topology, &board);

        for digit in board.candidates(cell) {
            let mut branch = board.clone();
            branch.assign(cell, digit, trace);

            if let Some(solved) = self.solve_rec(branch, trace) {
                return Some(solved);
            }
        }

        None
    }
}
