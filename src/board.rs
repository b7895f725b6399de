//! This module contains the mutable state the solver operates on: the
//! [DigitSet] of candidates that remain possible for a cell, and the [Board],
//! which maps every cell to such a set. In contrast to the immutable
//! [Topology](crate::topology::Topology), a board is owned by exactly one
//! component at a time and is deep-copied whenever the search engine
//! branches.

use crate::{Grid, CELL_COUNT, SIZE};
use crate::topology::Cell;
use crate::trace::Trace;

use serde::{Deserialize, Serialize};

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

const ALL_DIGITS: u16 = (1 << SIZE) - 1;

/// A set of digits from 1 to 9, implemented as a single 9-bit word. This
/// makes membership tests, size queries, and equality checks constant-time
/// bit operations, which the solver relies on for solved-detection and for
/// the minimum-remaining-values comparison.
///
/// Digits outside the range `[1, 9]` are never contained and are ignored by
/// [DigitSet::insert] and [DigitSet::remove], so no operation on this type
/// can fail.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DigitSet(u16);

fn mask(digit: usize) -> u16 {
    if digit >= 1 && digit <= SIZE {
        1 << (digit - 1)
    }
    else {
        0
    }
}

impl DigitSet {

    /// Creates a new, empty digit set. On a consistent board this state never
    /// occurs; it signals a contradiction.
    pub fn empty() -> DigitSet {
        DigitSet(0)
    }

    /// Creates a digit set containing all digits from 1 to 9. This is the
    /// initial candidate set of every cell without a given clue.
    pub fn all() -> DigitSet {
        DigitSet(ALL_DIGITS)
    }

    /// Creates a digit set containing only the given digit.
    pub fn singleton(digit: usize) -> DigitSet {
        DigitSet(mask(digit))
    }

    /// Indicates whether this set contains the given digit.
    pub fn contains(self, digit: usize) -> bool {
        self.0 & mask(digit) != 0
    }

    /// Inserts the given digit into this set. Returns `true` if and only if
    /// the set changed, i.e. the digit is in range and was not present
    /// before.
    pub fn insert(&mut self, digit: usize) -> bool {
        let before = self.0;
        self.0 |= mask(digit);
        self.0 != before
    }

    /// Removes the given digit from this set. Returns `true` if and only if
    /// the set changed, i.e. the digit was present before.
    pub fn remove(&mut self, digit: usize) -> bool {
        let before = self.0;
        self.0 &= !mask(digit);
        self.0 != before
    }

    /// Returns the number of digits contained in this set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Indicates whether this set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// If this set contains exactly one digit, returns that digit, and `None`
    /// otherwise. A cell whose candidate set yields `Some` is solved.
    pub fn single(self) -> Option<usize> {
        if self.len() == 1 {
            Some(self.0.trailing_zeros() as usize + 1)
        }
        else {
            None
        }
    }

    /// Returns an iterator over the digits contained in this set in ascending
    /// order.
    pub fn iter(self) -> DigitSetIter {
        DigitSetIter(self.0)
    }

    /// Computes the set union of this and the given set and stores the result
    /// in this set. Returns `true` if and only if this set changed.
    ///
    /// `DigitSet` implements [BitOr] and [BitOrAssign] as syntactic sugar for
    /// this operation.
    pub fn union_assign(&mut self, other: DigitSet) -> bool {
        let before = self.0;
        self.0 |= other.0;
        self.0 != before
    }

    /// Computes the set intersection of this and the given set and stores the
    /// result in this set. Returns `true` if and only if this set changed.
    ///
    /// `DigitSet` implements [BitAnd] and [BitAndAssign] as syntactic sugar
    /// for this operation.
    pub fn intersect_assign(&mut self, other: DigitSet) -> bool {
        let before = self.0;
        self.0 &= other.0;
        self.0 != before
    }

    /// Computes the set difference of this and the given set, with `other`
    /// acting as the right-hand side, and stores the result in this set.
    /// Returns `true` if and only if this set changed.
    ///
    /// `DigitSet` implements [Sub] and [SubAssign] as syntactic sugar for
    /// this operation.
    pub fn difference_assign(&mut self, other: DigitSet) -> bool {
        let before = self.0;
        self.0 &= !other.0;
        self.0 != before
    }
}

/// An iterator over the digits of a [DigitSet] in ascending order.
pub struct DigitSetIter(u16);

impl Iterator for DigitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            None
        }
        else {
            let digit = self.0.trailing_zeros() as usize + 1;
            self.0 &= self.0 - 1;
            Some(digit)
        }
    }
}

impl IntoIterator for DigitSet {
    type Item = usize;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}

impl BitOr for DigitSet {
    type Output = DigitSet;

    fn bitor(mut self, rhs: DigitSet) -> DigitSet {
        self.union_assign(rhs);
        self
    }
}

impl BitAnd for DigitSet {
    type Output = DigitSet;

    fn bitand(mut self, rhs: DigitSet) -> DigitSet {
        self.intersect_assign(rhs);
        self
    }
}

impl Sub for DigitSet {
    type Output = DigitSet;

    fn sub(mut self, rhs: DigitSet) -> DigitSet {
        self.difference_assign(rhs);
        self
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: DigitSet) {
        self.union_assign(rhs);
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, rhs: DigitSet) {
        self.intersect_assign(rhs);
    }
}

impl SubAssign for DigitSet {
    fn sub_assign(&mut self, rhs: DigitSet) {
        self.difference_assign(rhs);
    }
}

/// Creates a new [DigitSet](crate::board::DigitSet) that contains the
/// specified digits.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_deduce::digits;
///
/// let set = digits!(2, 7);
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// assert_eq!(2, set.len());
/// ```
#[macro_export]
macro_rules! digits {
    ($($digit:expr),+) => {
        {
            let mut set = $crate::board::DigitSet::empty();
            $(set.insert($digit);)+
            set
        }
    };
}

/// A mapping from every cell of the grid to its current [DigitSet] of
/// candidates, stored row-major. This is the state the propagation rules
/// prune and the search engine branches over.
///
/// A board is consistent as long as every candidate set is non-empty; a cell
/// is solved once its set is a singleton. How emptiness is detected and
/// reported is the business of the
/// [strategy module](crate::solver::strategy).
///
/// Cloning a board copies the candidate sets, so clones never alias. The
/// search engine depends on this: every branch mutates its own copy.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Board {
    cells: Vec<DigitSet>
}

impl Board {

    /// Creates a board from the given grid: a cell with a clue starts with a
    /// singleton candidate set, a cell without one starts with all digits.
    /// Contradictory clues are accepted here and surface later during
    /// propagation.
    pub fn from_grid(grid: &Grid) -> Board {
        let mut cells = Vec::with_capacity(CELL_COUNT);

        for index in 0..CELL_COUNT {
            let candidates = match grid.cells()[index] {
                Some(digit) => DigitSet::singleton(digit),
                None => DigitSet::all()
            };

            cells.push(candidates);
        }

        Board {
            cells
        }
    }

    /// Gets the current candidate set of the given cell.
    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.cells[cell.index()]
    }

    /// Replaces the candidate set of the given cell without any bookkeeping.
    /// This is meant for setting up boards by hand, for tests or external
    /// tools; during solving, all changes go through [Board::assign] and
    /// [Board::eliminate].
    pub fn set_candidates(&mut self, cell: Cell, candidates: DigitSet) {
        self.cells[cell.index()] = candidates;
    }

    /// Forces the given cell to exactly the given digit and appends a
    /// snapshot of the resulting board to the trace. This is the explicit
    /// assignment operation used by the only-choice rule and by the search
    /// engine's guesses; passive elimination never records anything.
    ///
    /// If the cell is already fixed to exactly this digit, nothing changes
    /// and no snapshot is recorded. Returns `true` if and only if the board
    /// changed.
    pub fn assign(&mut self, cell: Cell, digit: usize, trace: &mut Trace)
            -> bool {
        let candidates = DigitSet::singleton(digit);

        if self.cells[cell.index()] == candidates {
            false
        }
        else {
            self.cells[cell.index()] = candidates;
            trace.record(self);
            true
        }
    }

    /// Removes the given digit from the candidate set of the given cell.
    /// Returns `true` if and only if the set changed. The resulting set may
    /// be empty; callers must check for that and treat it as a
    /// contradiction.
    pub fn eliminate(&mut self, cell: Cell, digit: usize) -> bool {
        self.cells[cell.index()].remove(digit)
    }

    /// Returns the number of solved cells, i.e. cells whose candidate set is
    /// a singleton. The propagation loop stalls once a full pass leaves this
    /// count unchanged.
    pub fn solved_count(&self) -> usize {
        self.cells.iter()
            .filter(|candidates| candidates.len() == 1)
            .count()
    }

    /// Indicates whether every cell of this board is solved.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|candidates| candidates.len() == 1)
    }

    /// Converts this board into a grid, entering the digits of all solved
    /// cells and leaving all other cells empty.
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::empty();

        for (index, candidates) in self.cells.iter().enumerate() {
            if let Some(digit) = candidates.single() {
                grid.set_by_index(index, digit);
            }
        }

        grid
    }
}
