//! This module contains the fixed constraint topology of the 9x9 grid: the
//! definition of [Cell], the [Unit]s (rows, columns, boxes, and optionally
//! the two main diagonals), and the derived peer relation. A [Topology] is
//! built once per [Variant] and is read-only afterwards; both the propagation
//! rules and the search engine only ever query it.

use crate::{Grid, CELL_COUNT, SIZE};
use crate::board::DigitSet;

use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;

/// One of the 81 positions of the grid, identified by its row and column,
/// both counted from 1 to 9. Cells are cheap to copy and totally ordered
/// row-major, i.e. in the order in which they appear when reading the grid
/// left-to-right, top-to-bottom. That order is also the canonical tie-break
/// order used by the search engine.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize)]
pub struct Cell {
    row: usize,
    column: usize
}

impl Cell {

    pub(crate) fn new(row: usize, column: usize) -> Cell {
        Cell {
            row,
            column
        }
    }

    /// Gets the row (y-coordinate) of this cell, in the range `[1, 9]`.
    pub fn row(self) -> usize {
        self.row
    }

    /// Gets the column (x-coordinate) of this cell, in the range `[1, 9]`.
    pub fn column(self) -> usize {
        self.column
    }

    /// The row-major index of this cell, in the range `[0, 81[`.
    pub(crate) fn index(self) -> usize {
        (self.row - 1) * SIZE + (self.column - 1)
    }
}

/// An ordered group of 9 distinct cells that must jointly contain every digit
/// from 1 to 9 exactly once: a row, a column, a 3x3 box, or one of the two
/// main diagonals.
pub type Unit = [Cell; SIZE];

/// An enumeration of the supported rule sets. The variant decides which unit
/// families the [Topology] contains.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Variant {

    /// Standard rules: 9 rows, 9 columns, and 9 boxes, for a total of 27
    /// units.
    Classic,

    /// Standard rules plus the two main diagonals (top-left to bottom-right
    /// and top-right to bottom-left) as additional units, for a total of 29.
    Diagonals
}

/// The complete, immutable constraint structure of the grid for one
/// [Variant]: all 81 cells in row-major order, the list of [Unit]s, for every
/// cell the units containing it, and for every cell its peers, that is, all
/// other cells sharing at least one unit with it.
///
/// Building a topology is purely deterministic and cannot fail. It is
/// intended to be constructed once and shared by reference for the rest of
/// the run.
#[derive(Clone, Debug)]
pub struct Topology {
    variant: Variant,
    cells: Vec<Cell>,
    units: Vec<Unit>,
    containing_units: Vec<Vec<usize>>,
    peers: Vec<Vec<Cell>>
}

fn unit_from_fn(f: impl Fn(usize) -> Cell) -> Unit {
    let mut unit = [Cell::new(1, 1); SIZE];

    for (i, cell) in unit.iter_mut().enumerate() {
        *cell = f(i);
    }

    unit
}

fn base_units() -> Vec<Unit> {
    let mut units = Vec::new();

    for row in 1..=SIZE {
        units.push(unit_from_fn(|i| Cell::new(row, i + 1)));
    }

    for column in 1..=SIZE {
        units.push(unit_from_fn(|i| Cell::new(i + 1, column)));
    }

    for box_row in 0..3 {
        for box_column in 0..3 {
            units.push(unit_from_fn(|i|
                Cell::new(box_row * 3 + i / 3 + 1, box_column * 3 + i % 3 + 1)));
        }
    }

    units
}

fn diagonal_units() -> Vec<Unit> {
    let main = unit_from_fn(|i| Cell::new(i + 1, i + 1));
    let anti = unit_from_fn(|i| Cell::new(i + 1, SIZE - i));
    vec![main, anti]
}

impl Topology {

    /// Builds the topology for the given `variant`. This computes all units
    /// and derives the containing-unit lists and peer sets of every cell.
    pub fn new(variant: Variant) -> Topology {
        let mut cells = Vec::with_capacity(CELL_COUNT);

        for row in 1..=SIZE {
            for column in 1..=SIZE {
                cells.push(Cell::new(row, column));
            }
        }

        let mut units = base_units();

        if variant == Variant::Diagonals {
            units.extend(diagonal_units());
        }

        let mut containing_units = vec![Vec::new(); CELL_COUNT];

        for (unit_index, unit) in units.iter().enumerate() {
            for cell in unit {
                containing_units[cell.index()].push(unit_index);
            }
        }

        let mut peers = Vec::with_capacity(CELL_COUNT);

        for &cell in &cells {
            let mut cell_peers = BTreeSet::new();

            for &unit_index in &containing_units[cell.index()] {
                for &peer in &units[unit_index] {
                    cell_peers.insert(peer);
                }
            }

            cell_peers.remove(&cell);
            peers.push(cell_peers.into_iter().collect());
        }

        Topology {
            variant,
            cells,
            units,
            containing_units,
            peers
        }
    }

    /// Gets the [Variant] this topology was built for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Gets all 81 cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets all units of this topology: 27 in [Variant::Classic] mode and 29
    /// in [Variant::Diagonals] mode. Rows come first, then columns, then
    /// boxes, then the diagonals, if any.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Gets all units that contain the given cell. Every cell lies in its
    /// row, its column, and its box; cells on a diagonal of a
    /// [Variant::Diagonals] topology additionally lie in that diagonal, which
    /// makes 4 units for most diagonal cells and 5 for the center cell.
    pub fn units_of(&self, cell: Cell) -> impl Iterator<Item = &Unit> + '_ {
        self.containing_units[cell.index()].iter()
            .map(move |&unit_index| &self.units[unit_index])
    }

    /// Gets the peers of the given cell, that is, all other cells that share
    /// at least one unit with it, sorted row-major. The relation is
    /// symmetric.
    pub fn peers(&self, cell: Cell) -> &[Cell] {
        &self.peers[cell.index()]
    }

    /// Indicates whether the two given cells are peers of each other. A cell
    /// is never a peer of itself.
    pub fn are_peers(&self, cell: Cell, other: Cell) -> bool {
        self.peers(cell).binary_search(&other).is_ok()
    }

    /// Iterates, in row-major order, over all cells that are peers of both
    /// given cells simultaneously. This is the scope of the naked-twins rule.
    pub fn common_peers(&self, cell: Cell, other: Cell)
            -> impl Iterator<Item = Cell> + '_ {
        self.peers(cell).iter()
            .copied()
            .filter(move |&peer| self.are_peers(other, peer))
    }

    /// Indicates whether the given grid is a valid solution with respect to
    /// this topology, that is, it is full and every unit contains each digit
    /// from 1 to 9 exactly once. Propagation and search never call this
    /// themselves; it is offered to callers that want to double-check a final
    /// grid.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        for unit in &self.units {
            let mut seen = DigitSet::empty();

            for &cell in unit {
                match grid.get(cell) {
                    Some(digit) =>
                        if !seen.insert(digit) {
                            return false;
                        }
                    None => return false
                }
            }

            if seen != DigitSet::all() {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cells_are_row_major_and_ordered() {
        let topology = Topology::new(Variant::Classic);
        let cells = topology.cells();

        assert_eq!(CELL_COUNT, cells.len());
        assert_eq!(1, cells[0].row());
        assert_eq!(1, cells[0].column());
        assert_eq!(1, cells[8].row());
        assert_eq!(9, cells[8].column());
        assert_eq!(2, cells[9].row());
        assert_eq!(1, cells[9].column());

        for window in cells.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn classic_unit_count() {
        let topology = Topology::new(Variant::Classic);
        assert_eq!(27, topology.units().len());
    }

    #[test]
    fn diagonals_unit_count() {
        let topology = Topology::new(Variant::Diagonals);
        assert_eq!(29, topology.units().len());
    }

    #[test]
    fn every_unit_has_nine_distinct_cells() {
        let topology = Topology::new(Variant::Diagonals);

        for unit in topology.units() {
            let distinct: BTreeSet<Cell> = unit.iter().copied().collect();
            assert_eq!(SIZE, distinct.len());
        }
    }

    #[test]
    fn classic_containing_units() {
        let topology = Topology::new(Variant::Classic);

        for &cell in topology.cells() {
            assert_eq!(3, topology.units_of(cell).count());
        }
    }

    #[test]
    fn diagonals_containing_units() {
        let topology = Topology::new(Variant::Diagonals);

        // Corners lie on one diagonal, the center on both, and a cell off
        // both diagonals on neither.

        assert_eq!(4, topology.units_of(Cell::new(1, 1)).count());
        assert_eq!(4, topology.units_of(Cell::new(1, 9)).count());
        assert_eq!(5, topology.units_of(Cell::new(5, 5)).count());
        assert_eq!(3, topology.units_of(Cell::new(1, 2)).count());
    }

    #[test]
    fn classic_peer_counts() {
        let topology = Topology::new(Variant::Classic);

        // 8 row peers + 8 column peers + 4 box peers not already counted.

        for &cell in topology.cells() {
            assert_eq!(20, topology.peers(cell).len());
        }
    }

    #[test]
    fn diagonals_peer_counts() {
        let topology = Topology::new(Variant::Diagonals);

        assert_eq!(26, topology.peers(Cell::new(1, 1)).len());
        assert_eq!(26, topology.peers(Cell::new(1, 9)).len());
        assert_eq!(32, topology.peers(Cell::new(5, 5)).len());
        assert_eq!(20, topology.peers(Cell::new(1, 2)).len());
    }

    #[test]
    fn peers_are_symmetric() {
        for &variant in &[Variant::Classic, Variant::Diagonals] {
            let topology = Topology::new(variant);

            for &cell in topology.cells() {
                assert!(!topology.are_peers(cell, cell));

                for &peer in topology.peers(cell) {
                    assert!(topology.are_peers(peer, cell));
                }
            }
        }
    }

    #[test]
    fn common_peers_of_row_neighbours() {
        let topology = Topology::new(Variant::Classic);
        let common: Vec<Cell> =
            topology.common_peers(Cell::new(1, 1), Cell::new(1, 2)).collect();

        // The rest of row 1 plus the rest of the top-left box.

        assert_eq!(13, common.len());
        assert!(common.contains(&Cell::new(1, 9)));
        assert!(common.contains(&Cell::new(3, 3)));
        assert!(!common.contains(&Cell::new(1, 1)));
        assert!(!common.contains(&Cell::new(1, 2)));
        assert!(!common.contains(&Cell::new(4, 1)));
    }

    const SOLVED: &str = "\
        483921657967345821251876493548132976729564138136798245372689514\
        814253769695417382";

    #[test]
    fn valid_classic_solution_accepted() {
        let topology = Topology::new(Variant::Classic);
        let grid = Grid::parse(SOLVED).unwrap();
        assert!(topology.is_valid(&grid));
    }

    #[test]
    fn partial_grid_not_valid() {
        let topology = Topology::new(Variant::Classic);
        let grid = Grid::parse(&SOLVED.replacen('4', ".", 1)).unwrap();
        assert!(!topology.is_valid(&grid));
    }

    #[test]
    fn duplicate_digit_not_valid() {
        let topology = Topology::new(Variant::Classic);
        let grid = Grid::parse(&SOLVED.replacen('4', "8", 1)).unwrap();
        assert!(!topology.is_valid(&grid));
    }

    #[test]
    fn classic_solution_may_break_diagonals() {
        // The grid above repeats digits on the main diagonal, so it must be
        // rejected once the diagonal units are in play.

        let grid = Grid::parse(SOLVED).unwrap();
        assert!(Topology::new(Variant::Classic).is_valid(&grid));
        assert!(!Topology::new(Variant::Diagonals).is_valid(&grid));
    }
}
