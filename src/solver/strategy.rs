//! This module contains the propagation rules that prune candidate sets and
//! the fixed-point loop that applies them.
//!
//! Each rule is a [Strategy] operating on a [Reduction], which bundles the
//! board being reduced with the topology and the assignment trace. A
//! strategy reports whether it changed anything, or signals a
//! [Contradiction] as soon as some cell runs out of candidates. The
//! [reduce] function applies the three rules in a fixed order until a full
//! pass no longer increases the number of solved cells.
//!
//! Propagation alone solves many puzzles outright. Where it stalls, the
//! [search engine](crate::solver::BacktrackingSolver) takes over and guesses.

use crate::board::{Board, DigitSet};
use crate::topology::{Cell, Topology};
use crate::trace::Trace;
use crate::SIZE;

/// Signals that some cell's candidate set became empty, i.e. the board state
/// admits no solution. The search engine recovers from this by abandoning
/// the branch; it is never surfaced to the crate's callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Contradiction;

/// The result of applying a [Strategy]: `Ok(true)` if the board changed,
/// `Ok(false)` if it did not, and `Err(`[Contradiction]`)` if some cell ran
/// out of candidates.
pub type StrategyResult = Result<bool, Contradiction>;

/// The working context of a propagation pass: the board being reduced,
/// the read-only topology, and the trace receiving snapshots of explicit
/// assignments. Strategies mutate the board exclusively through
/// [Reduction::assign] and [Reduction::eliminate], which uphold the
/// fail-fast contradiction contract.
pub struct Reduction<'a> {
    topology: &'a Topology,
    board: &'a mut Board,
    trace: &'a mut Trace
}

impl<'a> Reduction<'a> {

    /// Creates a new reduction context over the given board.
    pub fn new(topology: &'a Topology, board: &'a mut Board,
            trace: &'a mut Trace) -> Reduction<'a> {
        Reduction {
            topology,
            board,
            trace
        }
    }

    /// Gets the topology the board is being reduced under.
    pub fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// Gets the board in its current state of reduction.
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Gets the current candidate set of the given cell.
    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.board.candidates(cell)
    }

    /// Forces the given cell to the given digit, recording a trace snapshot
    /// if the board changed. See [Board::assign].
    pub fn assign(&mut self, cell: Cell, digit: usize) -> bool {
        self.board.assign(cell, digit, self.trace)
    }

    /// Removes the given digit from the given cell's candidate set. If that
    /// empties the set, the board is contradictory and `Err(Contradiction)`
    /// is returned immediately, before any further propagation.
    pub fn eliminate(&mut self, cell: Cell, digit: usize) -> StrategyResult {
        let changed = self.board.eliminate(cell, digit);

        if self.board.candidates(cell).is_empty() {
            Err(Contradiction)
        }
        else {
            Ok(changed)
        }
    }
}

/// A trait for the local-consistency rules applied by [reduce]. A strategy
/// inspects the board through the given [Reduction] and prunes whatever its
/// rule justifies. All strategies are monotone: they only ever remove
/// candidates, never add any, so candidate-set sizes cannot grow across a
/// pass.
pub trait Strategy {

    /// Applies this strategy once to the given reduction. Returns whether
    /// any candidate set changed, or a [Contradiction] if one became empty.
    fn apply(&self, reduction: &mut Reduction<'_>) -> StrategyResult;
}

/// A [Strategy] which removes the digit of every solved cell from the
/// candidate sets of all of that cell's peers.
///
/// The set of solved cells is collected before any removal, so the order in
/// which they are processed cannot influence the outcome; cells that become
/// solved by the removals themselves are picked up by the next pass.
#[derive(Clone)]
pub struct EliminateStrategy;

impl Strategy for EliminateStrategy {

    fn apply(&self, reduction: &mut Reduction<'_>) -> StrategyResult {
        let topology = reduction.topology();
        let solved: Vec<(Cell, usize)> = topology.cells().iter()
            .filter_map(|&cell|
                reduction.candidates(cell).single().map(|digit| (cell, digit)))
            .collect();
        let mut changed = false;

        for (cell, digit) in solved {
            for &peer in topology.peers(cell) {
                changed |= reduction.eliminate(peer, digit)?;
            }
        }

        Ok(changed)
    }
}

/// A [Strategy] which detects naked twins: two distinct peer cells whose
/// candidate sets are the same pair of digits. Those two digits must occupy
/// the twin cells in some order, so they can be removed from every cell that
/// is a peer of *both* twins.
///
/// As an example, if the cells marked A and B below both have exactly the
/// candidates {2, 3}, then no other cell of row 1 and no other cell of the
/// top-left box can hold a 2 or a 3 (using classic rules):
///
/// ```text
/// ╔═══╤═══╤═══╦═══╤
/// ║ A │ B │ x ║ x │ ...
/// ╟───┼───┼───╫───┼
/// ║ x │ x │ x ║   │
/// ╟───┼───┼───╫───┼
/// ║ x │ x │ x ║   │
/// ╠═══╪═══╪═══╬═══╪
/// ```
///
/// Twin pairs are collected in row-major order and deduplicated before any
/// removal happens, which makes the rule's output reproducible.
#[derive(Clone)]
pub struct NakedTwinsStrategy;

impl Strategy for NakedTwinsStrategy {

    fn apply(&self, reduction: &mut Reduction<'_>) -> StrategyResult {
        let topology = reduction.topology();
        let mut pairs = Vec::new();

        for (i, &cell) in topology.cells().iter().enumerate() {
            let candidates = reduction.candidates(cell);

            if candidates.len() != 2 {
                continue;
            }

            // Only look at cells after this one, so each unordered pair is
            // found exactly once.

            for &other in &topology.cells()[(i + 1)..] {
                if reduction.candidates(other) == candidates &&
                        topology.are_peers(cell, other) {
                    pairs.push((cell, other));
                }
            }
        }

        let mut changed = false;

        for (cell, other) in pairs {
            let twins = reduction.candidates(cell);

            for peer in topology.common_peers(cell, other) {
                for digit in twins {
                    changed |= reduction.eliminate(peer, digit)?;
                }
            }
        }

        Ok(changed)
    }
}

/// A [Strategy] which detects situations in which a digit has only one place
/// left in a unit and assigns it there. This is the only rule that performs
/// assignments, and therefore the only rule that appends to the trace; it
/// deduces, rather than guesses, a cell's final value.
#[derive(Clone)]
pub struct OnlyChoiceStrategy;

impl Strategy for OnlyChoiceStrategy {

    fn apply(&self, reduction: &mut Reduction<'_>) -> StrategyResult {
        let topology = reduction.topology();
        let mut changed = false;

        for unit in topology.units() {
            for digit in 1..=SIZE {
                let mut places = unit.iter()
                    .copied()
                    .filter(|&cell| reduction.candidates(cell).contains(digit));
                let first = places.next();
                let second = places.next();

                if let (Some(cell), None) = (first, second) {
                    changed |= reduction.assign(cell, digit);
                }
            }
        }

        Ok(changed)
    }
}

/// Reduces the given board to a fixed point by repeatedly applying
/// elimination, naked twins, and only choice, in that order, until one full
/// pass leaves the number of solved cells unchanged.
///
/// On success the board is locally consistent: it may be fully solved, or
/// stalled with some cells still undetermined, which is not an error but the
/// signal that the search engine must guess. Note that even a fully solved
/// board is not re-validated here; global validation is the caller's
/// business, see [Topology::is_valid].
///
/// If any cell's candidate set becomes empty along the way, reduction stops
/// immediately with a [Contradiction] and the board is left in its partially
/// reduced, inconsistent state; callers are expected to discard it.
pub fn reduce(topology: &Topology, board: &mut Board, trace: &mut Trace)
        -> Result<(), Contradiction> {
    let mut reduction = Reduction::new(topology, board, trace);

    loop {
        let solved_before = reduction.board().solved_count();

        EliminateStrategy.apply(&mut reduction)?;
        NakedTwinsStrategy.apply(&mut reduction)?;
        OnlyChoiceStrategy.apply(&mut reduction)?;

        if reduction.board().solved_count() == solved_before {
            return Ok(());
        }
    }
}
