//! This module contains the assignment trace: an append-only log of board
//! snapshots, one for every explicit assignment made while solving, together
//! with the [Visualizer] collaborator trait through which an external
//! observer can replay the solving process.
//!
//! The trace is scoped to a single solve invocation. It is created inside
//! [BacktrackingSolver::solve](crate::solver::BacktrackingSolver::solve) and
//! handed back to the caller in the [Outcome](crate::solver::Outcome), so
//! concurrent or repeated solves never share state.

use crate::board::Board;

use serde::{Deserialize, Serialize};

use std::slice::Iter;

/// The ordered log of [Board] snapshots taken whenever a cell became solved
/// through an explicit assignment, that is, an only-choice deduction or a
/// search guess. Snapshots of abandoned search branches remain in the trace;
/// it mirrors the entire solving process, wrong turns included.
///
/// Entries are appended only and never mutated or removed. Traces serialize
/// with serde, so they can also be shipped to a visualizer running in
/// another process.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Trace {
    snapshots: Vec<Board>
}

impl Trace {

    /// Creates a new, empty trace.
    pub fn new() -> Trace {
        Trace {
            snapshots: Vec::new()
        }
    }

    /// Appends a snapshot of the given board to this trace.
    pub(crate) fn record(&mut self, board: &Board) {
        self.snapshots.push(board.clone());
    }

    /// Returns the number of snapshots in this trace.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Indicates whether this trace contains no snapshots. This is the case
    /// for inputs that are solved by elimination alone, such as grids that
    /// arrive already fully solved.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Gets the recorded snapshots in the order they were taken.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// Returns an iterator over the snapshots in the order they were taken.
    pub fn iter(&self) -> Iter<'_, Board> {
        self.snapshots.iter()
    }

    /// Feeds all snapshots, in order, to the given visualizer. If the
    /// visualizer fails on some frame, replaying stops and the error is
    /// returned to the caller.
    ///
    /// Replaying is a best-effort side channel: the solve result this trace
    /// belongs to has already been computed, so a failure here can be
    /// reported as a warning and otherwise ignored without invalidating
    /// anything.
    pub fn replay<V: Visualizer>(&self, visualizer: &mut V)
            -> Result<(), V::Error> {
        for snapshot in &self.snapshots {
            visualizer.frame(snapshot)?;
        }

        Ok(())
    }
}

impl Default for Trace {
    fn default() -> Trace {
        Trace::new()
    }
}

/// A trait for external collaborators that want to observe the solving
/// process step by step, for example to animate it. Implementations receive
/// every snapshot of a [Trace] in order via [Trace::replay].
pub trait Visualizer {

    /// The error type raised when displaying a frame fails, for example
    /// because the output device is unavailable.
    type Error;

    /// Displays a single snapshot. Returning an error stops the replay.
    fn frame(&mut self, snapshot: &Board) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::Grid;
    use crate::topology::Cell;

    struct CountingVisualizer {
        frames: usize,
        fail_at: Option<usize>
    }

    impl Visualizer for CountingVisualizer {
        type Error = String;

        fn frame(&mut self, _: &Board) -> Result<(), String> {
            if self.fail_at == Some(self.frames) {
                return Err(String::from("display unavailable"));
            }

            self.frames += 1;
            Ok(())
        }
    }

    fn example_trace() -> Trace {
        let grid = Grid::parse(&".".repeat(81)).unwrap();
        let mut board = Board::from_grid(&grid);
        let mut trace = Trace::new();

        board.assign(Cell::new(1, 1), 1, &mut trace);
        board.assign(Cell::new(1, 2), 2, &mut trace);
        board.assign(Cell::new(1, 3), 3, &mut trace);
        trace
    }

    #[test]
    fn replay_visits_all_snapshots_in_order() {
        let trace = example_trace();
        let mut visualizer = CountingVisualizer {
            frames: 0,
            fail_at: None
        };

        assert!(trace.replay(&mut visualizer).is_ok());
        assert_eq!(3, visualizer.frames);

        // Each snapshot must contain everything assigned up to its moment.

        assert_eq!(None,
            trace.snapshots()[0].candidates(Cell::new(1, 2)).single());
        assert_eq!(Some(2),
            trace.snapshots()[1].candidates(Cell::new(1, 2)).single());
        assert_eq!(Some(1),
            trace.snapshots()[2].candidates(Cell::new(1, 1)).single());
    }

    #[test]
    fn failing_visualizer_stops_replay_but_keeps_trace() {
        let trace = example_trace();
        let mut visualizer = CountingVisualizer {
            frames: 0,
            fail_at: Some(1)
        };

        assert_eq!(Err(String::from("display unavailable")),
            trace.replay(&mut visualizer));
        assert_eq!(1, visualizer.frames);
        assert_eq!(3, trace.len());
    }

    #[test]
    fn serde_round_trip() {
        let trace = example_trace();
        let json = serde_json::to_string(&trace).unwrap();
        let deserialized: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, deserialized);
    }
}
