//! Append-only undo logs with stacked markers.
//!
//! Every mutable subsystem of the game keeps an [`UndoLog`] of the reversible
//! operations it performed. A [`Marker`] names a position in that log.
//! Unwinding to a marker hands back every operation recorded after it, newest
//! first, so the owner can invert them one by one.
//!
//! Markers nest like a stack: unwinding to an outer marker discards every
//! marker taken after it. Unwinding to a marker that is no longer on the stack
//! does nothing and reports `None`.
//!
//! A marker may carry a snapshot of state the subsystem restores wholesale
//! rather than operation by operation (for example a player's token balance).

use std::iter::Rev;
use std::vec::Drain;

/// Opaque handle to a position in an [`UndoLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(u64);

#[derive(Debug, Clone)]
struct Mark<S> {
    marker: Marker,
    position: usize,
    snapshot: S,
}

/// Index-based log of reversible operations.
#[derive(Debug, Clone)]
pub struct UndoLog<Op, S = ()> {
    ops: Vec<Op>,
    marks: Vec<Mark<S>>,
    next_id: u64,
}

impl<Op, S> Default for UndoLog<Op, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Op, S> UndoLog<Op, S> {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            marks: Vec::new(),
            next_id: 0,
        }
    }

    /// Record an operation.
    ///
    /// Operations recorded while no marker is outstanding can never be
    /// unwound, so they are not kept.
    #[inline]
    pub fn record(&mut self, op: Op) {
        if !self.marks.is_empty() {
            self.ops.push(op);
        }
    }

    /// Push a marker carrying `snapshot` at the current log position.
    pub fn mark_with(&mut self, snapshot: S) -> Marker {
        let marker = Marker(self.next_id);
        self.next_id += 1;
        self.marks.push(Mark {
            marker,
            position: self.ops.len(),
            snapshot,
        });
        marker
    }

    /// Whether `marker` is still on the marker stack.
    pub fn is_marked(&self, marker: Marker) -> bool {
        self.marks.iter().any(|m| m.marker == marker)
    }

    /// Number of outstanding markers.
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// Number of operations currently held.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Pop everything down to and including `marker`.
    ///
    /// Returns `None` (and leaves the log untouched) if the marker is not on
    /// the stack. Otherwise the returned [`Unwind`] yields the operations
    /// recorded since the marker, newest first, and carries its snapshot.
    pub fn unwind(&mut self, marker: Marker) -> Option<Unwind<'_, Op, S>> {
        let idx = self.marks.iter().rposition(|m| m.marker == marker)?;
        let mark = self.marks.split_off(idx).into_iter().next()?;
        Some(Unwind {
            snapshot: mark.snapshot,
            ops: self.ops.drain(mark.position..).rev(),
        })
    }
}

impl<Op> UndoLog<Op, ()> {
    /// Push a marker at the current log position.
    pub fn mark(&mut self) -> Marker {
        self.mark_with(())
    }
}

/// Operations popped by [`UndoLog::unwind`], newest first.
///
/// Dropping the iterator early still removes every popped operation.
pub struct Unwind<'a, Op, S> {
    /// Snapshot stored with the marker.
    pub snapshot: S,
    ops: Rev<Drain<'a, Op>>,
}

impl<Op, S> Iterator for Unwind<'_, Op, S> {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        self.ops.next()
    }
}
