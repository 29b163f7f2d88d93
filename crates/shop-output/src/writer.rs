//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, LaneSnapshotRow, OutputResult};

/// Sink for simulation traces.
///
/// Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one lifecycle event.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write the members of every lane at one tick.
    fn write_snapshots(&mut self, rows: &[LaneSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
