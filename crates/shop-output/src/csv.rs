//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `lane_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventRow, LaneSnapshotRow, OutputResult};
use crate::writer::OutputWriter;

/// Writes simulation traces to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "event", "entity", "detail"])?;

        let mut snapshots = Writer::from_path(dir.join("lane_snapshots.csv"))?;
        snapshots.write_record(["tick", "lane", "index", "entity", "position", "state"])?;

        Ok(Self {
            events,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.event.to_string(),
            row.entity.map(|e| e.to_string()).unwrap_or_default(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[LaneSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.lane.to_string(),
                row.index.to_string(),
                row.entity.to_string(),
                row.position.to_string(),
                row.state.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
