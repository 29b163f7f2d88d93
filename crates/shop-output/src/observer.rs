//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use shop_core::Tick;
use shop_sim::{Shop, ShopEvent, SimObserver};

use crate::row::{EventRow, LaneSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every event and periodic lane snapshots to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Check for them with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    /// Snapshot every this many steps; `0` disables snapshots.
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, snapshot_interval: u64) -> Self {
        Self {
            writer,
            snapshot_interval,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &ShopEvent) {
        let detail = match *event {
            ShopEvent::Panic { steps_run, discarded_ms } => {
                format!("steps_run={steps_run};discarded_ms={discarded_ms:.3}")
            }
            _ => String::new(),
        };
        let row = EventRow {
            tick:   tick.0,
            event:  event.name(),
            entity: event.entity().map(|id| id.0),
            detail,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_step_end(&mut self, tick: Tick, shop: &Shop) {
        if self.snapshot_interval == 0 || !tick.0.is_multiple_of(self.snapshot_interval) {
            return;
        }
        let rows: Vec<LaneSnapshotRow> = shop
            .lanes()
            .iter()
            .flat_map(|lane| {
                lane.iter().enumerate().filter_map(move |(i, id)| {
                    let entity = shop.entity(id)?;
                    Some(LaneSnapshotRow {
                        tick:     tick.0,
                        lane:     lane.id().0,
                        index:    i as u32,
                        entity:   id.0,
                        position: entity.position,
                        state:    entity.state.as_str(),
                    })
                })
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_finish(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
