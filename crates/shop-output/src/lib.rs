//! `shop-output`: trace writers for the shop lane simulation.
//!
//! | Backend | Files created                           |
//! |---------|-----------------------------------------|
//! | CSV     | `events.csv`, `lane_snapshots.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `shop_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shop_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 60);
//! sim.run_steps(3_600, &mut obs);
//! sim.finish(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EventRow, LaneSnapshotRow};
pub use writer::OutputWriter;
