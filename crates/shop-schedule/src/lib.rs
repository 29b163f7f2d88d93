//! `shop-schedule`: turns irregular frame callbacks into fixed simulation steps.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`scheduler`] | `FrameScheduler`, `Advance`, `FrameOutcome`, `FrameStats`  |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Accumulator model (summary)
//!
//! ```text
//! on_frame(ts):
//!   ts < last_frame + interval          → frame dropped, nothing changes
//!   delta += ts - last_frame; last_frame = ts
//!   while delta >= interval:
//!     more than max_steps_per_frame?    → panic: delta = 0, stop draining
//!     advance(interval); delta -= interval
//! ```
//!
//! `advance` does nothing while paused but the accumulator still drains, so
//! unpausing never releases a burst of backlog.  Unpausing instead forces a
//! single advance so state is fresh before the next step boundary.

pub mod error;
pub mod scheduler;


pub use error::{ScheduleError, ScheduleResult};
pub use scheduler::{Advance, FrameOutcome, FrameScheduler, FrameStats, StallPanic};
