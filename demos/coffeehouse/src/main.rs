//! coffeehouse: a small shop run end to end on the lane simulation core.
//!
//! Customers walk in on a fixed cadence and order one to three items; the
//! kitchen brews them onto a drinks and a food conveyor; the service desk
//! hands them over.  Frames arrive with jitter, the "tab" is hidden for a
//! few seconds midway, and one long host freeze trips the stall guard.
//!
//! ```text
//! cargo run -p coffeehouse -- demos/coffeehouse/coffeehouse.toml
//! RUST_LOG=debug cargo run -p coffeehouse
//! ```

mod config;
mod desk;
mod frames;
mod ledger;
mod menu;
mod production;


use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_core::Tick;
use shop_output::{CsvWriter, OutputWriter, SimOutputObserver};
use shop_sim::{Shop, ShopEvent, SimBuilder, SimObserver};

use config::DemoConfig;
use desk::ServiceDesk;
use frames::{FRAME_MS, FrameSource};
use ledger::{Business, Ledger};
use production::Production;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:        &str = "output/coffeehouse";
const SNAPSHOT_INTERVAL: u64  = 30;     // every half second of sim time
const FRAME_JITTER_MS:   f64  = 3.0;
const HIDDEN_AT_SECS:    f64  = 30.0;
const HIDDEN_FOR_SECS:   f64  = 4.0;
const STALL_AT_SECS:     f64  = 60.0;
const STALL_MS:          f64  = 6_000.0; // > 240 steps: the stall guard trips

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:  SimOutputObserver<W>,
    steps:  u64,
    events: u64,
    panics: u64,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, steps: 0, events: 0, panics: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_step_start(&mut self, tick: Tick) {
        self.inner.on_step_start(tick);
    }

    fn on_event(&mut self, tick: Tick, event: &ShopEvent) {
        self.events += 1;
        if matches!(event, ShopEvent::Panic { .. }) {
            self.panics += 1;
        }
        self.inner.on_event(tick, event);
    }

    fn on_step_end(&mut self, tick: Tick, shop: &Shop) {
        self.steps += 1;
        self.inner.on_step_end(tick, shop);
    }

    fn on_finish(&mut self, final_tick: Tick) {
        self.inner.on_finish(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. Configuration.
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load(Path::new(&path))?,
        None => DemoConfig::default(),
    };
    println!("=== coffeehouse: shop lane simulation ===");
    println!(
        "Run: {} s  |  Speed: {}x  |  Patience: {} ms  |  Seed: {}",
        config.duration_secs, config.shop.speed, config.shop.patience_ms, config.shop.seed
    );
    println!();

    // 2. Build the sim: drinks conveyor, food conveyor, then the
    //    collaborators in dispatch order.
    let ledger = Rc::new(RefCell::new(Ledger::default()));
    let mut sim = SimBuilder::new(config.shop.clone())
        .conveyor()
        .conveyor()
        .subsystem(Production::new(&config))
        .subsystem(Business::new(Rc::clone(&ledger), config.rent_per_sec))
        .subsystem(ServiceDesk::new(Rc::clone(&ledger)))
        .build()?;

    // 3. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, SNAPSHOT_INTERVAL));

    // 4. Drive it from a jittered frame source.
    let frame_of = |secs: f64| (secs * 1000.0 / FRAME_MS) as u64;
    let total_frames = frame_of(config.duration_secs as f64);
    let (hide, show) = (frame_of(HIDDEN_AT_SECS), frame_of(HIDDEN_AT_SECS + HIDDEN_FOR_SECS));
    let stall = frame_of(STALL_AT_SECS);

    let mut frames = FrameSource::new(config.shop.seed, FRAME_JITTER_MS);
    let t0 = Instant::now();
    for frame in 0..total_frames {
        if frame == hide {
            sim.pause();
        }
        if frame == show {
            sim.unpause(&mut obs);
        }
        if frame == stall {
            frames.stall(STALL_MS);
        }
        sim.on_frame(frames.next_timestamp(), &mut obs);
    }
    sim.finish(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let stats = sim.stats();
    let shop = sim.shop();
    let ledger = ledger.borrow();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  sim clock           : {}", shop.clock());
    println!(
        "  frames              : {} processed, {} dropped",
        stats.frames, stats.dropped_frames
    );
    println!("  steps               : {} ({} panics)", obs.steps, obs.panics);
    println!("  events.csv          : {} rows", obs.events);
    println!();
    println!("{:<22} {:>10}", "Business", "");
    println!("{}", "-".repeat(33));
    println!("{:<22} {:>10.2}", "money", ledger.money);
    println!("{:<22} {:>10}", "items sold", ledger.items_sold);
    println!("{:<22} {:>10}", "items wasted", ledger.wasted);
    println!("{:<22} {:>10}", "happy customers", ledger.happy);
    println!("{:<22} {:>10}", "angry customers", ledger.angry);
    println!("{:<22} {:>9.0}%", "satisfaction", ledger.satisfaction() * 100.0);
    println!("{:<22} {:>10}", "still queueing", shop.customers_waiting());

    Ok(())
}
