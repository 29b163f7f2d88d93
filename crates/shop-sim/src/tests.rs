//! Integration tests for shop-sim.

use std::sync::{Arc, Mutex};

use shop_core::{EntityId, FixedGap, LaneId, ProductType, ShopConfig, Tick};
use shop_entity::{CustomerData, EntityError, EntityState, Mood};
use shop_schedule::FrameOutcome;

use crate::{
    NoopObserver, NoopSubsystem, Shop, ShopError, ShopEvent, SimBuilder, SimError, SimObserver,
    StepContext, Subsystem,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const INTERVAL: f64 = 1000.0 / 60.0;

fn mid(n: u32) -> f64 {
    (n as f64 + 0.5) * INTERVAL
}

fn pt(name: &str) -> ProductType {
    ProductType::new(name)
}

/// A shop with one conveyor and deterministic spacing.
fn shop() -> (Shop, LaneId) {
    let mut shop = Shop::new(&ShopConfig::default());
    shop.set_gap_source(Box::new(FixedGap(0.0)));
    let conveyor = shop.add_conveyor();
    (shop, conveyor)
}

fn customer_at(shop: &mut Shop, request: &[&str], position: f32) -> EntityId {
    customer_with_patience(shop, request, position, 10_000.0)
}

fn customer_with_patience(shop: &mut Shop, request: &[&str], position: f32, patience_ms: f64) -> EntityId {
    let data = CustomerData::new(request.iter().map(|s| pt(s)).collect(), patience_ms);
    shop.spawn_customer_at(data, position)
}

/// Step the shop directly `n` times, collecting `(step index, event)`.
fn tick_n(shop: &mut Shop, n: usize) -> Vec<(usize, ShopEvent)> {
    let mut out = Vec::new();
    for i in 0..n {
        out.extend(shop.tick(INTERVAL).into_iter().map(|e| (i, e)));
    }
    out
}

/// Observer that keeps every event and the end-of-step clock.
#[derive(Default)]
struct Recorder {
    events: Vec<(Tick, ShopEvent)>,
    steps:  u64,
    finish: Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, tick: Tick, event: &ShopEvent) {
        self.events.push((tick, *event));
    }

    fn on_step_end(&mut self, _tick: Tick, _shop: &Shop) {
        self.steps += 1;
    }

    fn on_finish(&mut self, final_tick: Tick) {
        self.finish = Some(final_tick);
    }
}

impl Recorder {
    fn count(&self, pred: impl Fn(&ShopEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }
}

/// Appends `"<name>:<what>"` to a shared log.
struct Probe {
    name: &'static str,
    log:  Arc<Mutex<Vec<String>>>,
}

impl Subsystem for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn tick(&mut self, ctx: &StepContext, _shop: &mut Shop) {
        self.log.lock().unwrap().push(format!("{}:tick@{}", self.name, ctx.tick));
    }

    fn on_event(&mut self, event: &ShopEvent, _ctx: &StepContext, _shop: &mut Shop) {
        self.log.lock().unwrap().push(format!("{}:{}", self.name, event.name()));
    }
}

/// Minimal service desk: hands arrived products to the front customer,
/// sends customers home, and cleans up after them.
#[derive(Default)]
struct Desk {
    left: Arc<Mutex<Vec<(EntityId, Option<Mood>)>>>,
}

impl Desk {
    fn serve(shop: &mut Shop) {
        let Ok(Some(customer)) = shop.first_in_line(shop.queue_in()) else { return };
        let conveyors: Vec<LaneId> = shop.conveyors().collect();
        for lane in conveyors {
            let Ok(Some(product)) = shop.first_in_line(lane) else { continue };
            let arrived = shop.entity(product).is_some_and(|e| e.state == EntityState::Arrived);
            if arrived && shop.wants_product(customer, product).unwrap_or(false) {
                shop.take_product(customer, product).unwrap();
            }
        }
        if shop.is_satisfied(customer).unwrap_or(false) {
            shop.start_leaving_happy(customer).unwrap();
        }
    }
}

impl Subsystem for Desk {
    fn name(&self) -> &str {
        "desk"
    }

    fn on_event(&mut self, event: &ShopEvent, _ctx: &StepContext, shop: &mut Shop) {
        match *event {
            ShopEvent::CustomerStoppedFirstInLine(_) | ShopEvent::ProductStoppedFirstInLine(_) => {
                Desk::serve(shop);
            }
            ShopEvent::PatienceExpired(id) => {
                let _ = shop.start_leaving_angry(id);
            }
            ShopEvent::CustomerLeft(id) => {
                let mood = shop.entities().customer(id).ok().and_then(|c| c.mood());
                self.left.lock().unwrap().push((id, mood));
                shop.destroy(id).unwrap();
            }
            ShopEvent::Panic { .. } => {}
        }
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        let shop = sim.shop();
        assert_eq!(shop.lanes().len(), 2);
        assert_eq!(shop.queue_in(), LaneId(0));
        assert_eq!(shop.queue_leave(), LaneId(1));
        assert!(!sim.is_paused());
        assert_eq!(shop.clock().current_tick, Tick(0));
    }

    #[test]
    fn conveyors_follow_customer_lanes() {
        let sim = SimBuilder::new(ShopConfig::default())
            .conveyor()
            .conveyor_with_length(120.0)
            .build()
            .unwrap();
        let conveyors: Vec<LaneId> = sim.shop().conveyors().collect();
        assert_eq!(conveyors, vec![LaneId(2), LaneId(3)]);
        assert_eq!(sim.shop().lane(LaneId(2)).unwrap().extent(), 300.0);
        assert_eq!(sim.shop().lane(LaneId(3)).unwrap().extent(), 120.0);
    }

    #[test]
    fn invalid_config_errors() {
        let config = ShopConfig { speed: 0.0, ..ShopConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn zero_length_conveyor_errors() {
        let result = SimBuilder::new(ShopConfig::default()).conveyor_with_length(0.0).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn subsystems_keep_registration_order() {
        let sim = SimBuilder::new(ShopConfig::default())
            .subsystem(NoopSubsystem)
            .subsystem(Desk::default())
            .build()
            .unwrap();
        assert_eq!(sim.subsystem_names().collect::<Vec<_>>(), vec!["noop", "desk"]);
    }
}

// ── Shop: spawning and lookups ────────────────────────────────────────────────

#[cfg(test)]
mod shop_tests {
    use super::*;

    #[test]
    fn customer_spawns_at_queue_entrance() {
        let (mut shop, _) = shop();
        let c = shop.spawn_customer(vec![pt("coffee")]);
        let e = shop.entity(c).unwrap();
        assert_eq!(e.position, 400.0);
        assert_eq!(e.extent, 32.0);
        assert_eq!(e.lane, shop.queue_in());
        assert_eq!(shop.customers_waiting(), 1);
        assert_eq!(shop.first_in_line(shop.queue_in()).unwrap(), Some(c));
    }

    #[test]
    fn product_spawns_at_conveyor_start() {
        let (mut shop, conveyor) = shop();
        let p = shop.spawn_product(conveyor, pt("muffin")).unwrap();
        let e = shop.entity(p).unwrap();
        assert_eq!(e.position, 0.0);
        assert_eq!(e.lane, conveyor);
        assert_eq!(shop.entities().product(p).unwrap().product_type().as_str(), "muffin");
    }

    #[test]
    fn products_only_go_on_conveyors() {
        let (mut shop, _) = shop();
        let queue = shop.queue_in();
        assert_eq!(shop.spawn_product(queue, pt("coffee")), Err(ShopError::NotAConveyor(queue)));
        assert_eq!(
            shop.spawn_product(LaneId(9), pt("coffee")),
            Err(ShopError::LaneNotFound(LaneId(9)))
        );
    }

    #[test]
    fn destroy_detaches_from_lane() {
        let (mut shop, _) = shop();
        let a = customer_at(&mut shop, &["coffee"], 0.0);
        let b = customer_at(&mut shop, &["coffee"], 50.0);
        shop.destroy(a).unwrap();
        assert!(shop.entity(a).is_none());
        assert_eq!(shop.first_in_line(shop.queue_in()).unwrap(), Some(b));
        assert_eq!(
            shop.destroy(a).unwrap_err(),
            ShopError::Entity(EntityError::NotFound(a))
        );
    }
}

// ── Shop: customer service ────────────────────────────────────────────────────

#[cfg(test)]
mod service_tests {
    use super::*;

    #[test]
    fn take_product_removes_one_matching_item() {
        let (mut shop, conveyor) = shop();
        let c = customer_at(&mut shop, &["coffee", "muffin"], 0.0);
        let coffee = shop.spawn_product(conveyor, pt("coffee")).unwrap();

        assert!(shop.wants_product(c, coffee).unwrap());
        assert!(shop.take_product(c, coffee).unwrap());
        assert!(shop.entity(coffee).is_none());
        assert!(!shop.is_satisfied(c).unwrap());
        assert_eq!(shop.entities().customer(c).unwrap().outstanding(), &[pt("muffin")]);

        let muffin = shop.spawn_product(conveyor, pt("muffin")).unwrap();
        assert!(shop.take_product(c, muffin).unwrap());
        assert!(shop.is_satisfied(c).unwrap());
    }

    #[test]
    fn unrequested_product_is_consumed_without_effect() {
        let (mut shop, conveyor) = shop();
        let c = customer_at(&mut shop, &["coffee"], 0.0);
        let tea = shop.spawn_product(conveyor, pt("tea")).unwrap();

        assert!(!shop.wants_product(c, tea).unwrap());
        assert!(!shop.take_product(c, tea).unwrap());
        assert!(shop.entity(tea).is_none());
        assert!(shop.lane(conveyor).unwrap().is_empty());
        assert_eq!(shop.entities().customer(c).unwrap().outstanding(), &[pt("coffee")]);
    }

    #[test]
    fn duplicate_request_items_are_taken_one_at_a_time() {
        let (mut shop, conveyor) = shop();
        let c = customer_at(&mut shop, &["coffee", "coffee"], 0.0);
        let p = shop.spawn_product(conveyor, pt("coffee")).unwrap();
        shop.take_product(c, p).unwrap();
        assert!(!shop.is_satisfied(c).unwrap());
        assert_eq!(shop.entities().customer(c).unwrap().outstanding().len(), 1);
    }

    #[test]
    fn wrong_kinds_are_rejected() {
        let (mut shop, conveyor) = shop();
        let c = customer_at(&mut shop, &["coffee"], 0.0);
        let p = shop.spawn_product(conveyor, pt("coffee")).unwrap();
        assert_eq!(
            shop.wants_product(p, p).unwrap_err(),
            ShopError::Entity(EntityError::NotACustomer(p))
        );
        assert_eq!(
            shop.take_product(c, c).unwrap_err(),
            ShopError::Entity(EntityError::NotAProduct(c))
        );
        // A failed hand-over leaves the product in place.
        assert_eq!(
            shop.take_product(p, p).unwrap_err(),
            ShopError::Entity(EntityError::NotACustomer(p))
        );
        assert!(shop.entity(p).is_some());
    }

    #[test]
    fn leaving_moves_customer_to_exit_tail() {
        let (mut shop, _) = shop();
        let a = customer_at(&mut shop, &["coffee"], 0.0);
        let b = customer_at(&mut shop, &["coffee"], 40.0);
        shop.start_leaving_happy(b).unwrap();
        shop.start_leaving_angry(a).unwrap();

        let leave = shop.lane(shop.queue_leave()).unwrap();
        assert_eq!(leave.members(), &[b, a]);
        assert!(shop.lane(shop.queue_in()).unwrap().is_empty());

        let eb = shop.entity(b).unwrap();
        assert_eq!(eb.lane, shop.queue_leave());
        assert_eq!(eb.state, EntityState::Leaving);
        assert_eq!(eb.position, 40.0);
        assert_eq!(shop.entities().customer(b).unwrap().mood(), Some(Mood::Happy));
        assert_eq!(shop.entities().customer(a).unwrap().mood(), Some(Mood::Angry));
    }

    #[test]
    fn leaving_is_irreversible() {
        let (mut shop, _) = shop();
        let c = customer_at(&mut shop, &["coffee"], 0.0);
        shop.start_leaving_happy(c).unwrap();
        assert_eq!(shop.start_leaving_angry(c), Err(ShopError::AlreadyLeaving(c)));
        assert_eq!(shop.start_leaving_happy(c), Err(ShopError::AlreadyLeaving(c)));
        assert_eq!(shop.entities().customer(c).unwrap().mood(), Some(Mood::Happy));
        assert_eq!(shop.lane(shop.queue_leave()).unwrap().len(), 1);
    }
}

// ── Shop: stepping and events ─────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn lone_customer_stops_first_in_line_once() {
        let (mut shop, _) = shop();
        let c = customer_at(&mut shop, &["coffee"], 100.0);
        let events = tick_n(&mut shop, 40);
        assert_eq!(events, vec![(22, ShopEvent::CustomerStoppedFirstInLine(c))]);
        assert_eq!(shop.entity(c).unwrap().position, 0.0);
    }

    #[test]
    fn product_stops_first_in_line_once() {
        let (mut shop, conveyor) = shop();
        let p = shop.spawn_product(conveyor, pt("coffee")).unwrap();
        let events = tick_n(&mut shop, 80);
        assert_eq!(events, vec![(63, ShopEvent::ProductStoppedFirstInLine(p))]);
        assert_eq!(shop.entity(p).unwrap().position, 284.0);
    }

    #[test]
    fn leaver_signals_once_and_stays_until_destroyed() {
        let (mut shop, _) = shop();
        let c = customer_at(&mut shop, &["coffee"], 0.0);
        shop.start_leaving_happy(c).unwrap();

        let events = tick_n(&mut shop, 60);
        assert_eq!(events, vec![(44, ShopEvent::CustomerLeft(c))]);
        let e = shop.entity(c).unwrap();
        assert_eq!(e.state, EntityState::Departed);
        assert_eq!(e.position, 202.5);
    }

    #[test]
    fn clock_advances_by_dt() {
        let (mut shop, _) = shop();
        tick_n(&mut shop, 3);
        assert_eq!(shop.clock().current_tick, Tick(3));
        assert!((shop.clock().elapsed_ms - 3.0 * INTERVAL).abs() < 1e-9);
    }

    #[test]
    fn patience_expires_once() {
        let config = ShopConfig { patience_ms: 50.0, ..ShopConfig::default() };
        let mut shop = Shop::new(&config);
        let c = shop.spawn_customer(vec![pt("coffee")]);

        let events = tick_n(&mut shop, 30);
        let expiries: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, ShopEvent::PatienceExpired(_)))
            .collect();
        assert_eq!(expiries.len(), 1);
        assert_eq!(expiries[0].1, ShopEvent::PatienceExpired(c));
        assert!(expiries[0].0 >= 2, "expired after only {} steps", expiries[0].0 + 1);
        assert!(shop.entities().customer(c).unwrap().patience_expired());
        // The core never sends the customer away on its own.
        assert_eq!(shop.entity(c).unwrap().lane, shop.queue_in());
    }

    #[test]
    fn leaving_customers_do_not_wait() {
        let config = ShopConfig { patience_ms: 50.0, ..ShopConfig::default() };
        let mut shop = Shop::new(&config);
        let c = shop.spawn_customer(vec![pt("coffee")]);
        shop.start_leaving_happy(c).unwrap();
        let events = tick_n(&mut shop, 10);
        assert!(events.iter().all(|(_, e)| !matches!(e, ShopEvent::PatienceExpired(_))));
        assert_eq!(shop.entities().customer(c).unwrap().waited_ms(), 0.0);
    }
}

// ── Sim: scheduling and dispatch ──────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use super::*;

    fn sim_with(log: &Arc<Mutex<Vec<String>>>) -> crate::Sim {
        SimBuilder::new(ShopConfig::default())
            .gap_source(FixedGap(0.0))
            .conveyor()
            .subsystem(Probe { name: "production", log: Arc::clone(log) })
            .subsystem(Probe { name: "business", log: Arc::clone(log) })
            .build()
            .unwrap()
    }

    #[test]
    fn early_frame_is_dropped() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        let outcome = sim.on_frame(INTERVAL / 2.0, &mut NoopObserver);
        assert_eq!(outcome, FrameOutcome::Dropped);
        assert_eq!(sim.shop().clock().current_tick, Tick(0));
    }

    #[test]
    fn frame_runs_whole_intervals() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.on_frame(mid(3), &mut rec);
        assert_eq!(outcome.steps(), 3);
        assert_eq!(rec.steps, 3);
        assert_eq!(sim.shop().clock().current_tick, Tick(3));
    }

    #[test]
    fn subsystem_hooks_run_in_registration_order_before_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sim = sim_with(&log);
        let c = customer_at(sim.shop_mut(), &["coffee"], 4.0);
        sim.run_steps(1, &mut NoopObserver);

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                "production:tick@T0".to_string(),
                "business:tick@T0".to_string(),
                "production:customer_stopped_first_in_line".to_string(),
                "business:customer_stopped_first_in_line".to_string(),
            ]
        );
        assert_eq!(sim.shop().entity(c).unwrap().position, 0.0);
    }

    #[test]
    fn entities_spawned_in_tick_hook_move_that_step() {
        struct Spawner;
        impl Subsystem for Spawner {
            fn name(&self) -> &str {
                "spawner"
            }
            fn tick(&mut self, ctx: &StepContext, shop: &mut Shop) {
                if ctx.tick == Tick(0) {
                    let data = CustomerData::new(vec![ProductType::new("coffee")], 10_000.0);
                    shop.spawn_customer_at(data, 100.0);
                }
            }
        }

        let mut sim = SimBuilder::new(ShopConfig::default()).subsystem(Spawner).build().unwrap();
        sim.run_steps(1, &mut NoopObserver);
        let id = sim.shop().first_in_line(sim.shop().queue_in()).unwrap().unwrap();
        assert_eq!(sim.shop().entity(id).unwrap().position, 95.5);
    }

    #[test]
    fn stall_dispatches_one_panic() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sim = sim_with(&log);
        let mut rec = Recorder::default();

        let outcome = sim.on_frame(mid(300), &mut rec);
        assert!(outcome.panicked());
        assert_eq!(outcome.steps(), 240);
        assert_eq!(rec.steps, 240);
        assert_eq!(rec.count(|e| matches!(e, ShopEvent::Panic { .. })), 1);
        assert_eq!(sim.stats().panics, 1);

        let panics = log.lock().unwrap().iter().filter(|l| l.ends_with(":panic")).count();
        assert_eq!(panics, 2, "each subsystem sees the panic once");

        let (tick, event) = rec.events.last().unwrap();
        assert_eq!(*tick, Tick(240));
        match event {
            ShopEvent::Panic { steps_run, discarded_ms } => {
                assert_eq!(*steps_run, 240);
                assert!((discarded_ms - 60.5 * INTERVAL).abs() < 1e-6);
            }
            other => panic!("expected panic, got {other}"),
        }

        // The backlog is gone: the next on-time frame runs a single step.
        let next = sim.on_frame(mid(300) + 1.5 * INTERVAL, &mut rec);
        assert_eq!(next.steps(), 1);
        assert!(!next.panicked());
    }

    #[test]
    fn paused_frames_do_not_advance() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        assert!(sim.pause());
        assert!(!sim.pause());

        let outcome = sim.on_frame(mid(10), &mut NoopObserver);
        assert_eq!(outcome.steps(), 10);
        assert_eq!(sim.shop().clock().current_tick, Tick(0));
        assert!(!sim.advance(INTERVAL, &mut NoopObserver));
        assert_eq!(sim.run_steps(5, &mut NoopObserver), 0);
    }

    #[test]
    fn unpause_forces_exactly_one_step() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        let mut rec = Recorder::default();
        sim.pause();
        assert!(sim.unpause(&mut rec));
        assert_eq!(rec.steps, 1);
        assert_eq!(sim.shop().clock().current_tick, Tick(1));

        assert!(!sim.unpause(&mut rec));
        assert_eq!(rec.steps, 1);
        assert!(!sim.is_paused());
    }

    #[test]
    fn set_speed_rejects_bad_values() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        assert!(matches!(sim.set_speed(-2.0), Err(SimError::Schedule(_))));
        sim.set_speed(2.0).unwrap();
        assert!((sim.scheduler().step_interval_ms() - INTERVAL / 2.0).abs() < 1e-12);
    }

    #[test]
    fn stats_count_only_scheduler_steps() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        sim.on_frame(mid(3), &mut NoopObserver);
        assert_eq!(sim.run_steps(5, &mut NoopObserver), 5);
        assert_eq!(sim.stats().advances, 3);
        assert_eq!(sim.shop().clock().current_tick, Tick(8));

        sim.pause();
        sim.unpause(&mut NoopObserver);
        assert_eq!(sim.stats().advances, 4);
    }

    #[test]
    fn finish_reports_final_tick() {
        let mut sim = SimBuilder::new(ShopConfig::default()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_steps(7, &mut rec);
        sim.finish(&mut rec);
        assert_eq!(rec.finish, Some(Tick(7)));
    }
}

// ── End to end: a served customer ─────────────────────────────────────────────

#[cfg(test)]
mod service_flow {
    use super::*;

    #[test]
    fn served_customer_leaves_happy_and_is_destroyed() {
        let desk = Desk::default();
        let left = Arc::clone(&desk.left);
        let mut sim = SimBuilder::new(ShopConfig::default())
            .gap_source(FixedGap(0.0))
            .conveyor()
            .subsystem(desk)
            .build()
            .unwrap();
        let conveyor = sim.shop().conveyors().next().unwrap();
        let c = customer_at(sim.shop_mut(), &["coffee"], 100.0);
        let p = sim.shop_mut().spawn_product(conveyor, pt("coffee")).unwrap();

        let mut rec = Recorder::default();
        // Customer arrives at step 23, product at step 64.
        sim.run_steps(64, &mut rec);
        assert!(sim.shop().entity(p).is_none());
        assert_eq!(sim.shop().entity(c).unwrap().lane, sim.shop().queue_leave());

        // 45 steps from the front of the exit lane to its end.
        sim.run_steps(44, &mut rec);
        assert!(left.lock().unwrap().is_empty());
        sim.run_steps(1, &mut rec);

        assert_eq!(*left.lock().unwrap(), vec![(c, Some(Mood::Happy))]);
        assert!(sim.shop().entities().is_empty());
        assert_eq!(rec.count(|e| matches!(e, ShopEvent::CustomerLeft(_))), 1);

        // Nothing left to signal.
        sim.run_steps(50, &mut rec);
        assert_eq!(rec.count(|e| matches!(e, ShopEvent::CustomerLeft(_))), 1);
    }

    #[test]
    fn impatient_customer_leaves_angry() {
        let desk = Desk::default();
        let left = Arc::clone(&desk.left);
        let mut sim = SimBuilder::new(ShopConfig::default())
            .gap_source(FixedGap(0.0))
            .subsystem(desk)
            .build()
            .unwrap();
        let c = customer_with_patience(sim.shop_mut(), &["coffee"], 0.0, 200.0);

        sim.run_steps(200, &mut NoopObserver);
        assert_eq!(*left.lock().unwrap(), vec![(c, Some(Mood::Angry))]);
        assert!(sim.shop().entity(c).is_none());
    }

    #[test]
    fn patience_is_not_reported_for_a_customer_already_sent_home() {
        let desk = Desk::default();
        let mut sim = SimBuilder::new(ShopConfig::default())
            .gap_source(FixedGap(0.0))
            .subsystem(desk)
            .build()
            .unwrap();
        // Arrives and runs out of patience in the same step; the desk sends
        // them home happy on arrival since nothing is outstanding.
        let c = customer_with_patience(sim.shop_mut(), &[], 4.5, INTERVAL);

        let mut rec = Recorder::default();
        sim.run_steps(1, &mut rec);
        assert_eq!(rec.events, vec![(Tick(0), ShopEvent::CustomerStoppedFirstInLine(c))]);
        assert_eq!(sim.shop().entity(c).unwrap().lane, sim.shop().queue_leave());
        assert_eq!(sim.shop().entities().customer(c).unwrap().mood(), Some(Mood::Happy));
        assert!(!sim.shop().is_queueing(c));
    }

    #[test]
    fn queue_compacts_behind_served_customer() {
        let mut sim = SimBuilder::new(ShopConfig::default())
            .gap_source(FixedGap(0.0))
            .subsystem(Desk::default())
            .build()
            .unwrap();
        let a = customer_at(sim.shop_mut(), &[], 0.0);
        let b = customer_at(sim.shop_mut(), &["coffee"], 32.0);
        sim.shop_mut().start_leaving_happy(a).unwrap();

        let mut rec = Recorder::default();
        sim.run_steps(20, &mut rec);
        assert_eq!(sim.shop().entity(b).unwrap().position, 0.0);
        assert_eq!(rec.count(|e| *e == ShopEvent::CustomerStoppedFirstInLine(b)), 1);
    }
}
