//! Customer arrivals and the kitchen.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use shop_core::{LaneId, ProductType};
use shop_entity::CustomerData;
use shop_sim::{Shop, ShopResult, StepContext, Subsystem};

use crate::config::DemoConfig;
use crate::menu::{MENU, TITLES};

/// One kitchen station feeding one conveyor, first in first out.
#[derive(Default)]
struct Station {
    queue:       VecDeque<ProductType>,
    progress_ms: f64,
}

/// Lets customers in on a fixed cadence and brews whatever they ordered.
pub struct Production {
    rng:              SmallRng,
    arrival_every_ms: f64,
    since_arrival_ms: f64,
    brew_ms:          f64,
    max_waiting:      usize,
    patience_ms:      f64,
    stations:         [Station; 2],
}

impl Production {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            rng:              SmallRng::seed_from_u64(config.shop.seed.wrapping_add(1)),
            arrival_every_ms: config.arrival_every_ms,
            // First customer walks in on the first step.
            since_arrival_ms: config.arrival_every_ms,
            brew_ms:          config.brew_ms,
            max_waiting:      config.max_waiting,
            patience_ms:      config.shop.patience_ms,
            stations:         Default::default(),
        }
    }

    fn admit(&mut self, shop: &mut Shop) {
        let count = self.rng.gen_range(1..=3);
        let mut request = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(item) = MENU.choose(&mut self.rng) else { return };
            let product_type = ProductType::new(item.name);
            self.stations[item.category.line()].queue.push_back(product_type.clone());
            request.push(product_type);
        }

        let mut data = CustomerData::new(request, self.patience_ms)
            .with_sprite(self.rng.gen_range(0..4));
        if let Some(title) = TITLES.choose(&mut self.rng) {
            data = data.with_title(*title);
        }
        let entrance = shop.lane(shop.queue_in()).map_or(0.0, |l| l.extent());
        let id = shop.spawn_customer_at(data, entrance);
        tracing::info!(customer = %id, items = count, "customer arrived");
    }

    /// `true` when the start of `conveyor` has room for another product.
    fn start_is_clear(shop: &Shop, conveyor: LaneId) -> ShopResult<bool> {
        let lane = shop.lane(conveyor)?;
        let Some(last) = lane.members().last() else { return Ok(true) };
        Ok(shop.entity(*last).is_none_or(|e| e.position >= e.extent))
    }

    fn brew(&mut self, ctx: &StepContext, shop: &mut Shop) -> ShopResult<()> {
        let conveyors: Vec<LaneId> = shop.conveyors().collect();
        for (station, &conveyor) in self.stations.iter_mut().zip(&conveyors) {
            if station.queue.is_empty() {
                continue;
            }
            station.progress_ms += ctx.dt_ms;
            if station.progress_ms < self.brew_ms || !Self::start_is_clear(shop, conveyor)? {
                continue;
            }
            if let Some(product_type) = station.queue.pop_front() {
                station.progress_ms = 0.0;
                let id = shop.spawn_product(conveyor, product_type.clone())?;
                tracing::debug!(product = %id, %product_type, "brewed");
            }
        }
        Ok(())
    }
}

impl Subsystem for Production {
    fn name(&self) -> &str {
        "production"
    }

    fn tick(&mut self, ctx: &StepContext, shop: &mut Shop) {
        self.since_arrival_ms += ctx.dt_ms;
        if self.since_arrival_ms >= self.arrival_every_ms {
            if shop.customers_waiting() < self.max_waiting {
                self.admit(shop);
            }
            self.since_arrival_ms = 0.0;
        }

        if let Err(e) = self.brew(ctx, shop) {
            tracing::warn!(error = %e, "production step failed");
        }
    }
}
