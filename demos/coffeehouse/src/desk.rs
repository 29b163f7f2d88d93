//! The service desk: matches products to the customer at the front.

use shop_core::{EntityId, LaneId, ProductType};
use shop_entity::EntityState;
use shop_sim::{Shop, ShopEvent, ShopResult, StepContext, Subsystem};

use crate::ledger::SharedLedger;
use crate::menu;

/// Serves the front customer from whatever rests at the end of each
/// conveyor, sends out customers who are done or fed up, and removes them
/// once they are out of the door.
///
/// Register last: it destroys departed customers, and subsystems after it
/// would only see a dangling id.
pub struct ServiceDesk {
    ledger: SharedLedger,
}

impl ServiceDesk {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    fn serve(&mut self, shop: &mut Shop) -> ShopResult<()> {
        let Some(customer) = shop.first_in_line(shop.queue_in())? else { return Ok(()) };
        if !is_resting(shop, customer) {
            return Ok(());
        }

        let conveyors: Vec<LaneId> = shop.conveyors().collect();
        for conveyor in conveyors {
            let Some(product) = shop.first_in_line(conveyor)? else { continue };
            if !is_resting(shop, product) {
                continue;
            }
            let product_type = shop.entities().product(product)?.product_type().clone();
            if shop.wants_product(customer, product)? {
                shop.take_product(customer, product)?;
                let price = menu::lookup(&product_type).map_or(0.0, |item| item.price);
                self.ledger.borrow_mut().sell(price);
            } else if !wanted_by_queue(shop, &product_type) {
                // Ordered by someone who already gave up.
                shop.destroy(product)?;
                self.ledger.borrow_mut().wasted += 1;
                tracing::debug!(product = %product, %product_type, "discarded");
            }
        }

        if shop.is_satisfied(customer)? {
            shop.start_leaving_happy(customer)?;
        }
        Ok(())
    }

    fn handle(&mut self, event: &ShopEvent, shop: &mut Shop) -> ShopResult<()> {
        match *event {
            ShopEvent::CustomerStoppedFirstInLine(_) | ShopEvent::ProductStoppedFirstInLine(_) => {
                self.serve(shop)
            }
            ShopEvent::PatienceExpired(customer) => shop.start_leaving_angry(customer),
            ShopEvent::CustomerLeft(customer) => shop.destroy(customer).map(drop),
            ShopEvent::Panic { .. } => Ok(()),
        }
    }
}

impl Subsystem for ServiceDesk {
    fn name(&self) -> &str {
        "service-desk"
    }

    fn on_event(&mut self, event: &ShopEvent, ctx: &StepContext, shop: &mut Shop) {
        if let Err(e) = self.handle(event, shop) {
            tracing::warn!(tick = %ctx.tick, %event, error = %e, "service desk could not handle event");
        }
    }
}

fn is_resting(shop: &Shop, id: EntityId) -> bool {
    shop.entity(id).is_some_and(|e| e.state == EntityState::Arrived)
}

fn wanted_by_queue(shop: &Shop, product_type: &ProductType) -> bool {
    let Ok(queue) = shop.lane(shop.queue_in()) else { return false };
    queue
        .iter()
        .any(|id| shop.entities().customer(id).is_ok_and(|c| c.wants(product_type)))
}
