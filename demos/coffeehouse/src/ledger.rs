//! Money and satisfaction bookkeeping shared by the business-side
//! subsystems.

use std::cell::RefCell;
use std::rc::Rc;

use shop_entity::Mood;
use shop_sim::{Shop, ShopEvent, StepContext, Subsystem};

#[derive(Debug, Default, Clone)]
pub struct Ledger {
    pub money:      f64,
    pub items_sold: u32,
    pub wasted:     u32,
    pub happy:      u32,
    pub angry:      u32,
}

impl Ledger {
    pub fn sell(&mut self, price: f64) {
        self.money += price;
        self.items_sold += 1;
    }

    /// Share of departed customers who left happy; `1.0` before anyone left.
    pub fn satisfaction(&self) -> f64 {
        let total = self.happy + self.angry;
        if total == 0 {
            1.0
        } else {
            f64::from(self.happy) / f64::from(total)
        }
    }
}

pub type SharedLedger = Rc<RefCell<Ledger>>;

// ── Business ──────────────────────────────────────────────────────────────────

/// Pays the rent every step and books each departure by mood.
///
/// Must be registered before the service desk, which destroys departed
/// customers.
pub struct Business {
    ledger:       SharedLedger,
    rent_per_sec: f64,
}

impl Business {
    pub fn new(ledger: SharedLedger, rent_per_sec: f64) -> Self {
        Self { ledger, rent_per_sec }
    }
}

impl Subsystem for Business {
    fn name(&self) -> &str {
        "business"
    }

    fn tick(&mut self, ctx: &StepContext, _shop: &mut Shop) {
        self.ledger.borrow_mut().money -= self.rent_per_sec * ctx.dt_ms / 1_000.0;
    }

    fn on_event(&mut self, event: &ShopEvent, _ctx: &StepContext, shop: &mut Shop) {
        let ShopEvent::CustomerLeft(id) = *event else { return };
        let mood = shop.entities().customer(id).ok().and_then(|c| c.mood());
        let mut ledger = self.ledger.borrow_mut();
        match mood {
            Some(Mood::Happy) => ledger.happy += 1,
            Some(Mood::Angry) => ledger.angry += 1,
            None => tracing::warn!(customer = %id, "customer left without a mood"),
        }
        tracing::info!(
            customer = %id,
            money = ledger.money,
            satisfaction = ledger.satisfaction(),
            "business data updated"
        );
    }
}
