//! The `Shop`, owner of every lane and entity.

use shop_core::{EntityId, GapSource, LaneId, ProductType, ShopConfig, SpacingRng, StepClock};
use shop_entity::{
    CustomerData, Entity, EntityError, EntityKind, EntityState, EntityStore, Mood, ProductData,
};
use shop_lane::{Lane, LaneEvent, LaneKind, MovementParams, step_lane};

use crate::{ShopError, ShopEvent, ShopResult};

/// The aggregate that owns lanes and entities.
///
/// Every shop has one entering queue and one exit lane; conveyors are added
/// per product line.  Lane ids are indices into `lanes` and never change.
pub struct Shop {
    entities:        EntityStore,
    lanes:           Vec<Lane>,
    queue_in:        LaneId,
    queue_leave:     LaneId,
    params:          MovementParams,
    gaps:            Box<dyn GapSource>,
    clock:           StepClock,
    patience_ms:     f64,
    customer_extent: f32,
    product_extent:  f32,
    conveyor_length: f32,
}

impl Shop {
    /// Build an empty shop with its two customer lanes.  Spacing jitter is
    /// seeded from `config.seed`.
    pub fn new(config: &ShopConfig) -> Self {
        let queue_in = LaneId(0);
        let queue_leave = LaneId(1);
        Self {
            entities:        EntityStore::new(),
            lanes:           vec![
                Lane::new(queue_in, LaneKind::QueueIn, config.queue_length),
                Lane::new(queue_leave, LaneKind::QueueLeave, config.leave_length),
            ],
            queue_in,
            queue_leave,
            params:          MovementParams::from_config(config),
            gaps:            Box::new(SpacingRng::new(config.seed)),
            clock:           StepClock::new(),
            patience_ms:     config.patience_ms,
            customer_extent: config.customer_extent,
            product_extent:  config.product_extent,
            conveyor_length: config.conveyor_length,
        }
    }

    /// Replace the spacing gap source (tests use `FixedGap`).
    pub fn set_gap_source(&mut self, gaps: Box<dyn GapSource>) {
        self.gaps = gaps;
    }

    /// Append a conveyor of the configured length.
    pub fn add_conveyor(&mut self) -> LaneId {
        let len = self.conveyor_length;
        self.add_conveyor_with_length(len)
    }

    pub fn add_conveyor_with_length(&mut self, length: f32) -> LaneId {
        let id = LaneId(self.lanes.len() as u16);
        self.lanes.push(Lane::new(id, LaneKind::Conveyor, length));
        id
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn queue_in(&self) -> LaneId {
        self.queue_in
    }

    #[inline]
    pub fn queue_leave(&self) -> LaneId {
        self.queue_leave
    }

    /// All lanes in step order.
    #[inline]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, id: LaneId) -> ShopResult<&Lane> {
        self.lanes.get(id.index()).ok_or(ShopError::LaneNotFound(id))
    }

    /// Conveyor lane ids in creation order.
    pub fn conveyors(&self) -> impl Iterator<Item = LaneId> + '_ {
        self.lanes.iter().filter(|l| l.kind() == LaneKind::Conveyor).map(Lane::id)
    }

    #[inline]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[inline]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    #[inline]
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    /// The entity at the front of `lane`.
    pub fn first_in_line(&self, lane: LaneId) -> ShopResult<Option<EntityId>> {
        Ok(self.lane(lane)?.front())
    }

    /// `true` while `id` is a customer in the entering queue.
    pub fn is_queueing(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|e| e.lane == self.queue_in)
    }

    /// Customers still in the entering queue.
    pub fn customers_waiting(&self) -> usize {
        self.lanes[self.queue_in.index()].len()
    }

    // ── Spawning and destruction ──────────────────────────────────────────

    /// Add a customer at the entrance (the far end of the entering queue).
    pub fn spawn_customer(&mut self, request: Vec<ProductType>) -> EntityId {
        let at = self.lanes[self.queue_in.index()].extent();
        let data = CustomerData::new(request, self.patience_ms);
        self.spawn_customer_at(data, at)
    }

    /// Add a fully specified customer at `position` of the entering queue.
    pub fn spawn_customer_at(&mut self, data: CustomerData, position: f32) -> EntityId {
        let lane = self.queue_in;
        let id = self.entities.insert(lane, position, self.customer_extent, EntityKind::Customer(data));
        self.lanes[lane.index()].append(id);
        tracing::debug!(entity = %id, position, "customer spawned");
        id
    }

    /// Add a product at the start of `conveyor`.
    pub fn spawn_product(&mut self, conveyor: LaneId, product_type: ProductType) -> ShopResult<EntityId> {
        self.spawn_product_at(conveyor, product_type, 0.0)
    }

    pub fn spawn_product_at(
        &mut self,
        conveyor:     LaneId,
        product_type: ProductType,
        position:     f32,
    ) -> ShopResult<EntityId> {
        if self.lane(conveyor)?.kind() != LaneKind::Conveyor {
            return Err(ShopError::NotAConveyor(conveyor));
        }
        let kind = EntityKind::Product(ProductData::new(product_type));
        let id = self.entities.insert(conveyor, position, self.product_extent, kind);
        self.lanes[conveyor.index()].append(id);
        tracing::debug!(entity = %id, lane = %conveyor, "product spawned");
        Ok(id)
    }

    /// Detach `id` from its lane and drop it.  This is the only way an
    /// entity leaves the simulation.
    pub fn destroy(&mut self, id: EntityId) -> ShopResult<Entity> {
        let entity = self.entities.remove(id)?;
        if let Some(lane) = self.lanes.get_mut(entity.lane.index()) {
            lane.remove(id);
        }
        tracing::debug!(entity = %id, "destroyed");
        Ok(entity)
    }

    // ── Customer service ──────────────────────────────────────────────────

    /// `true` iff `product`'s type is still outstanding for `customer`.
    pub fn wants_product(&self, customer: EntityId, product: EntityId) -> ShopResult<bool> {
        let product_type = self.entities.product(product)?.product_type();
        Ok(self.entities.customer(customer)?.wants(product_type))
    }

    /// Hand `product` to `customer`: one matching request item is removed and
    /// the product is destroyed.
    ///
    /// Handing over an unrequested product still consumes it and leaves the
    /// request untouched; check [`wants_product`][Self::wants_product]
    /// first.  Returns whether a request item was removed.
    pub fn take_product(&mut self, customer: EntityId, product: EntityId) -> ShopResult<bool> {
        let product_type = self.entities.product(product)?.product_type().clone();
        // Validate the customer before destroying anything.
        self.entities.customer(customer)?;
        self.destroy(product)?;
        let took = self.entities.customer_mut(customer)?.take(&product_type);
        tracing::debug!(customer = %customer, product = %product, %product_type, took, "product taken");
        Ok(took)
    }

    pub fn is_satisfied(&self, customer: EntityId) -> ShopResult<bool> {
        Ok(self.entities.customer(customer)?.is_satisfied())
    }

    pub fn start_leaving_happy(&mut self, customer: EntityId) -> ShopResult<()> {
        self.start_leaving(customer, Mood::Happy)
    }

    pub fn start_leaving_angry(&mut self, customer: EntityId) -> ShopResult<()> {
        self.start_leaving(customer, Mood::Angry)
    }

    /// Move `customer` to the exit lane tail with `mood`.  Irreversible.
    fn start_leaving(&mut self, customer: EntityId, mood: Mood) -> ShopResult<()> {
        let leave = self.queue_leave;
        let entity = self.entities.try_get_mut(customer)?;
        let from = entity.lane;
        let data = entity.as_customer_mut().ok_or(EntityError::NotACustomer(customer))?;
        if from == leave || !data.set_mood(mood) {
            return Err(ShopError::AlreadyLeaving(customer));
        }
        entity.lane = leave;
        entity.state = EntityState::Leaving;

        if let Some(lane) = self.lanes.get_mut(from.index()) {
            lane.remove(customer);
        }
        self.lanes[leave.index()].append(customer);
        tracing::debug!(customer = %customer, %mood, "customer leaving");
        Ok(())
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance every lane by one step of `dt_ms` and return the step's
    /// events in emission order.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<ShopEvent> {
        let mut events = Vec::new();

        for lane in &self.lanes {
            for lane_event in step_lane(lane, &mut self.entities, &self.params, &mut *self.gaps) {
                events.push(self.classify(lane_event));
            }
        }

        for id in self.lanes[self.queue_in.index()].iter() {
            if let Some(customer) = self.entities.get_mut(id).and_then(Entity::as_customer_mut) {
                if customer.wait(dt_ms) {
                    tracing::debug!(customer = %id, "patience expired");
                    events.push(ShopEvent::PatienceExpired(id));
                }
            }
        }

        self.clock.advance(dt_ms);
        tracing::trace!(clock = %self.clock, events = events.len(), "shop stepped");
        events
    }

    fn classify(&self, event: LaneEvent) -> ShopEvent {
        let id = event.entity();
        let is_product = self.entities.get(id).is_some_and(Entity::is_product);
        match event {
            LaneEvent::StoppedFirstInLine { .. } if is_product => ShopEvent::ProductStoppedFirstInLine(id),
            LaneEvent::StoppedFirstInLine { .. } => ShopEvent::CustomerStoppedFirstInLine(id),
            LaneEvent::Left { .. } => ShopEvent::CustomerLeft(id),
        }
    }
}
