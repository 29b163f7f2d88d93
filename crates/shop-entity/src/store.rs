//! `EntityStore`: owns every live entity, keyed by id.

use rustc_hash::FxHashMap;

use shop_core::{EntityId, LaneId};

use crate::{CustomerData, Entity, EntityError, EntityKind, EntityResult, ProductData};

/// Id-keyed ownership of all live entities.
///
/// Lanes hold only ids; the store holds the data.  Ids are allocated
/// monotonically and never reused, so removing an entity can never make a
/// stale id resolve to a different one.
#[derive(Default)]
pub struct EntityStore {
    entities: FxHashMap<EntityId, Entity>,
    next_id:  u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id and store a new idle entity.
    pub fn insert(&mut self, lane: LaneId, position: f32, extent: f32, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::new(id, lane, position, extent, kind));
        id
    }

    /// Drop an entity.  Returns it so the caller can inspect the final state.
    pub fn remove(&mut self, id: EntityId) -> EntityResult<Entity> {
        self.entities.remove(&id).ok_or(EntityError::NotFound(id))
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn try_get(&self, id: EntityId) -> EntityResult<&Entity> {
        self.get(id).ok_or(EntityError::NotFound(id))
    }

    pub fn try_get_mut(&mut self, id: EntityId) -> EntityResult<&mut Entity> {
        self.get_mut(id).ok_or(EntityError::NotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn customer(&self, id: EntityId) -> EntityResult<&CustomerData> {
        self.try_get(id)?.as_customer().ok_or(EntityError::NotACustomer(id))
    }

    pub fn customer_mut(&mut self, id: EntityId) -> EntityResult<&mut CustomerData> {
        self.try_get_mut(id)?.as_customer_mut().ok_or(EntityError::NotACustomer(id))
    }

    pub fn product(&self, id: EntityId) -> EntityResult<&ProductData> {
        self.try_get(id)?.as_product().ok_or(EntityError::NotAProduct(id))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All live ids in ascending order (allocation order).
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
