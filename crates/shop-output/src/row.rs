//! Plain data row types written by output backends.

/// One [`ShopEvent`][shop_sim::ShopEvent] as it was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub tick:   u64,
    /// snake_case event name.
    pub event:  &'static str,
    /// `None` for events not about an entity (panics).
    pub entity: Option<u32>,
    /// Free-form extra data, empty for most events.
    pub detail: String,
}

/// One lane member at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSnapshotRow {
    pub tick:     u64,
    pub lane:     u16,
    /// Place in line; `0` is the front.
    pub index:    u32,
    pub entity:   u32,
    pub position: f32,
    pub state:    &'static str,
}
