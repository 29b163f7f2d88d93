//! Customer payload: outstanding request, patience timer, and mood.

use shop_core::ProductType;

/// How a customer left the shop.  Set once; it only classifies the exit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    Happy,
    Angry,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mood::Happy => "happy",
            Mood::Angry => "angry",
        })
    }
}

/// Customer-specific entity data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerData {
    /// Product types still owed to this customer.  Unordered; duplicates are
    /// separate items.
    request: Vec<ProductType>,

    /// Simulated milliseconds the customer will wait in the entering queue.
    patience_ms: f64,

    /// Simulated milliseconds spent in the entering queue so far.
    waited_ms: f64,

    /// Latched the first time `waited_ms` reaches `patience_ms`.
    patience_expired: bool,

    mood: Option<Mood>,

    /// Presentation hints for render adapters; unused by the simulation.
    pub title:  Option<String>,
    pub sprite: u8,
}

impl CustomerData {
    pub fn new(request: Vec<ProductType>, patience_ms: f64) -> Self {
        Self {
            request,
            patience_ms,
            waited_ms: 0.0,
            patience_expired: false,
            mood: None,
            title: None,
            sprite: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_sprite(mut self, sprite: u8) -> Self {
        self.sprite = sprite;
        self
    }

    // ── Request ───────────────────────────────────────────────────────────

    /// `true` iff `product_type` is still outstanding.
    #[inline]
    pub fn wants(&self, product_type: &ProductType) -> bool {
        self.request.contains(product_type)
    }

    /// Remove one outstanding item of `product_type`.
    ///
    /// Returns `false` and leaves the request untouched if the type was not
    /// requested; callers are expected to check [`wants`][Self::wants] first.
    pub fn take(&mut self, product_type: &ProductType) -> bool {
        match self.request.iter().position(|p| p == product_type) {
            Some(i) => {
                self.request.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// `true` iff nothing is owed any more.
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.request.is_empty()
    }

    /// Outstanding product types, in no particular order.
    #[inline]
    pub fn outstanding(&self) -> &[ProductType] {
        &self.request
    }

    // ── Patience ──────────────────────────────────────────────────────────

    #[inline]
    pub fn patience_ms(&self) -> f64 {
        self.patience_ms
    }

    #[inline]
    pub fn waited_ms(&self) -> f64 {
        self.waited_ms
    }

    #[inline]
    pub fn patience_expired(&self) -> bool {
        self.patience_expired
    }

    /// Add `dt_ms` of waiting.  Returns `true` only on the call that first
    /// exhausts the patience budget.
    pub fn wait(&mut self, dt_ms: f64) -> bool {
        self.waited_ms += dt_ms;
        if !self.patience_expired && self.waited_ms >= self.patience_ms {
            self.patience_expired = true;
            return true;
        }
        false
    }

    // ── Mood ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    /// Set the mood if none is set yet.  Returns `false` if it was already
    /// decided; the first mood sticks.
    pub fn set_mood(&mut self, mood: Mood) -> bool {
        if self.mood.is_some() {
            return false;
        }
        self.mood = Some(mood);
        true
    }
}
