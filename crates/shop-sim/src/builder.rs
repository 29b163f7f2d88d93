//! Fluent builder for constructing a [`Sim`].

use shop_core::{CoreError, GapSource, ShopConfig};
use shop_schedule::FrameScheduler;

use crate::{Shop, Sim, SimResult, Subsystem};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                  |
/// |-------------------------|------------------------------------------|
/// | `.gap_source(g)`        | `SpacingRng::new(config.seed)`           |
/// | `.conveyor()`           | no conveyors                             |
/// | `.conveyor_with_length(l)` | no conveyors                          |
/// | `.subsystem(s)`         | none; dispatch follows registration order |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(ShopConfig::default())
///     .conveyor()
///     .subsystem(Production::default())
///     .subsystem(ServiceDesk::default())
///     .build()?;
/// sim.run_steps(600, &mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:     ShopConfig,
    gaps:       Option<Box<dyn GapSource>>,
    conveyors:  Vec<Option<f32>>,
    subsystems: Vec<Box<dyn Subsystem>>,
}

impl SimBuilder {
    pub fn new(config: ShopConfig) -> Self {
        Self {
            config,
            gaps:       None,
            conveyors:  Vec::new(),
            subsystems: Vec::new(),
        }
    }

    /// Replace the customer spacing jitter (e.g. with `FixedGap` in tests).
    pub fn gap_source(mut self, gaps: impl GapSource + 'static) -> Self {
        self.gaps = Some(Box::new(gaps));
        self
    }

    /// Add a conveyor of `config.conveyor_length`.
    pub fn conveyor(mut self) -> Self {
        self.conveyors.push(None);
        self
    }

    pub fn conveyor_with_length(mut self, length: f32) -> Self {
        self.conveyors.push(Some(length));
        self
    }

    /// Register a subsystem.  Hooks and events reach subsystems in
    /// registration order.
    pub fn subsystem(mut self, subsystem: impl Subsystem + 'static) -> Self {
        self.subsystems.push(Box::new(subsystem));
        self
    }

    /// Validate the configuration and assemble the [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let scheduler = FrameScheduler::from_config(&self.config)?;

        let mut shop = Shop::new(&self.config);
        if let Some(gaps) = self.gaps {
            shop.set_gap_source(gaps);
        }
        for length in self.conveyors {
            match length {
                Some(l) if l.is_nan() || l <= 0.0 => {
                    return Err(CoreError::Config(format!("conveyor length must be positive, got {l}")).into());
                }
                Some(l) => shop.add_conveyor_with_length(l),
                None => shop.add_conveyor(),
            };
        }

        tracing::debug!(
            lanes = shop.lanes().len(),
            subsystems = self.subsystems.len(),
            speed = self.config.speed,
            "sim built"
        );
        Ok(Sim::new(scheduler, shop, self.subsystems))
    }
}
