//! Demo settings, optionally loaded from a TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use shop_core::ShopConfig;

/// Everything the demo needs: the shop core parameters plus the pacing of
/// the collaborators that live outside the core.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Wall-clock length of the run.
    pub duration_secs:    u64,
    /// A new customer walks in this often while the queue has room.
    pub arrival_every_ms: f64,
    /// Time to make one product.
    pub brew_ms:          f64,
    /// Arrivals pause while this many customers are queueing.
    pub max_waiting:      usize,
    pub rent_per_sec:     f64,
    pub shop:             ShopConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            duration_secs:    90,
            arrival_every_ms: 3_000.0,
            brew_ms:          1_200.0,
            max_waiting:      6,
            rent_per_sec:     0.05,
            shop:             ShopConfig { seed: 42, ..ShopConfig::default() },
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.shop.validate()?;
        Ok(config)
    }
}
