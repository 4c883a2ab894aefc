//! Shared loading for the config-driven commands.

use anyhow::{Context, Result};
use ss_ingest::{Inventory, PollutantSelection, SccCatalog};

use crate::config::{CategoryConfig, StackstatConfig};

pub struct Sources {
    pub inventory: Inventory,
    pub catalog: SccCatalog,
}

impl Sources {
    pub fn load(cfg: &StackstatConfig) -> Result<Self> {
        let inventory = ss_ingest::read_inventory(&cfg.data.input_dir)
            .with_context(|| format!("failed to read inventory under {}", cfg.data.input_dir.display()))?;
        let scc_path = cfg.scc_path();
        let catalog = ss_ingest::read_scc_catalog(&scc_path)
            .with_context(|| format!("failed to read SCC catalog {}", scc_path.display()))?;
        Ok(Self { inventory, catalog })
    }

    /// Inventory rows for one category: SCC keyword filter, then pollutant filter.
    /// `None` when no SCC code matched.
    pub fn select(&self, name: &str, category: &CategoryConfig) -> Result<Option<PollutantSelection>> {
        let codes = ss_ingest::filter_scc(&self.catalog, &category.keywords(), category.scc_level)
            .with_context(|| format!("category '{name}': SCC filter failed"))?;
        if codes.is_empty() {
            tracing::warn!(category = name, "no SCC codes matched the category keywords");
            return Ok(None);
        }
        Ok(Some(ss_ingest::filter_pollutant(&self.inventory.rows, &category.pollutants(), &codes)))
    }
}
