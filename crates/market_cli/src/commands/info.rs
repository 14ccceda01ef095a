use anyhow::{Context, Result};
use market_core::DatasetId;
use market_store::DatasetStore;

use crate::config::MarketConfig;
use crate::output;

pub fn execute(config: &MarketConfig, id: &str) -> Result<()> {
    let store = DatasetStore::open(&config.storage.root)
        .with_context(|| format!("Failed to open store at {}", config.storage.root.display()))?;

    let (_, metadata) = store
        .retrieve(&DatasetId::from(id))
        .with_context(|| format!("Failed to retrieve dataset: {}", id))?;

    output::print_metadata(&metadata);
    Ok(())
}
