use anyhow::{Context, Result};
use market_core::DatasetId;
use market_store::DatasetStore;
use tracing::info;

use crate::config::MarketConfig;
use crate::output;

pub fn execute(config: &MarketConfig, id: &str) -> Result<()> {
    info!("Verifying dataset: {}", id);

    let store = DatasetStore::open(&config.storage.root)
        .with_context(|| format!("Failed to open store at {}", config.storage.root.display()))?;

    if store.verify_integrity(&DatasetId::from(id)) {
        output::print_success(&format!("Integrity verified: {}", id));
        Ok(())
    } else {
        output::print_error(&format!("Integrity check FAILED: {}", id));
        std::process::exit(1);
    }
}
