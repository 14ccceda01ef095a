use anyhow::{Context, Result};
use market_store::DatasetStore;

use crate::config::MarketConfig;
use crate::output;

pub fn execute(config: &MarketConfig, format: &str) -> Result<()> {
    let store = DatasetStore::open(&config.storage.root)
        .with_context(|| format!("Failed to open store at {}", config.storage.root.display()))?;

    let transactions = store
        .transactions()
        .context("Failed to read transaction journal")?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    output::print_info(&format!("{} transaction(s)", transactions.len()));
    for tx in &transactions {
        println!(
            "  {}  {} -> {}  {} tokens  [{}]  {}",
            tx.timestamp.to_rfc3339(),
            tx.buyer_address,
            tx.seller_address,
            tx.amount,
            tx.status,
            tx.dataset_id
        );
    }
    Ok(())
}
