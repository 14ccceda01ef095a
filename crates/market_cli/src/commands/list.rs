use anyhow::{Context, Result};
use market_store::DatasetStore;
use serde_json::json;
use std::collections::HashMap;

use crate::config::MarketConfig;
use crate::output;

pub fn execute(
    config: &MarketConfig,
    category: Option<&str>,
    author: Option<&str>,
    format: &str,
) -> Result<()> {
    let store = DatasetStore::open(&config.storage.root)
        .with_context(|| format!("Failed to open store at {}", config.storage.root.display()))?;

    let mut filters = HashMap::new();
    if let Some(category) = category {
        filters.insert("data_type".to_string(), json!(category));
    }
    if let Some(author) = author {
        filters.insert("authors".to_string(), json!(author));
    }

    let records = store.list(&filters).context("Failed to list datasets")?;

    if format == "json" {
        output::print_metadata_json(&records);
        return Ok(());
    }

    output::print_info(&format!("{} dataset(s)", records.len()));
    for metadata in &records {
        println!();
        output::print_metadata(metadata);
    }
    Ok(())
}
