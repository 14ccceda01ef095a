use anyhow::{Context, Result};
use market_core::{DataCategory, MetadataBuilder};
use market_store::DatasetStore;
use std::fs::File;
use tracing::info;

use crate::config::MarketConfig;
use crate::output;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &MarketConfig,
    file: &str,
    title: &str,
    category: &str,
    description: &str,
    keywords: Vec<String>,
    authors: Vec<String>,
    license: &str,
    price: f64,
) -> Result<()> {
    info!("Storing dataset from: {}", file);

    let category: DataCategory = category
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    anyhow::ensure!(price >= 0.0, "price must be non-negative");

    let metadata = MetadataBuilder::new(title, category)
        .description(description)
        .keywords(keywords)
        .authors(authors)
        .license(license)
        .price_tokens(price)
        .build();

    let store = DatasetStore::open(&config.storage.root)
        .with_context(|| format!("Failed to open store at {}", config.storage.root.display()))?;

    let mut source =
        File::open(file).with_context(|| format!("Failed to open dataset file: {}", file))?;
    let id = store
        .store(&mut source, metadata)
        .context("Failed to store dataset")?;

    output::print_success(&format!("Dataset stored: {}", id));
    Ok(())
}
