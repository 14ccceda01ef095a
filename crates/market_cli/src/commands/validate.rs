use anyhow::{Context, Result};
use market_validator::{RuleEngine, Table, ValidationRule};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::MarketConfig;
use crate::output;

type RuleSet = BTreeMap<String, Vec<ValidationRule>>;

pub fn execute(config: &MarketConfig, table_path: &str, rules_path: &str, format: &str) -> Result<()> {
    info!("Validating table: {}", table_path);

    let table_raw = fs::read_to_string(table_path)
        .with_context(|| format!("Failed to read table file: {}", table_path))?;
    let table = Table::from_json_str(&table_raw)
        .with_context(|| format!("Failed to parse table file: {}", table_path))?;

    let rules = load_rules(Path::new(rules_path))?;
    output::print_info(&format!(
        "Loaded {} rule(s) across {} column(s)",
        rules.values().map(Vec::len).sum::<usize>(),
        rules.len()
    ));

    let mut engine = RuleEngine::with_retention(config.validation.retention());
    engine.import_rules(&serde_json::to_string(&rules)?)
        .context("Failed to load rules into the engine")?;

    let report = engine.validate(&table).clone();
    output::print_validation_report(&report, format);

    if !report.overall_validity {
        std::process::exit(1);
    }
    Ok(())
}

/// Reads a rule file, accepting YAML (`.yml`/`.yaml`) or JSON.
fn load_rules(path: &Path) -> Result<RuleSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yml") | Some("yaml") => serde_yaml_ng::from_str(&raw)
            .with_context(|| format!("Failed to parse YAML rules: {}", path.display())),
        _ => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON rules: {}", path.display())),
    }
}
