use colored::*;
use market_core::DatasetMetadata;
use market_validator::ValidationReport;

pub fn print_validation_report(report: &ValidationReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.overall_validity {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    for (column, result) in &report.columns {
        let marker = if result.is_valid {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("\n{} {}", marker, column.bold());

        if let Some(error) = &result.error {
            println!("    {}", error.red());
        }
        for outcome in &result.outcomes {
            let state = if outcome.is_valid {
                "ok".green()
            } else {
                "failed".red()
            };
            println!("    {:<14} {} {}", outcome.kind, state, outcome.details);
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rows validated: {}", report.row_count);
    println!("  Failed columns: {}", report.error_count());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) {
    println!(
        "{}",
        serde_json::to_string_pretty(report).expect("report serializes to JSON")
    );
}

pub fn print_metadata(metadata: &DatasetMetadata) {
    println!("{}", metadata.title.bold());
    println!("  category:  {}", metadata.data_type);
    println!("  authors:   {}", metadata.authors.join(", "));
    println!("  keywords:  {}", metadata.keywords.join(", "));
    println!("  license:   {}", metadata.license);
    println!("  size:      {} bytes", metadata.size_bytes);
    println!("  price:     {} tokens", metadata.price_tokens);
    println!("  sha256:    {}", metadata.file_hash);
    println!("  created:   {}", metadata.creation_date.to_rfc3339());
}

pub fn print_metadata_json(records: &[DatasetMetadata]) {
    println!(
        "{}",
        serde_json::to_string_pretty(records).expect("metadata serializes to JSON")
    );
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
