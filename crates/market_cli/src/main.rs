mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dme")]
#[command(version, about = "Dataset Marketplace Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storage root directory (overrides the configuration file)
    #[arg(short, long, global = true)]
    root: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a dataset file with its metadata
    Store {
        /// Path to the dataset file
        file: String,

        /// Dataset title
        #[arg(short, long)]
        title: String,

        /// Category: experimental, observational, computational, survey
        #[arg(long)]
        category: String,

        /// Dataset description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Keyword (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Author (repeatable)
        #[arg(short, long = "author")]
        authors: Vec<String>,

        /// License string
        #[arg(short, long, default_value = "unlicensed")]
        license: String,

        /// Asking price in tokens
        #[arg(short, long, default_value_t = 0.0)]
        price: f64,
    },

    /// Show a stored dataset's metadata
    Info {
        /// Dataset identifier
        id: String,
    },

    /// Verify a stored dataset's content hash
    Verify {
        /// Dataset identifier
        id: String,
    },

    /// List stored datasets with optional filters
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter by author
        #[arg(long)]
        author: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a tabular dataset against a rule file
    Validate {
        /// Path to a JSON table file ({"column": [cells...]})
        table: String,

        /// Path to a rule file (YAML or JSON)
        #[arg(long)]
        rules: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List recorded marketplace transactions
    Transactions {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let config = config::MarketConfig::load(cli.config.as_deref(), cli.root.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Store {
            file,
            title,
            category,
            description,
            keywords,
            authors,
            license,
            price,
        } => commands::store::execute(
            &config,
            &file,
            &title,
            &category,
            &description,
            keywords,
            authors,
            &license,
            price,
        ),

        Commands::Info { id } => commands::info::execute(&config, &id),

        Commands::Verify { id } => commands::verify::execute(&config, &id),

        Commands::List {
            category,
            author,
            format,
        } => commands::list::execute(&config, category.as_deref(), author.as_deref(), &format),

        Commands::Validate {
            table,
            rules,
            format,
        } => commands::validate::execute(&config, &table, &rules, &format),

        Commands::Transactions { format } => commands::transactions::execute(&config, &format),
    }
}
