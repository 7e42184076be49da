//! Storefront Core Command Line Interface
//!
//! Runs the catalog logic against hand-written inputs, for checking what a
//! listing or product form will show without starting the client.
//!
//! # Usage
//!
//! ```bash
//! # Pagination bar for page 10 of 20
//! storefront_cli pages --current 10 --count 20
//!
//! # Variant combinations for an attribute file, keeping saved prices
//! storefront_cli variants --file attrs.yaml --persisted combos.json
//!
//! # Clamp a typed cart quantity
//! storefront_cli quantity --stock 3 --input 12
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use storefront_core::pagination::{render_window, PageRequest};
use storefront_core::quantity::QuantityBounds;
use storefront_core::variants::{
    generate_combinations, reconcile, validate_attributes, VariantAttribute, VariantCombination,
};
use storefront_core::{telemetry, StorefrontConfig};

#[derive(Parser)]
#[command(name = "storefront_cli")]
#[command(author = "storefront")]
#[command(version = "0.1.0")]
#[command(about = "Pagination, variant and quantity logic of the storefront client")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file (defaults plus STOREFRONT_* env overrides if omitted)
    #[arg(long, short = 'c', global = true, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: json or text (default)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the pagination bar for a page
    Pages {
        /// Current page (1-based)
        #[arg(long)]
        current: u32,

        /// Total number of pages
        #[arg(long)]
        count: u32,

        /// Neighbours either side of the current page (config value if omitted)
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Generate variant combinations from an attribute list
    Variants {
        /// YAML list of `{type, options}` attributes
        #[arg(short, long)]
        file: PathBuf,

        /// JSON array of previously saved combinations
        #[arg(long)]
        persisted: Option<PathBuf>,
    },

    /// Clamp a typed cart quantity against stock
    Quantity {
        /// Units in stock
        #[arg(long)]
        stock: u32,

        /// Text typed into the quantity box
        #[arg(long)]
        input: String,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Pages {
            current,
            count,
            radius,
        } => cmd_pages(&config, current, count, radius, cli.format),
        Commands::Variants { file, persisted } => {
            cmd_variants(&file, persisted.as_deref(), cli.format)
        }
        Commands::Quantity { stock, input } => cmd_quantity(&config, stock, &input, cli.format),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<StorefrontConfig> {
    let config = match path {
        Some(path) => StorefrontConfig::load_from_file(path)?.with_env_overrides()?,
        None => StorefrontConfig::from_env()?,
    };
    info!(?config, "configuration loaded");
    Ok(config)
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_pages(
    config: &StorefrontConfig,
    current: u32,
    count: u32,
    radius: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let request = match radius {
        Some(radius) => PageRequest::new(current, count).with_radius(radius),
        None => PageRequest::from_config(current, count, &config.pagination),
    };
    let slots = request.window()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&slots)?),
        OutputFormat::Text => println!("{}", render_window(&slots)),
    }
    Ok(())
}

fn cmd_variants(file: &Path, persisted: Option<&Path>, format: OutputFormat) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let attributes: Vec<VariantAttribute> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", file))?;
    if let Err(e) = validate_attributes(&attributes) {
        warn!("attribute list would be rejected on submit: {}", e);
    }

    let persisted: Vec<VariantCombination> = match persisted {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {:?}", path))?
        }
        None => Vec::new(),
    };

    let combinations = reconcile(&generate_combinations(&attributes), &persisted);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&combinations)?),
        OutputFormat::Text => {
            for c in &combinations {
                println!(
                    "{:<32} price {:>10} stock {:>6}{}",
                    c.key,
                    c.price,
                    c.stock,
                    c.thumbnail
                        .as_deref()
                        .map(|t| format!("  [{}]", t))
                        .unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}

fn cmd_quantity(
    config: &StorefrontConfig,
    stock: u32,
    input: &str,
    format: OutputFormat,
) -> Result<()> {
    let bounds = QuantityBounds::for_stock(stock, &config.quantity);
    let quantity = bounds.parse_input(input)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "quantity": quantity, "bounds": bounds })
        ),
        OutputFormat::Text => println!("{} (allowed {}..={})", quantity, bounds.min, bounds.max),
    }
    Ok(())
}
