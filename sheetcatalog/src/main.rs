use anyhow::{Context, Result};
use catalogcraft_core::{Catalog, CatalogConfig, CellText, SheetSelector};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetcatalog")]
#[command(about = "Print catalog listings from Excel/ODS sheets", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file to list
    #[arg(value_name = "FILE", default_value = "test.ods")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Sheet to read, by 0-based index or by name
    #[arg(short, long, value_name = "SHEET")]
    sheet: Option<SheetSelector>,

    /// Currency locale, e.g. en-US or de-DE
    #[arg(short, long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Abort when required columns are missing
    #[arg(long)]
    strict: bool,

    /// Read cell text as displayed (ODS only)
    #[arg(long)]
    display_text: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Only check the header row
    #[arg(long)]
    check: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Plain-text listing
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        CatalogConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("sheetcatalog.toml");
        if default_config_path.exists() {
            CatalogConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            CatalogConfig::default()
        }
    };

    // Command line flags win over the file
    if let Some(sheet) = cli.sheet.clone() {
        config.sheet = sheet;
    }
    if let Some(locale) = &cli.locale {
        config.currency.locale = locale.clone();
    }
    if cli.strict {
        config.strict = true;
    }
    if cli.display_text {
        config.cell_text = CellText::Display;
    }

    config.validate().context("Invalid configuration")?;

    let catalog = Catalog::with_config(config);
    let listing = catalog.load(&cli.file)?;

    if cli.check {
        formatter::print_header_report(&cli.file, &listing, &catalog.config().required_columns);
        std::process::exit(if listing.check.passed() { 0 } else { 1 });
    }

    let currency = catalog.config().currency.format()?;
    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&listing, &currency)?;
        }
        OutputFormat::Json => {
            formatter::print_json(&cli.file, &listing, &currency)?;
        }
    }

    Ok(())
}
