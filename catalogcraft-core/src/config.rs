//! Configuration for catalog listings

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::currency::CurrencyFormat;
use crate::header::{MIN_COLUMNS, REQUIRED_COLUMNS};
use crate::reader::{CellText, SheetSelector};

/// Main catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub sheet: SheetSelector,
    #[serde(default = "default_min_columns")]
    pub min_columns: usize,
    #[serde(default = "default_required_columns")]
    pub required_columns: Vec<String>,
    /// Abort when the header check fails instead of only warning
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub cell_text: CellText,
    #[serde(default)]
    pub currency: CurrencyConfig,
}

impl CatalogConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: CatalogConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.required_columns.is_empty() {
            anyhow::bail!("Configuration error: 'required_columns' must not be empty");
        }
        for name in &self.required_columns {
            if name.trim().is_empty() {
                anyhow::bail!("Configuration error: blank name in 'required_columns'");
            }
        }
        self.currency.format()?;
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::default(),
            min_columns: default_min_columns(),
            required_columns: default_required_columns(),
            strict: false,
            cell_text: CellText::default(),
            currency: CurrencyConfig::default(),
        }
    }
}

fn default_min_columns() -> usize {
    MIN_COLUMNS
}

fn default_required_columns() -> Vec<String> {
    REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect()
}

/// Currency settings: a locale preset with optional overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

impl CurrencyConfig {
    /// Build the formatter for these settings
    pub fn format(&self) -> Result<CurrencyFormat> {
        let mut format = CurrencyFormat::for_locale(&self.locale)?;
        if let Some(symbol) = &self.symbol {
            format.symbol = symbol.clone();
        }
        if let Some(decimals) = self.decimals {
            format.decimals = decimals;
        }
        Ok(format)
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            symbol: None,
            decimals: None,
        }
    }
}

fn default_locale() -> String {
    "en-US".to_string()
}
