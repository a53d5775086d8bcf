//! Price parsing and locale-aware currency formatting

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CatalogError;

const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

/// Parse price text as a decimal number
///
/// Surrounding whitespace is ignored and scientific notation is accepted.
/// Anything besides digits, signs, a point and an exponent is rejected.
pub fn parse_price(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty()
        || !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Side of the amount the currency symbol goes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPlacement {
    Prefix,
    Suffix,
}

/// How to render an amount of money
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub placement: SymbolPlacement,
    /// Put a non-breaking space between symbol and amount
    pub symbol_gap: bool,
    pub decimal_separator: char,
    pub group_separator: Option<char>,
    /// Fraction digits shown
    pub decimals: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::prefix("$", false, '.', Some(','), 2)
    }
}

impl CurrencyFormat {
    fn prefix(
        symbol: &str,
        symbol_gap: bool,
        decimal_separator: char,
        group_separator: Option<char>,
        decimals: u32,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            placement: SymbolPlacement::Prefix,
            symbol_gap,
            decimal_separator,
            group_separator,
            decimals,
        }
    }

    fn suffix(symbol: &str, decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            symbol: symbol.to_string(),
            placement: SymbolPlacement::Suffix,
            symbol_gap: true,
            decimal_separator,
            group_separator,
            decimals: 2,
        }
    }

    /// Look up a locale preset such as `en-US` or `de_DE`
    pub fn for_locale(locale: &str) -> Result<Self, CatalogError> {
        let tag = locale.trim().replace('_', "-").to_ascii_lowercase();
        let format = match tag.as_str() {
            "en" | "en-us" | "en-ca" | "en-au" => Self::default(),
            "en-gb" => Self::prefix("£", false, '.', Some(','), 2),
            "de-de" | "es-es" | "it-it" => Self::suffix("€", ',', Some('.')),
            "fr-fr" => Self::suffix("€", ',', Some(NARROW_NBSP)),
            "nl-nl" => Self::prefix("€", true, ',', Some('.'), 2),
            "pt-br" => Self::prefix("R$", true, ',', Some('.'), 2),
            "ja-jp" => Self::prefix("￥", false, '.', Some(','), 0),
            _ => return Err(CatalogError::UnknownLocale(locale.to_string())),
        };
        Ok(format)
    }

    /// Render an amount, rounding half-even to the configured digits
    pub fn format(&self, amount: Decimal) -> String {
        let mut rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded.set_sign_positive(true);
        rounded.rescale(self.decimals);

        let digits = rounded.to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut number = self.group(int_part);
        if let Some(frac_part) = frac_part {
            number.push(self.decimal_separator);
            number.push_str(frac_part);
        }

        let gap = if self.symbol_gap {
            NBSP.to_string()
        } else {
            String::new()
        };
        let sign = if negative { "-" } else { "" };
        match self.placement {
            SymbolPlacement::Prefix => format!("{}{}{}{}", sign, self.symbol, gap, number),
            SymbolPlacement::Suffix => format!("{}{}{}{}", sign, number, gap, self.symbol),
        }
    }

    /// Insert the group separator every three integer digits
    fn group(&self, int_part: &str) -> String {
        let Some(separator) = self.group_separator else {
            return int_part.to_string();
        };
        let len = int_part.len();
        let mut grouped = String::with_capacity(len + len / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}
