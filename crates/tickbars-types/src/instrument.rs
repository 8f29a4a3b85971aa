//! Financial instrument definitions.

use serde::{Deserialize, Serialize};

/// Instrument category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Foreign exchange currency pairs.
    Forex,
    /// Commodities quoted against a currency (metals).
    Commodity,
}

impl Category {
    /// Returns the category as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forex => "forex",
            Self::Commodity => "commodity",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tradable symbol served by the Dukascopy datafeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Datafeed symbol (e.g., "EURUSD").
    id: String,
    /// Human-readable name (e.g., "EUR/USD").
    name: String,
    /// Description of the instrument.
    description: String,
    /// Instrument category.
    category: Category,
    /// Number of decimal places encoded in raw integer prices.
    decimals: u32,
}

impl Instrument {
    /// Creates a new instrument.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        decimals: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            decimals,
        }
    }

    /// Returns the datafeed symbol.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the instrument category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the number of price decimals (the "point").
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Returns the divisor that turns a raw integer price into a price.
    ///
    /// EUR/USD has 5 decimals, so a raw price of 112345 becomes 1.12345.
    #[must_use]
    pub fn decimal_factor(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
