//! Instrument registry for the tickbars Dukascopy bar builder.
//!
//! The registry lists the symbols whose raw `bi5` prices tickbars knows how
//! to scale, together with the number of decimals each one encodes.
//!
//! # Example
//!
//! ```
//! use tickbars_instruments::InstrumentRegistry;
//!
//! let registry = InstrumentRegistry::global();
//!
//! if let Some(instrument) = registry.get("eurusd") {
//!     println!("{}: {} decimals", instrument.name(), instrument.decimals());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use tickbars_types::{Category, Instrument, Result, TickbarsError};

/// The instrument metadata JSON embedded at compile time.
const INSTRUMENTS_JSON: &str = include_str!("../data/instruments.json");

/// Global instrument registry instance.
static REGISTRY: OnceLock<InstrumentRegistry> = OnceLock::new();

/// Registry of supported Dukascopy symbols.
#[derive(Debug)]
pub struct InstrumentRegistry {
    instruments: HashMap<String, Instrument>,
}

impl InstrumentRegistry {
    /// Returns the global instrument registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads instruments from the embedded JSON data.
    fn load() -> Self {
        let instruments: HashMap<String, Instrument> =
            serde_json::from_str(INSTRUMENTS_JSON).expect("Invalid instruments.json");
        Self { instruments }
    }

    /// Looks up an instrument by symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.instruments.get(&id.to_uppercase())
    }

    /// Looks up an instrument by symbol, failing with
    /// [`TickbarsError::UnknownInstrument`] when it is not supported.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is not in the registry.
    pub fn require(&self, id: &str) -> Result<&Instrument> {
        self.get(id)
            .ok_or_else(|| TickbarsError::UnknownInstrument(id.to_string()))
    }

    /// Returns all instruments sorted by symbol.
    pub fn all(&self) -> Vec<&Instrument> {
        let mut all: Vec<_> = self.instruments.values().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }

    /// Returns the total number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Returns instruments matching the given category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Instrument> {
        self.instruments
            .values()
            .filter(move |i| i.category() == category)
    }

    /// Returns all symbols sorted alphabetically.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.instruments.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
