//! In-memory catalog of known ticker symbols
//!
//! The catalog is the reference set used for local suggestion matching. It is
//! built once, validated, and never mutated afterwards, so a single instance
//! can be shared by every session through an `Arc`.

use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// A known (symbol, name) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Company display name
    pub name: String,
}

impl CatalogEntry {
    /// Create a new entry, normalizing the symbol to uppercase
    pub fn new(symbol: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_uppercase(),
            name: name.into(),
        }
    }

    /// Suggestion label in the form `"<SYMBOL> - <Name>"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.symbol, self.name)
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.symbol, self.name)
    }
}

/// Fixed reference set shipped with the binary
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("JNJ", "Johnson & Johnson"),
    ("V", "Visa Inc."),
    ("PG", "Procter & Gamble Co."),
    ("UNH", "UnitedHealth Group Inc."),
    ("HD", "Home Depot Inc."),
    ("DIS", "Walt Disney Co."),
    ("PYPL", "PayPal Holdings Inc."),
    ("NFLX", "Netflix Inc."),
    ("ADBE", "Adobe Inc."),
    ("CRM", "Salesforce Inc."),
    ("INTC", "Intel Corporation"),
    ("CSCO", "Cisco Systems Inc."),
    ("AMD", "Advanced Micro Devices Inc."),
    ("ORCL", "Oracle Corporation"),
    ("AVGO", "Broadcom Inc."),
    ("QCOM", "Qualcomm Inc."),
    ("PEP", "PepsiCo Inc."),
    ("KO", "Coca-Cola Co."),
    ("COST", "Costco Wholesale Corporation"),
    ("WMT", "Walmart Inc."),
    ("NKE", "Nike Inc."),
    ("SBUX", "Starbucks Corporation"),
    ("IBM", "International Business Machines Corporation"),
    ("BA", "Boeing Co."),
];

static SHARED: OnceLock<Arc<Catalog>> = OnceLock::new();

/// Immutable, ordered collection of catalog entries with unique symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries, rejecting empty and duplicate symbols
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();

        for entry in entries {
            let entry = CatalogEntry::new(&entry.symbol, entry.name);
            if entry.symbol.is_empty() {
                return Err(LookupError::CatalogError(format!(
                    "empty symbol for '{}'",
                    entry.name
                )));
            }
            if !seen.insert(entry.symbol.clone()) {
                return Err(LookupError::CatalogError(format!(
                    "duplicate symbol {}",
                    entry.symbol
                )));
            }
            validated.push(entry);
        }

        Ok(Self { entries: validated })
    }

    /// The fixed literal set of large US companies
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES
                .iter()
                .map(|(symbol, name)| CatalogEntry::new(symbol, *name))
                .collect(),
        }
    }

    /// Process-wide catalog, built from [`Catalog::builtin`] on first use
    pub fn shared() -> Arc<Catalog> {
        Arc::clone(SHARED.get_or_init(|| {
            let catalog = Self::builtin();
            tracing::debug!("Loaded built-in catalog with {} entries", catalog.len());
            Arc::new(catalog)
        }))
    }

    /// Load a catalog from a JSON array of `{ "symbol": ..., "name": ... }`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_json_reader(std::io::BufReader::new(file))?;
        tracing::info!("Loaded catalog with {} entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Find an entry by symbol, ignoring case
    pub fn get(&self, symbol: &str) -> Option<&CatalogEntry> {
        let symbol = symbol.trim();
        self.entries
            .iter()
            .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterate entries in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
