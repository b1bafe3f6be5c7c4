//! Per-company business segments, keyed by symbol

use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One line of business for a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub description: String,
}

impl Segment {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Lookup table from uppercase symbol to its segments
///
/// JSON form: `{ "MSFT": [{ "name": ..., "description": ... }], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentTable {
    segments: HashMap<String, Vec<Segment>>,
}

impl SegmentTable {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default table shipped with the binary
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(
            "MSFT",
            vec![
                Segment::new(
                    "Productivity and Business Processes",
                    "Office, LinkedIn and Dynamics",
                ),
                Segment::new("Intelligent Cloud", "Azure, server products and enterprise services"),
                Segment::new("More Personal Computing", "Windows, devices, gaming and search"),
            ],
        );
        table.insert(
            "NVDA",
            vec![
                Segment::new("Compute & Networking", "Data center GPUs, networking and automotive"),
                Segment::new("Graphics", "GeForce GPUs, professional visualization and gaming"),
            ],
        );
        table.insert(
            "AAPL",
            vec![
                Segment::new("iPhone", "Smartphones"),
                Segment::new("Mac", "Personal computers"),
                Segment::new("iPad", "Tablets"),
                Segment::new("Wearables, Home and Accessories", "Apple Watch, AirPods and accessories"),
                Segment::new("Services", "App Store, iCloud, Apple Music and AppleCare"),
            ],
        );
        table
    }

    /// Load a table from JSON
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, Vec<Segment>> = serde_json::from_reader(reader)?;
        let mut table = Self::empty();
        for (symbol, segments) in raw {
            if symbol.trim().is_empty() {
                return Err(LookupError::CatalogError(
                    "segment table contains an empty symbol".to_string(),
                ));
            }
            table.insert(&symbol, segments);
        }
        Ok(table)
    }

    /// Load a table from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Replace the segments for `symbol`
    pub fn insert(&mut self, symbol: &str, segments: Vec<Segment>) {
        self.segments.insert(symbol.trim().to_uppercase(), segments);
    }

    /// Segments for `symbol`, ignoring case; empty if unknown
    pub fn get(&self, symbol: &str) -> &[Segment] {
        self.segments
            .get(&symbol.trim().to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of symbols with segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_ignores_case() {
        let table = SegmentTable::builtin();
        assert_eq!(table.get("msft").len(), 3);
        assert!(table.get("ZZZZ").is_empty());
    }

    #[test]
    fn test_from_json_reader() {
        let json = r#"{"shop": [{"name": "Merchant Solutions", "description": "Payments"}]}"#;
        let table = SegmentTable::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("SHOP")[0].name, "Merchant Solutions");
        assert!(table.get("MSFT").is_empty());
    }

    #[test]
    fn test_from_json_reader_rejects_empty_symbol() {
        let json = r#"{" ": []}"#;
        assert!(SegmentTable::from_json_reader(json.as_bytes()).is_err());
    }
}
