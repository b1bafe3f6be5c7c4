//! Symbol suggestion filter
//!
//! Ranks catalog entries against a free-text query for autocomplete. Matching
//! is a case-insensitive substring test on both the symbol and the name.
//! Each match is scored:
//!
//! - `+2` if the symbol starts with the query
//! - `+1` if the name starts with the query
//!
//! Matches are ordered by score (highest first), then by symbol ascending, and
//! truncated to the requested limit. The filter itself never talks to a
//! provider; when nothing matches it returns [`SuggestOutcome::NoLocalMatch`]
//! so the caller can decide whether to try an external lookup.

use crate::catalog::{Catalog, CatalogEntry};
use std::cmp::Reverse;

/// Number of suggestions shown when no explicit limit is given
pub const DEFAULT_SUGGESTION_LIMIT: usize = 7;

const SYMBOL_PREFIX_SCORE: u8 = 2;
const NAME_PREFIX_SCORE: u8 = 1;

/// A catalog entry together with its score for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMatch<'a> {
    pub entry: &'a CatalogEntry,
    pub score: u8,
}

/// Result of running the filter over a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Ranked catalog entries; empty only for an empty query
    Matches(Vec<CatalogEntry>),
    /// Nothing in the catalog matched a non-empty query
    NoLocalMatch {
        /// The trimmed, uppercased query, usable as a literal ticker
        candidate: String,
    },
}

impl SuggestOutcome {
    /// The matched entries, or an empty list when nothing matched locally
    pub fn into_entries(self) -> Vec<CatalogEntry> {
        match self {
            Self::Matches(entries) => entries,
            Self::NoLocalMatch { .. } => Vec::new(),
        }
    }

    /// Whether the filter found nothing for a non-empty query
    pub fn is_no_local_match(&self) -> bool {
        matches!(self, Self::NoLocalMatch { .. })
    }
}

/// Case-fold `text` so that a string and its uppercase form compare equal
///
/// Lowercasing alone is not enough: `ß` uppercases to `SS`.
fn fold(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}

fn normalize(text: &str) -> String {
    fold(text.trim())
}

/// Score an entry against an already-normalized query
///
/// Returns `None` when neither the symbol nor the name contains the query.
pub fn score(normalized_query: &str, entry: &CatalogEntry) -> Option<u8> {
    let symbol = fold(&entry.symbol);
    let name = fold(&entry.name);

    if !symbol.contains(normalized_query) && !name.contains(normalized_query) {
        return None;
    }

    let mut score = 0;
    if symbol.starts_with(normalized_query) {
        score += SYMBOL_PREFIX_SCORE;
    }
    if name.starts_with(normalized_query) {
        score += NAME_PREFIX_SCORE;
    }
    Some(score)
}

/// All matches for `query`, best first
///
/// An empty (or whitespace-only) query matches nothing.
pub fn rank<'a>(query: &str, catalog: &'a Catalog) -> Vec<RankedMatch<'a>> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<RankedMatch<'a>> = catalog
        .iter()
        .filter_map(|entry| score(&query, entry).map(|score| RankedMatch { entry, score }))
        .collect();

    matches.sort_by(|a, b| {
        Reverse(a.score)
            .cmp(&Reverse(b.score))
            .then_with(|| a.entry.symbol.cmp(&b.entry.symbol))
    });
    matches
}

/// Suggest up to `limit` catalog entries for `query`
pub fn suggest(query: &str, catalog: &Catalog, limit: usize) -> SuggestOutcome {
    if query.trim().is_empty() {
        return SuggestOutcome::Matches(Vec::new());
    }

    let ranked = rank(query, catalog);
    if ranked.is_empty() {
        return SuggestOutcome::NoLocalMatch {
            candidate: query.trim().to_uppercase(),
        };
    }

    SuggestOutcome::Matches(
        ranked
            .into_iter()
            .take(limit)
            .map(|m| m.entry.clone())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(pairs: &[(&str, &str)]) -> Catalog {
        Catalog::from_entries(pairs.iter().map(|(s, n)| CatalogEntry::new(s, *n))).unwrap()
    }

    fn symbols(outcome: SuggestOutcome) -> Vec<String> {
        outcome.into_entries().into_iter().map(|e| e.symbol).collect()
    }

    fn three() -> Catalog {
        catalog(&[
            ("AAPL", "Apple Inc."),
            ("AMZN", "Amazon.com Inc."),
            ("MSFT", "Microsoft Corporation"),
        ])
    }

    fn is_subsequence(result: &[CatalogEntry], catalog: &Catalog) -> bool {
        result.iter().all(|entry| catalog.iter().any(|c| c == entry))
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let catalog = three();
        assert_eq!(suggest("", &catalog, 7), SuggestOutcome::Matches(vec![]));
        assert_eq!(suggest("   ", &catalog, 7), SuggestOutcome::Matches(vec![]));
    }

    #[test]
    fn test_symbol_prefix() {
        assert_eq!(symbols(suggest("AP", &three(), 7)), vec!["AAPL"]);
    }

    #[test]
    fn test_name_substring_scores_zero() {
        let catalog = catalog(&[("MSFT", "Microsoft Corporation"), ("AAPL", "Apple Inc.")]);
        let ranked = rank("a", &catalog);
        let scores: Vec<_> = ranked.iter().map(|m| (m.entry.symbol.as_str(), m.score)).collect();
        assert_eq!(scores, vec![("AAPL", 3), ("MSFT", 0)]);
        assert_eq!(symbols(suggest("a", &catalog, 7)), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_ties_break_by_symbol() {
        let catalog = catalog(&[
            ("AMZN", "Amazon.com Inc."),
            ("AAPL", "Apple Inc."),
            ("ADBE", "Adobe Inc."),
        ]);
        // every entry scores 3 for "a"
        assert_eq!(symbols(suggest("a", &catalog, 7)), vec!["AAPL", "ADBE", "AMZN"]);
    }

    #[test]
    fn test_case_insensitive() {
        let catalog = Catalog::builtin();
        for query in ["micro", "nv", "inc", "co"] {
            let lower = suggest(&query.to_lowercase(), &catalog, 7);
            let upper = suggest(&query.to_uppercase(), &catalog, 7);
            assert_eq!(suggest(query, &catalog, 7), lower);
            assert_eq!(lower, upper);
        }

        let sharp_s = suggest("ß", &catalog, 7);
        assert_eq!(sharp_s, suggest("SS", &catalog, 7));
        assert_eq!(sharp_s, suggest("ss", &catalog, 7));
        assert_eq!(
            sharp_s.into_entries().first().map(|e| e.symbol.as_str()),
            Some("IBM")
        );
    }

    #[test]
    fn test_deterministic() {
        let catalog = Catalog::builtin();
        assert_eq!(suggest("in", &catalog, 7), suggest("in", &catalog, 7));
    }

    #[test]
    fn test_limit_enforced() {
        let pairs: Vec<(String, String)> = (0..10)
            .map(|i| (format!("X{i}"), format!("Company {i}")))
            .collect();
        let catalog = Catalog::from_entries(
            pairs.iter().map(|(s, n)| CatalogEntry::new(s, n.clone())),
        )
        .unwrap();

        let result = symbols(suggest("x", &catalog, 7));
        assert_eq!(result, vec!["X0", "X1", "X2", "X3", "X4", "X5", "X6"]);

        assert!(symbols(suggest("x", &catalog, 0)).is_empty());
    }

    #[test]
    fn test_higher_scores_survive_truncation() {
        let catalog = catalog(&[
            ("ZA", "Zeta A"),
            ("ZB", "Zeta B"),
            ("BZ", "Bravo Z"),
        ]);
        // ZA and ZB score 3, BZ only contains "z"
        assert_eq!(symbols(suggest("z", &catalog, 2)), vec!["ZA", "ZB"]);
    }

    #[test]
    fn test_results_come_from_catalog() {
        let catalog = Catalog::builtin();
        for query in ["a", "corp", "m", "inc.", "&"] {
            let result = suggest(query, &catalog, DEFAULT_SUGGESTION_LIMIT).into_entries();
            assert!(result.len() <= DEFAULT_SUGGESTION_LIMIT);
            assert!(is_subsequence(&result, &catalog));
        }
    }

    #[test]
    fn test_no_local_match_carries_candidate() {
        let outcome = suggest(" zzzz ", &three(), 7);
        assert_eq!(
            outcome,
            SuggestOutcome::NoLocalMatch {
                candidate: "ZZZZ".to_string()
            }
        );
        assert!(outcome.is_no_local_match());
        assert!(outcome.into_entries().is_empty());
    }

    #[test]
    fn test_score_none_for_non_match() {
        let entry = CatalogEntry::new("MSFT", "Microsoft Corporation");
        assert_eq!(score("apple", &entry), None);
        assert_eq!(score("ms", &entry), Some(2));
        assert_eq!(score("micro", &entry), Some(1));
        assert_eq!(score("soft", &entry), Some(0));
    }
}
