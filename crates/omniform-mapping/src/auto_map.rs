//! Greedy one-to-one pairing of selectors to column headers.

use crate::mapping::Mapping;
use crate::similarity::Scorer;
use crate::tokenize::{TokenSet, tokenize};
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct AutoMapOptions {
    /// Minimum similarity a pairing needs to be committed.
    pub threshold: f64,
    pub scorer: Scorer,
}

impl Default for AutoMapOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scorer: Scorer::default(),
        }
    }
}

impl AutoMapOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }
}

/// Pair each selector, in input order, with the most similar header not yet
/// taken. Earlier headers win ties; pairings below the threshold are dropped.
pub fn auto_map<S, H>(selectors: &[S], headers: &[H], options: &AutoMapOptions) -> Mapping
where
    S: AsRef<str>,
    H: AsRef<str>,
{
    let header_tokens: Vec<(&str, TokenSet)> = headers
        .iter()
        .map(|h| (h.as_ref(), tokenize(h.as_ref())))
        .collect();

    let mut used: HashSet<&str> = HashSet::new();
    let mut mapping = Mapping::new();

    for selector in selectors {
        let selector = selector.as_ref();
        if mapping.contains_selector(selector) {
            continue;
        }
        let tokens = tokenize(selector);

        let mut best: Option<(&str, f64)> = None;
        for (header, header_set) in &header_tokens {
            if used.contains(header) {
                continue;
            }
            let score = options.scorer.score(&tokens, header_set);
            let best_score = best.map_or(0.0, |(_, s)| s);
            if score > best_score {
                best = Some((*header, score));
            }
        }

        match best {
            Some((header, score)) if score >= options.threshold => {
                debug!(selector, header, score, "Auto-mapped selector");
                used.insert(header);
                mapping.insert(selector, header);
            }
            Some((header, score)) => {
                debug!(selector, header, score, "Best header below threshold");
            }
            None => debug!(selector, "No similar header"),
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_highest_overlap() {
        let mapping = auto_map(
            &["#firstName"],
            &["First Name", "Last Name"],
            &AutoMapOptions::default(),
        );

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("#firstName"), Some("First Name"));
        assert!(!mapping.contains_column("Last Name"));
    }

    #[test]
    fn test_tie_keeps_first_header() {
        let mapping = auto_map(&["#name"], &["Name A", "Name B"], &AutoMapOptions::default());
        assert_eq!(mapping.get("#name"), Some("Name A"));
    }
}
