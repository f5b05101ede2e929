use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// A ranked selector together with the element it resolved to when scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorInfo<N> {
    pub selector: String,
    pub score: i32,
    pub element: N,
}

/// Serializable view of a [`SelectorInfo`], without the element reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSummary {
    pub selector: String,
    pub score: i32,
}

/// Serializable view of a whole registry, keyed by selector.
pub type RegistryView = BTreeMap<String, SelectorSummary>;

/// Scan result: the winning selector for each element, keyed by selector string.
///
/// Entry order carries no meaning; only `score` expresses relative confidence.
#[derive(Debug, Clone)]
pub struct SelectorRegistry<N> {
    entries: HashMap<String, SelectorInfo<N>>,
}

impl<N> Default for SelectorRegistry<N> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<N> SelectorRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `info`, replacing an existing entry for the same selector only
    /// when the new score is strictly greater. Returns whether it was stored.
    pub fn offer(&mut self, info: SelectorInfo<N>) -> bool {
        match self.entries.entry(info.selector.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(info);
                true
            }
            Entry::Occupied(mut slot) => {
                if info.score > slot.get().score {
                    slot.insert(info);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn get(&self, selector: &str) -> Option<&SelectorInfo<N>> {
        self.entries.get(selector)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.entries.contains_key(selector)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectorInfo<N>> {
        self.entries.values()
    }

    /// Selector strings sorted by descending score, then lexicographically.
    pub fn selectors(&self) -> Vec<String> {
        let mut infos: Vec<&SelectorInfo<N>> = self.entries.values().collect();
        infos.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.selector.cmp(&b.selector)));
        infos.into_iter().map(|i| i.selector.clone()).collect()
    }

    pub fn to_view(&self) -> RegistryView {
        self.entries
            .iter()
            .map(|(key, info)| {
                (
                    key.clone(),
                    SelectorSummary {
                        selector: info.selector.clone(),
                        score: info.score,
                    },
                )
            })
            .collect()
    }
}
