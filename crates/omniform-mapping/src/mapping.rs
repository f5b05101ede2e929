//! Selector-to-column mappings: generation, validation and application.

use crate::error::MappingError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// A row of external data: column name to scalar value.
pub type RowData = serde_json::Map<String, Value>;

/// Values resolved for each mapped selector.
pub type SelectorValueMap = serde_json::Map<String, Value>;

/// Insertion-ordered association from selector to column name.
///
/// Keys are unique: [`Mapping::insert`] replaces in place and deserialization
/// rejects documents that repeat a selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, String)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs, failing on the first repeated selector.
    pub fn from_pairs<I, S, C>(pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<String>,
    {
        let mut mapping = Self::new();
        for (selector, column) in pairs {
            let selector = selector.into();
            if mapping.contains_selector(&selector) {
                return Err(MappingError::DuplicateSelector(selector));
            }
            mapping.entries.push((selector, column.into()));
        }
        Ok(mapping)
    }

    /// Insert or replace the column for `selector`, returning the previous one.
    pub fn insert(&mut self, selector: impl Into<String>, column: impl Into<String>) -> Option<String> {
        let selector = selector.into();
        let column = column.into();
        match self.entries.iter_mut().find(|(s, _)| *s == selector) {
            Some((_, existing)) => Some(std::mem::replace(existing, column)),
            None => {
                self.entries.push((selector, column));
                None
            }
        }
    }

    pub fn get(&self, selector: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, c)| c.as_str())
    }

    pub fn contains_selector(&self, selector: &str) -> bool {
        self.entries.iter().any(|(s, _)| s == selector)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.entries.iter().any(|(_, c)| c == column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, c)| c.as_str())
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (selector, column) in &self.entries {
            map.serialize_entry(selector, column)?;
        }
        map.end()
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = Mapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a flat object of selector to column name strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Mapping, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((selector, column)) = access.next_entry::<String, String>()? {
            if mapping.contains_selector(&selector) {
                return Err(de::Error::custom(format!(
                    "duplicate selector `{}`",
                    selector
                )));
            }
            mapping.entries.push((selector, column));
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Pair selectors with columns by position.
pub fn generate_mapping<S, C>(selectors: &[S], columns: &[C]) -> Result<Mapping, MappingError>
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    if selectors.len() != columns.len() {
        return Err(MappingError::LengthMismatch {
            selectors: selectors.len(),
            columns: columns.len(),
        });
    }

    let mut mapping = Mapping::new();
    for (selector, column) in selectors.iter().zip(columns) {
        mapping.insert(selector.as_ref(), column.as_ref());
    }
    Ok(mapping)
}

/// A mapping is valid when it is non-empty and every selector and column is a
/// non-blank string.
pub fn validate_mapping(mapping: &Mapping) -> bool {
    validate_pairs(&mapping.entries)
}

/// Validate raw pairs, where repeated selectors are still representable.
pub fn validate_pairs<S, C>(pairs: &[(S, C)]) -> bool
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    if pairs.is_empty() {
        return false;
    }

    let mut seen = HashSet::with_capacity(pairs.len());
    pairs.iter().all(|(selector, column)| {
        let selector = selector.as_ref();
        !selector.trim().is_empty() && !column.as_ref().trim().is_empty() && seen.insert(selector)
    })
}

/// Resolve the value of each mapped column from `row`. Columns absent from the
/// row are skipped.
pub fn apply_mapping(mapping: &Mapping, row: &RowData) -> SelectorValueMap {
    mapping
        .iter()
        .filter_map(|(selector, column)| {
            row.get(column)
                .map(|value| (selector.to_string(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut mapping = Mapping::new();
        mapping.insert("#a", "Name");
        mapping.insert("#b", "Email");

        assert_eq!(mapping.insert("#a", "Full Name"), Some("Name".to_string()));
        assert_eq!(mapping.selectors().collect::<Vec<_>>(), vec!["#a", "#b"]);
        assert_eq!(mapping.get("#a"), Some("Full Name"));
    }

    #[test]
    fn test_from_pairs_rejects_duplicates() {
        let result = Mapping::from_pairs([("#a", "Name"), ("#a", "Name")]);
        assert_eq!(result, Err(MappingError::DuplicateSelector("#a".into())));
    }

    #[test]
    fn test_serialization_preserves_order() {
        let mapping = Mapping::from_pairs([("#z", "Last"), ("#a", "First")]).unwrap();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r##"{"#z":"Last","#a":"First"}"##);
    }

    #[test]
    fn test_deserialization_rejects_duplicates_and_non_strings() {
        assert!(serde_json::from_str::<Mapping>(r##"{"#a":"x","#a":"y"}"##).is_err());
        assert!(serde_json::from_str::<Mapping>(r##"{"#a":1}"##).is_err());
        assert!(serde_json::from_str::<Mapping>(r##"["#a","x"]"##).is_err());
        assert!(serde_json::from_str::<Mapping>(r##"{"#a":{"nested":"x"}}"##).is_err());
    }
}
