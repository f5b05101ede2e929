use crate::dom::ElementAttributes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Attribute that yields an identifier-anchored (`#value`) candidate.
pub const IDENTITY_ATTRIBUTE: &str = "id";

/// Scanner configuration. Every field falls back to its default when omitted
/// from a serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Cross into attached shadow trees.
    pub include_shadow_boundaries: bool,
    /// Cross into same-origin embedded documents. Inaccessible frames are skipped.
    pub include_embedded_documents: bool,
    /// Tag names (case-insensitive) of elements that receive a selector.
    pub target_tag_names: Vec<String>,
    /// Attribute names in descending priority; also the ranking weight source.
    pub attribute_priority: Vec<String>,
    /// Selectors that are suppressed, either literally or by matching the element.
    pub blacklist_selectors: Vec<String>,
    /// Programmatic blacklist rules evaluated against the matched element.
    #[serde(skip)]
    pub blacklist_predicates: Vec<ElementPredicate>,
    /// Deepest level descended into, counting the scan root's children as 0.
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_shadow_boundaries: true,
            include_embedded_documents: false,
            target_tag_names: default_target_tag_names(),
            attribute_priority: default_attribute_priority(),
            blacklist_selectors: Vec::new(),
            blacklist_predicates: Vec::new(),
            max_depth: None,
        }
    }
}

fn default_target_tag_names() -> Vec<String> {
    ["input", "select", "textarea", "button"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_attribute_priority() -> Vec<String> {
    [
        "id",
        "name",
        "data-testid",
        "data-test",
        "data-test-id",
        "aria-label",
        "placeholder",
        "title",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl ScanOptions {
    pub fn is_target(&self, tag_name: &str) -> bool {
        self.target_tag_names
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag_name))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_blacklist_selector(mut self, selector: impl Into<String>) -> Self {
        self.blacklist_selectors.push(selector.into());
        self
    }

    pub fn with_blacklist_predicate(mut self, predicate: ElementPredicate) -> Self {
        self.blacklist_predicates.push(predicate);
        self
    }
}

type PredicateFn = dyn Fn(&dyn ElementAttributes) -> bool + Send + Sync;

/// A named semantic test over an element, used to blacklist whole classes of
/// fields (hidden inputs, honeypots, ...) without enumerating selectors.
#[derive(Clone)]
pub struct ElementPredicate {
    name: String,
    test: Arc<PredicateFn>,
}

impl ElementPredicate {
    pub fn new<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&dyn ElementAttributes) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// Matches elements whose `attribute` equals `value` (ASCII case-insensitive).
    pub fn attribute_equals(attribute: &str, value: &str) -> Self {
        let attribute = attribute.to_string();
        let value = value.to_string();
        Self::new(format!("[{}={}]", attribute, value), move |el| {
            el.attribute(&attribute)
                .is_some_and(|v| v.eq_ignore_ascii_case(&value))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test(&self, element: &dyn ElementAttributes) -> bool {
        (self.test)(element)
    }
}

impl fmt::Debug for ElementPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementPredicate").field(&self.name).finish()
    }
}
