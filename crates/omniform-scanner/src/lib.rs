//! Form field discovery: walks a document (including shadow trees and embedded
//! documents), derives candidate selectors for every target element and keeps
//! the best-ranked selector per element.

pub mod candidates;
pub mod dom;
pub mod escape;
pub mod html;
pub mod options;
pub mod rank;
pub mod registry;
pub mod walker;

pub use candidates::derive_candidates;
pub use dom::{
    DocumentTree, ElementAttributes, EmbeddedAccess, NodeView, QueryError, Scope, ScopeRoot,
    SkipReason,
};
pub use escape::css_escape;
pub use html::{HtmlDocument, HtmlNode};
pub use options::{ElementPredicate, ScanOptions};
pub use rank::{UNIQUENESS_BONUS, rank};
pub use registry::{RegistryView, SelectorInfo, SelectorRegistry, SelectorSummary};
pub use walker::{DomScanner, scan};
