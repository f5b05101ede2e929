//! Document Model Abstraction
//!
//! The scanner never talks to a concrete DOM. Everything it needs from the host
//! environment goes through the two traits in this module:
//!
//! - [`DocumentTree`]: structural navigation (children, shadow roots, embedded
//!   documents) and attribute lookup.
//! - [`Scope`]: live selector queries relative to a single scope root.
//!
//! Implementations:
//! - [`crate::html::HtmlDocument`]: parsed HTML, with declarative shadow roots and
//!   `srcdoc` frames as nested scopes
//! - Tests: hand-rolled fakes implementing [`Scope`] directly

use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Errors a scope can report while answering a selector query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The selector string could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The scope root no longer exists in the host document.
    #[error("Scope root is not attached to the document")]
    DetachedScope,
}

/// The node relative to which selector resolution and uniqueness are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeRoot<N> {
    /// The top-level document.
    Document(N),
    /// A shadow tree attached to `host`.
    Shadow { host: N, root: N },
    /// A same-origin document embedded in the `frame` element.
    Embedded { frame: N, root: N },
}

impl<N: Copy> ScopeRoot<N> {
    /// The node traversal starts from when this scope is walked.
    pub fn root(&self) -> N {
        match *self {
            ScopeRoot::Document(root) => root,
            ScopeRoot::Shadow { root, .. } => root,
            ScopeRoot::Embedded { root, .. } => root,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScopeRoot::Document(_) => "document",
            ScopeRoot::Shadow { .. } => "shadow",
            ScopeRoot::Embedded { .. } => "embedded",
        }
    }
}

/// Why an embedded document could not be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The element does not embed a document at all.
    NotAContainer,
    /// The frame points at another origin.
    CrossOrigin,
    /// The frame has no loaded content.
    Unavailable,
}

/// Outcome of trying to enter an embedded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedAccess<N> {
    Ready(N),
    Skip(SkipReason),
}

/// Read-only selector queries within one scope.
pub trait Scope {
    type Node;

    /// Number of elements in the scope matching `selector`.
    fn count(&self, selector: &str) -> Result<usize, QueryError>;

    /// First element in document order matching `selector`.
    fn first_match(&self, selector: &str) -> Result<Option<Self::Node>, QueryError>;

    /// Whether `node` satisfies `selector`.
    fn matches(&self, node: Self::Node, selector: &str) -> Result<bool, QueryError>;
}

/// Structural access to a host document.
pub trait DocumentTree {
    /// Opaque handle to a node. Handles from nested scopes must not collide.
    type Node: Copy + Eq + Hash + Debug;

    type QueryScope<'a>: Scope<Node = Self::Node>
    where
        Self: 'a;

    fn document_root(&self) -> ScopeRoot<Self::Node>;

    /// Tag name of an element, or an empty string for non-element nodes.
    fn tag_name(&self, node: Self::Node) -> &str;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Structural element children. Shadow tree contents are never included.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn shadow_root(&self, node: Self::Node) -> Option<Self::Node>;

    fn embedded_document(&self, node: Self::Node) -> EmbeddedAccess<Self::Node>;

    fn scope(&self, root: &ScopeRoot<Self::Node>) -> Self::QueryScope<'_>;
}

/// Attribute view of a single element.
pub trait ElementAttributes {
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Adapts a node of any [`DocumentTree`] to [`ElementAttributes`].
pub struct NodeView<'a, T: DocumentTree + ?Sized> {
    tree: &'a T,
    node: T::Node,
}

impl<'a, T: DocumentTree + ?Sized> NodeView<'a, T> {
    pub fn new(tree: &'a T, node: T::Node) -> Self {
        Self { tree, node }
    }

    pub fn node(&self) -> T::Node {
        self.node
    }
}

impl<T: DocumentTree + ?Sized> ElementAttributes for NodeView<'_, T> {
    fn tag_name(&self) -> &str {
        self.tree.tag_name(self.node)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.tree.attribute(self.node, name)
    }
}
