//! HTML-backed document host.
//!
//! Parses static markup with `scraper` and exposes it through [`DocumentTree`]:
//!
//! - `<template shadowrootmode="open|closed">` as the first such child of an
//!   element becomes that element's shadow root.
//! - `<iframe srcdoc>` / `<frame srcdoc>` content is parsed eagerly and exposed
//!   as a same-origin embedded document.
//! - Frames with an absolute `http(s)` or protocol-relative `src` are treated as
//!   cross-origin; any other frame has no accessible content.
//!
//! Selector queries only see elements owned by the queried scope, so shadow
//! contents are invisible from the enclosing document and vice versa.

use crate::dom::{DocumentTree, EmbeddedAccess, QueryError, Scope, ScopeRoot, SkipReason};
use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use tracing::debug;

/// Handle to a node in an [`HtmlDocument`], unique across embedded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HtmlNode {
    document: usize,
    id: NodeId,
}

impl HtmlNode {
    /// Index of the (possibly embedded) document owning this node; 0 is the top level.
    pub fn document_index(&self) -> usize {
        self.document
    }
}

#[derive(Debug, Clone, Copy)]
enum FrameContent {
    Loaded(usize),
    CrossOrigin,
    Unavailable,
}

/// A parsed page together with every same-origin document embedded in it.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    root: HtmlNode,
    documents: Vec<Html>,
    frames: HashMap<HtmlNode, FrameContent>,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        let root = HtmlNode {
            document: 0,
            id: html.tree.root().id(),
        };
        let mut document = Self {
            root,
            documents: Vec::new(),
            frames: HashMap::new(),
        };
        document.load(html);
        document
    }

    /// Total number of parsed documents, including embedded ones.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn load(&mut self, html: Html) -> usize {
        let index = self.documents.len();

        let frames: Vec<(NodeId, Option<String>, Option<String>)> = html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches!(el.value().name(), "iframe" | "frame"))
            .map(|el| {
                (
                    el.id(),
                    el.value().attr("srcdoc").map(str::to_string),
                    el.value().attr("src").map(str::to_string),
                )
            })
            .collect();

        self.documents.push(html);

        for (id, srcdoc, src) in frames {
            let content = match (srcdoc, src) {
                (Some(srcdoc), _) => FrameContent::Loaded(self.load(Html::parse_document(&srcdoc))),
                (None, Some(src)) if is_cross_origin(&src) => FrameContent::CrossOrigin,
                _ => FrameContent::Unavailable,
            };
            self.frames.insert(HtmlNode { document: index, id }, content);
        }

        index
    }

    fn node_ref(&self, node: HtmlNode) -> Option<NodeRef<'_, Node>> {
        self.documents.get(node.document)?.tree.get(node.id)
    }

    fn element(&self, node: HtmlNode) -> Option<ElementRef<'_>> {
        self.node_ref(node).and_then(ElementRef::wrap)
    }

    fn handle(&self, document: usize, node: NodeRef<'_, Node>) -> HtmlNode {
        HtmlNode {
            document,
            id: node.id(),
        }
    }
}

fn is_cross_origin(src: &str) -> bool {
    let src = src.trim().to_ascii_lowercase();
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//")
}

fn is_shadow_template(node: NodeRef<'_, Node>) -> bool {
    node.value()
        .as_element()
        .is_some_and(|el| el.name() == "template" && el.attr("shadowrootmode").is_some())
}

/// Node that owns `node` for query purposes: the enclosing document node or
/// declarative shadow fragment. `None` for inert template content and
/// detached nodes.
fn owning_scope(node: NodeRef<'_, Node>) -> Option<NodeId> {
    for ancestor in node.ancestors() {
        match ancestor.value() {
            Node::Document => return Some(ancestor.id()),
            Node::Fragment => {
                return ancestor
                    .parent()
                    .filter(|template| is_shadow_template(*template))
                    .map(|_| ancestor.id());
            }
            _ => {}
        }
    }
    None
}

impl DocumentTree for HtmlDocument {
    type Node = HtmlNode;
    type QueryScope<'a> = HtmlScope<'a>;

    fn document_root(&self) -> ScopeRoot<HtmlNode> {
        ScopeRoot::Document(self.root)
    }

    fn tag_name(&self, node: HtmlNode) -> &str {
        self.element(node).map_or("", |el| el.value().name())
    }

    fn attribute(&self, node: HtmlNode, name: &str) -> Option<&str> {
        self.element(node)?.value().attr(name)
    }

    fn children(&self, node: HtmlNode) -> Vec<HtmlNode> {
        let Some(node_ref) = self.node_ref(node) else {
            return Vec::new();
        };

        // A document's structural children are those of its document element.
        let parent = if node_ref.value().is_document() {
            match node_ref.children().find(|c| c.value().is_element()) {
                Some(document_element) => document_element,
                None => return Vec::new(),
            }
        } else {
            node_ref
        };

        parent
            .children()
            .filter(|c| c.value().is_element() && !is_shadow_template(*c))
            .map(|c| self.handle(node.document, c))
            .collect()
    }

    fn shadow_root(&self, node: HtmlNode) -> Option<HtmlNode> {
        let node_ref = self.node_ref(node)?;
        if !node_ref.value().is_element() {
            return None;
        }

        let template = node_ref.children().find(|c| is_shadow_template(*c))?;
        let fragment = template.children().find(|c| c.value().is_fragment())?;
        Some(self.handle(node.document, fragment))
    }

    fn embedded_document(&self, node: HtmlNode) -> EmbeddedAccess<HtmlNode> {
        match self.frames.get(&node) {
            Some(FrameContent::Loaded(index)) => match self.documents.get(*index) {
                Some(html) => EmbeddedAccess::Ready(HtmlNode {
                    document: *index,
                    id: html.tree.root().id(),
                }),
                None => EmbeddedAccess::Skip(SkipReason::Unavailable),
            },
            Some(FrameContent::CrossOrigin) => EmbeddedAccess::Skip(SkipReason::CrossOrigin),
            Some(FrameContent::Unavailable) => EmbeddedAccess::Skip(SkipReason::Unavailable),
            None => EmbeddedAccess::Skip(SkipReason::NotAContainer),
        }
    }

    fn scope(&self, root: &ScopeRoot<HtmlNode>) -> HtmlScope<'_> {
        HtmlScope {
            document: self,
            root: root.root(),
        }
    }
}

/// Selector queries restricted to one scope of an [`HtmlDocument`].
pub struct HtmlScope<'a> {
    document: &'a HtmlDocument,
    root: HtmlNode,
}

impl<'a> HtmlScope<'a> {
    fn parse(selector: &str) -> Result<Selector, QueryError> {
        Selector::parse(selector).map_err(|e| {
            debug!(selector = %selector, error = ?e, "Selector failed to parse");
            QueryError::InvalidSelector(selector.to_string())
        })
    }

    /// Elements owned by this scope, in document order.
    fn elements(&self) -> Result<impl Iterator<Item = ElementRef<'a>> + 'a, QueryError> {
        let root = self
            .document
            .node_ref(self.root)
            .ok_or(QueryError::DetachedScope)?;
        let root_id = root.id();

        Ok(root
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |el| owning_scope(**el) == Some(root_id)))
    }
}

impl Scope for HtmlScope<'_> {
    type Node = HtmlNode;

    fn count(&self, selector: &str) -> Result<usize, QueryError> {
        let selector = Self::parse(selector)?;
        Ok(self.elements()?.filter(|el| selector.matches(el)).count())
    }

    fn first_match(&self, selector: &str) -> Result<Option<HtmlNode>, QueryError> {
        let selector = Self::parse(selector)?;
        Ok(self
            .elements()?
            .find(|el| selector.matches(el))
            .map(|el| self.document.handle(self.root.document, *el)))
    }

    fn matches(&self, node: HtmlNode, selector: &str) -> Result<bool, QueryError> {
        let selector = Self::parse(selector)?;
        Ok(self
            .document
            .element(node)
            .is_some_and(|el| selector.matches(&el)))
    }
}
