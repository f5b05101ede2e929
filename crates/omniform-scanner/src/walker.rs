//! Depth-first, pre-order traversal that feeds target elements through
//! candidate derivation and ranking into a [`SelectorRegistry`].

use crate::candidates::derive_candidates;
use crate::dom::{DocumentTree, EmbeddedAccess, NodeView, Scope, ScopeRoot, SkipReason};
use crate::options::{ElementPredicate, ScanOptions};
use crate::rank::rank;
use crate::registry::{RegistryView, SelectorInfo, SelectorRegistry};
use tracing::{debug, info};

/// Scan the whole document with `options` and return a fresh registry.
pub fn scan<T: DocumentTree>(tree: &T, options: &ScanOptions) -> SelectorRegistry<T::Node> {
    let mut registry = SelectorRegistry::new();
    walk_scope(tree, tree.document_root(), options, &mut registry);
    registry
}

/// Stateful scanner that keeps default options and the latest scan result.
#[derive(Debug, Clone)]
pub struct DomScanner<N> {
    options: ScanOptions,
    registry: SelectorRegistry<N>,
}

impl<N> Default for DomScanner<N> {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl<N> DomScanner<N> {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            registry: SelectorRegistry::new(),
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Result of the most recent scan.
    pub fn registry(&self) -> &SelectorRegistry<N> {
        &self.registry
    }

    pub fn to_view(&self) -> RegistryView {
        self.registry.to_view()
    }
}

impl<N: Copy> DomScanner<N> {
    /// Scan the whole document using the scanner's own options.
    pub fn scan<T>(&mut self, tree: &T) -> &SelectorRegistry<N>
    where
        T: DocumentTree<Node = N>,
    {
        let options = self.options.clone();
        self.scan_scope(tree, tree.document_root(), &options)
    }

    /// Scan the whole document with per-call options.
    pub fn scan_with<T>(&mut self, tree: &T, options: &ScanOptions) -> &SelectorRegistry<N>
    where
        T: DocumentTree<Node = N>,
    {
        self.scan_scope(tree, tree.document_root(), options)
    }

    /// Scan starting at an arbitrary scope root. Previous results are discarded.
    pub fn scan_scope<T>(
        &mut self,
        tree: &T,
        root: ScopeRoot<N>,
        options: &ScanOptions,
    ) -> &SelectorRegistry<N>
    where
        T: DocumentTree<Node = N>,
    {
        self.registry.clear();
        walk_scope(tree, root, options, &mut self.registry);
        &self.registry
    }
}

fn walk_scope<T: DocumentTree>(
    tree: &T,
    root: ScopeRoot<T::Node>,
    options: &ScanOptions,
    registry: &mut SelectorRegistry<T::Node>,
) {
    let mut walker = Walker {
        tree,
        options,
        registry,
        visited: 0,
        targets: 0,
    };
    walker.walk(root.root(), 0, &root);

    info!(
        scope = root.kind(),
        visited = walker.visited,
        targets = walker.targets,
        entries = walker.registry.len(),
        "Scan complete"
    );
}

struct Walker<'a, T: DocumentTree> {
    tree: &'a T,
    options: &'a ScanOptions,
    registry: &'a mut SelectorRegistry<T::Node>,
    visited: usize,
    targets: usize,
}

impl<T: DocumentTree> Walker<'_, T> {
    fn walk(&mut self, node: T::Node, depth: usize, scope_root: &ScopeRoot<T::Node>) {
        if let Some(max_depth) = self.options.max_depth
            && depth > max_depth
        {
            return;
        }

        for child in self.tree.children(node) {
            self.visited += 1;
            self.handle_element(child, scope_root);

            if self.options.include_shadow_boundaries
                && let Some(shadow) = self.tree.shadow_root(child)
            {
                let shadow_scope = ScopeRoot::Shadow {
                    host: child,
                    root: shadow,
                };
                self.walk(shadow, depth + 1, &shadow_scope);
            }

            if self.options.include_embedded_documents {
                match self.tree.embedded_document(child) {
                    EmbeddedAccess::Ready(root) => {
                        let frame_scope = ScopeRoot::Embedded { frame: child, root };
                        self.walk(root, depth + 1, &frame_scope);
                    }
                    EmbeddedAccess::Skip(SkipReason::NotAContainer) => {}
                    EmbeddedAccess::Skip(reason) => {
                        debug!(frame = ?child, ?reason, "Skipping embedded document");
                    }
                }
            }

            self.walk(child, depth + 1, scope_root);
        }
    }

    fn handle_element(&mut self, element: T::Node, scope_root: &ScopeRoot<T::Node>) {
        let tag_name = self.tree.tag_name(element);
        if !self.options.is_target(tag_name) {
            return;
        }
        self.targets += 1;

        let view = NodeView::new(self.tree, element);
        let candidates = derive_candidates(&view, &self.options.attribute_priority);
        let scope = self.tree.scope(scope_root);
        let ranked = rank(&candidates, &scope, &self.options.attribute_priority);
        let blacklist = Blacklist::new(self.options);

        // Only the best non-blacklisted candidate represents the element.
        let Some(best) = ranked
            .into_iter()
            .find(|info| !blacklist.rejects(self.tree, info, &scope))
        else {
            debug!(element = ?element, tag = tag_name, "No usable selector for element");
            return;
        };

        let selector = best.selector.clone();
        let score = best.score;
        if !self.registry.offer(best) {
            debug!(selector = %selector, score, "Kept existing higher-or-equal entry");
        }
    }
}

/// Blacklist rules for one scan. A candidate is rejected when its selector
/// equals an entry, when its matched element satisfies an entry, or when a
/// predicate accepts its matched element.
struct Blacklist<'a> {
    selectors: &'a [String],
    predicates: &'a [ElementPredicate],
}

impl<'a> Blacklist<'a> {
    fn new(options: &'a ScanOptions) -> Self {
        Self {
            selectors: &options.blacklist_selectors,
            predicates: &options.blacklist_predicates,
        }
    }

    fn rejects<T, S>(&self, tree: &T, info: &SelectorInfo<T::Node>, scope: &S) -> bool
    where
        T: DocumentTree,
        S: Scope<Node = T::Node>,
    {
        // Invalid entries never match.
        let rejected = self.selectors.iter().any(|entry| {
            *entry == info.selector || scope.matches(info.element, entry).unwrap_or(false)
        }) || self
            .predicates
            .iter()
            .any(|predicate| predicate.test(&NodeView::new(tree, info.element)));

        if rejected {
            debug!(selector = %info.selector, "Skipping blacklisted candidate");
        }
        rejected
    }
}
