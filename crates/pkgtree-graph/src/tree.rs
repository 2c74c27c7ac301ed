//! Hierarchical tree aggregation over a flat package registry.
//!
//! Each node represents one `/`-separated path segment; a node's import list
//! holds the imports attributable to the package at exactly that path.
//! Synthetic intermediate segments carry empty lists. Children are kept in a
//! sorted map so traversal order is deterministic.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::builder::Registry;
use crate::filter::FilterConfig;
use crate::package::Package;

/// One node of the path-segmented package tree.
///
/// The tree is acyclic by construction: paths are split into a fixed segment
/// sequence and nodes are created along it, parent owning child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageTree {
    pub name: String,
    pub imports: Vec<String>,
    pub children: BTreeMap<String, PackageTree>,
}

/// A rendered dependency edge.
///
/// Both endpoints are `/`-prefixed so node paths and import paths share one
/// flat namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl PackageTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Fold a registry into a tree rooted at an empty-named node.
    ///
    /// Imports whose target is absent from the registry or excluded by the
    /// filter are dropped from the attributable list; a package may import
    /// something that was itself filtered out or never resolved.
    pub fn from_registry(registry: &Registry, filter: &FilterConfig) -> Self {
        let mut root = Self::new("");
        for (path, package) in registry {
            let segments: Vec<&str> = path.split('/').collect();
            root.insert(&segments, attributable_imports(package, registry, filter));
        }
        root
    }

    /// Walk/create nodes along `segments` and set the final node's imports.
    ///
    /// Intermediate nodes are created with empty import lists; revisiting a
    /// path overwrites (last write wins).
    pub fn insert(&mut self, segments: &[&str], imports: Vec<String>) {
        let mut node = self;
        for segment in segments {
            node = node
                .children
                .entry((*segment).to_string())
                .or_insert_with(|| PackageTree::new(*segment));
        }
        node.imports = imports;
    }

    /// Extract a structurally independent subtree rooted at `path`.
    ///
    /// Import paths in the copy are rewritten relative to the new root: the
    /// `path.join("/") + "/"` prefix is stripped where it matches exactly,
    /// and imports pointing outside the subtree are left unchanged. An empty
    /// path returns a copy of the whole tree.
    pub fn get_child(&self, path: &[&str]) -> Option<PackageTree> {
        let mut node = self;
        for segment in path {
            node = node.children.get(*segment)?;
        }
        let mut subtree = node.clone();
        if !path.is_empty() {
            let prefix = format!("{}/", path.join("/"));
            subtree.strip_import_prefix(&prefix);
        }
        Some(subtree)
    }

    fn strip_import_prefix(&mut self, prefix: &str) {
        for import in &mut self.imports {
            if let Some(rest) = import.strip_prefix(prefix) {
                *import = rest.to_string();
            }
        }
        for child in self.children.values_mut() {
            child.strip_import_prefix(prefix);
        }
    }

    /// Pre-order edge list, one edge per import per node, children visited
    /// in sorted order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::new();
        self.collect_edges("", &mut out);
        out
    }

    fn collect_edges(&self, path: &str, out: &mut Vec<Edge>) {
        for import in &self.imports {
            out.push(Edge {
                from: path.to_string(),
                to: format!("/{import}"),
            });
        }
        for child in self.children.values() {
            let child_path = format!("{path}/{}", child.name);
            child.collect_edges(&child_path, out);
        }
    }

    /// Paths of all leaf nodes, in sorted order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        for child in self.children.values() {
            child.collect_leaf_paths(&child.name, &mut out);
        }
        out
    }

    fn collect_leaf_paths(&self, path: &str, out: &mut Vec<String>) {
        if self.children.is_empty() {
            out.push(path.to_string());
            return;
        }
        for child in self.children.values() {
            child.collect_leaf_paths(&format!("{path}/{}", child.name), out);
        }
    }
}

fn attributable_imports(
    package: &Package,
    registry: &Registry,
    filter: &FilterConfig,
) -> Vec<String> {
    package
        .import_list(filter.with_tests)
        .into_iter()
        .filter(|import| {
            registry
                .get(import.as_str())
                .is_some_and(|target| !filter.is_ignored(&target.import_path, target.is_stdlib))
        })
        .collect()
}
