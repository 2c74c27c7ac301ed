//! Graphviz (DOT) text emission.
//!
//! Two shapes: a flat graph with one styled node per registry entry, and a
//! clustered graph where tree nodes with children become subgraph clusters.

use rustc_hash::FxHashSet;

use crate::builder::{Registry, RenderIds};
use crate::filter::FilterConfig;
use crate::package::{Package, PackageCategory};
use crate::tree::PackageTree;

/// Rendering options shared by both graph shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotOptions {
    /// Lay the graph out left-to-right instead of top-to-bottom.
    pub horizontal: bool,
    /// Emit nodes and clusters only.
    pub no_edges: bool,
}

const DOC_URL_BASE: &str = "https://pkg.go.dev";

fn fill_color(package: &Package) -> &'static str {
    match package.category() {
        PackageCategory::Stdlib => "palegreen",
        PackageCategory::ForeignCode => "darkgoldenrod1",
        PackageCategory::Vendored => "palegoldenrod",
        PackageCategory::Ordinary => "paleturquoise",
    }
}

fn header(out: &mut String, opts: DotOptions) {
    out.push_str("digraph pkgtree {\n");
    if opts.horizontal {
        out.push_str("rankdir=\"LR\"\n");
    }
    out.push_str("splines=ortho\n");
    out.push_str("nodesep=0.4\n");
    out.push_str("ranksep=0.8\n");
    out.push_str("node [shape=\"box\",style=\"rounded,filled\"]\n");
    out.push_str("edge [arrowsize=\"0.5\"]\n");
}

/// Render the flat registry graph.
///
/// One node per (non-ignored) registry entry in sorted order, colored by
/// category and carrying a documentation link derived from the import path;
/// one edge per import whose target survived filtering. Imports of
/// standard-library packages are skipped unless the filter asks for them.
pub fn render_flat(
    registry: &Registry,
    ids: &RenderIds,
    filter: &FilterConfig,
    opts: DotOptions,
) -> String {
    let mut out = String::new();
    header(&mut out, opts);

    for (name, package) in registry {
        if filter.is_ignored(&package.import_path, package.is_stdlib) {
            continue;
        }
        let id = node_id(ids, name);
        out.push_str(&format!(
            "{id} [label=\"{name}\" color=\"{color}\" URL=\"{base}/{name}\" target=\"_blank\"];\n",
            color = fill_color(package),
            base = DOC_URL_BASE,
        ));

        if opts.no_edges || (package.is_stdlib && !filter.with_stdlib_deps) {
            continue;
        }
        for import in package.import_list(filter.with_tests) {
            let Some(target) = registry.get(import.as_str()) else {
                continue;
            };
            if filter.is_ignored(&target.import_path, target.is_stdlib) {
                continue;
            }
            out.push_str(&format!("{id} -> {};\n", node_id(ids, &import)));
        }
    }

    out.push_str("}\n");
    out
}

fn node_id(ids: &RenderIds, name: &str) -> String {
    match ids.get(name) {
        Some(id) => id.to_string(),
        // Registries built outside a GraphBuilder run have no id cache.
        None => format!("\"{name}\""),
    }
}

/// Render the clustered graph driven by the package tree.
///
/// A node with children becomes a cluster containing its own box plus its
/// children; leaves are plain boxes. Edges come from the tree's pre-order
/// edge list; edges whose endpoint fell outside the rendered tree (for
/// example after subtree extraction) are dropped.
pub fn render_clustered(tree: &PackageTree, opts: DotOptions) -> String {
    let mut out = String::new();
    header(&mut out, opts);

    let mut rendered = FxHashSet::default();
    write_cluster(&mut out, tree, "", 0, &mut rendered);

    if !opts.no_edges {
        for edge in tree.edges() {
            if rendered.contains(edge.from.as_str()) && rendered.contains(edge.to.as_str()) {
                out.push_str(&format!(
                    "\"{}\" -> \"{}\" [id=\"{}->{}\"];\n",
                    edge.from, edge.to, edge.from, edge.to
                ));
            }
        }
    }

    out.push_str("}\n");
    out
}

fn write_cluster(
    out: &mut String,
    node: &PackageTree,
    path: &str,
    depth: usize,
    rendered: &mut FxHashSet<String>,
) {
    let is_cluster = !node.children.is_empty() && depth > 0;
    if is_cluster {
        out.push_str(&format!("subgraph \"cluster_{path}\" {{\n"));
        out.push_str(&format!("label=\"{}\";\n", node.name));
    }
    if depth > 0 {
        out.push_str(&format!(
            "\"{path}\" [label=\"{}\" fillcolor=\"#afeeee\" id=\"{path}\"];\n",
            node.name
        ));
        rendered.insert(path.to_string());
    }
    for child in node.children.values() {
        let child_path = format!("{path}/{}", child.name);
        write_cluster(out, child, &child_path, depth + 1, rendered);
    }
    if is_cluster {
        out.push_str("}\n");
    }
}
