//! Command body: build the graph from CLI arguments and pick an output shape.

use std::env;

use pkgtree_graph::{
    render_clustered, render_flat, DotOptions, FilterConfig, GoResolver, GraphBuilder,
    PackageTree,
};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Build the package graph and render it according to the arguments.
///
/// Returns the complete output text, newline-terminated; printing is left to
/// the caller so diagnostics and payload never interleave.
pub fn execute(args: &Cli) -> Result<String> {
    let filter = filter_from_args(args);
    let resolver = GoResolver::new().with_tags(args.tags.clone());
    let mut builder = GraphBuilder::new(resolver, filter.clone());

    let cwd = env::current_dir()?;
    builder.resolve(&args.packages, &cwd, args.stop_on_error)?;
    debug!(packages = builder.registry().len(), "resolved package graph");

    let opts = DotOptions {
        horizontal: args.horizontal,
        no_edges: args.no_edges,
    };

    if args.json_tree || args.cluster || args.subtree.is_some() {
        let mut tree = PackageTree::from_registry(builder.registry(), &filter);
        if let Some(path) = &args.subtree {
            let segments = subtree_segments(path)?;
            tree = tree
                .get_child(&segments)
                .ok_or_else(|| CliError::SubtreeNotFound(path.clone()))?;
        }
        if args.json_tree {
            let mut json = serde_json::to_string_pretty(&tree)?;
            json.push('\n');
            return Ok(json);
        }
        return Ok(render_clustered(&tree, opts));
    }

    Ok(render_flat(
        builder.registry(),
        builder.render_ids(),
        &filter,
        opts,
    ))
}

fn subtree_segments(path: &str) -> Result<Vec<&str>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(CliError::InvalidArgument(
            "--subtree requires a non-empty slash-separated path".to_string(),
        ));
    }
    if trimmed.split('/').any(str::is_empty) {
        return Err(CliError::InvalidArgument(format!(
            "--subtree path '{path}' contains an empty segment"
        )));
    }
    Ok(trimmed.split('/').collect())
}

fn filter_from_args(args: &Cli) -> FilterConfig {
    let mut filter = FilterConfig::default();
    filter.ignored.extend(args.ignore_packages.iter().cloned());
    filter.ignored_prefixes = args.ignore_prefixes.clone();
    filter.only_prefixes = args.only_prefixes.clone();
    filter.ignore_vendor = args.novendor;
    filter.ignore_stdlib = args.nostdlib;
    filter.with_stdlib_deps = args.with_stdlib_deps;
    filter.with_tests = args.with_tests;
    filter.max_depth = args.max_depth;
    filter
}
