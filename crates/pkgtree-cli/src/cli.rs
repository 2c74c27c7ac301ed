//! Command-line interface definition.
//!
//! A single-purpose tool, so the surface is a flat argument struct rather
//! than subcommands. Comma-separated list options are split by clap.

use clap::{ArgAction, Parser};

/// pkgtree - visualize the import graph of Go packages
#[derive(Parser, Debug)]
#[command(
    name = "pkgtree",
    version,
    about = "Visualize the import graph of Go packages",
    long_about = "pkgtree resolves the transitive import closure of one or more root\n\
                  packages and renders it as a Graphviz graph (flat or clustered by\n\
                  path segment) or as a JSON tree."
)]
pub struct Cli {
    /// Root packages to graph
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Ignore packages in the Go standard library
    #[arg(short = 's', long)]
    pub nostdlib: bool,

    /// Ignore packages in vendor directories
    #[arg(long)]
    pub novendor: bool,

    /// Stop when a package fails to resolve
    ///
    /// With --stop-on-error=false, unresolvable packages are skipped and the
    /// graph is rendered from whatever did resolve.
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub stop_on_error: bool,

    /// Show dependencies of packages in the standard library
    #[arg(short = 'd', long)]
    pub with_stdlib_deps: bool,

    /// Comma-separated list of import path prefixes to ignore
    #[arg(short = 'p', long, value_name = "LIST", value_delimiter = ',')]
    pub ignore_prefixes: Vec<String>,

    /// Comma-separated list of packages to ignore
    #[arg(short = 'i', long, value_name = "LIST", value_delimiter = ',')]
    pub ignore_packages: Vec<String>,

    /// Comma-separated list of import path prefixes to include
    ///
    /// When given, acts as an allow-list overriding every ignore rule.
    #[arg(short = 'o', long, value_name = "LIST", value_delimiter = ',')]
    pub only_prefixes: Vec<String>,

    /// Comma-separated list of build tags considered satisfied
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Lay the graph out horizontally instead of vertically
    #[arg(long)]
    pub horizontal: bool,

    /// Include test imports
    #[arg(short = 't', long)]
    pub with_tests: bool,

    /// Maximum depth of the dependency graph
    #[arg(short = 'l', long, value_name = "N", default_value_t = 256)]
    pub max_depth: usize,

    /// Print the package tree as JSON instead of a graph
    #[arg(long)]
    pub json_tree: bool,

    /// Extract the subtree rooted at this slash-separated path
    ///
    /// Import paths in the output are rewritten relative to the subtree
    /// root. Implies --cluster unless --json-tree is given.
    #[arg(long, value_name = "PATH")]
    pub subtree: Option<String>,

    /// Render a clustered graph grouped by path segments
    #[arg(long)]
    pub cluster: bool,

    /// Omit edges from rendered output
    #[arg(long)]
    pub no_edges: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
