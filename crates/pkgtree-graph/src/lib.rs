//! # pkgtree-graph
//!
//! Package import-graph construction and hierarchical tree aggregation.
//!
//! This crate resolves the transitive import closure of one or more root
//! packages into a flat registry, then folds that registry into a
//! path-segmented tree suitable for clustered rendering. It provides:
//!
//! - **Resolver seam**: the [`Resolver`] trait abstracts the import oracle.
//!   [`GoResolver`] shells out to `go list -e -json`; [`StaticResolver`] is a
//!   deterministic in-memory implementation for tests and embedding callers.
//! - **Graph builder**: [`GraphBuilder`] performs a depth-limited, memoized
//!   traversal with vendor normalization and ignore/include filtering.
//! - **Tree aggregator**: [`PackageTree`] groups registry entries by path
//!   segment, supports subtree extraction with relative import rewriting, and
//!   yields deterministic edge lists.
//! - **Renderers**: [`dot`] emits flat or clustered Graphviz text; the tree
//!   serializes to JSON via `serde`.
//!
//! All traversal is single-threaded and synchronous; the registry and caches
//! are private to one builder run.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pkgtree_graph::{FilterConfig, GoResolver, GraphBuilder, PackageTree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = FilterConfig::default();
//! let mut builder = GraphBuilder::new(GoResolver::new(), filter.clone());
//! builder.resolve(&["github.com/user/app".into()], &std::env::current_dir()?, true)?;
//!
//! let tree = PackageTree::from_registry(builder.registry(), &filter);
//! println!("{}", serde_json::to_string_pretty(&tree)?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod dot;
pub mod filter;
pub mod package;
pub mod resolver;
pub mod tree;

pub use builder::{BuildError, GraphBuilder, Registry, RenderIds};
pub use dot::{render_clustered, render_flat, DotOptions};
pub use filter::{is_vendored, normalize_vendor, FilterConfig};
pub use package::{Package, PackageBuilder, PackageCategory};
pub use resolver::{GoResolver, RawPackage, ResolveError, Resolver, StaticResolver};
pub use tree::{Edge, PackageTree};
