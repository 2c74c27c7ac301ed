//! Graph builder: depth-limited, memoized import traversal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::filter::{is_vendored, normalize_vendor, FilterConfig};
use crate::package::Package;
use crate::resolver::{RawPackage, ResolveError, Resolver};

/// Flat registry of resolved packages keyed by normalized import path.
///
/// Ordered map so iteration (and therefore rendering and tree construction)
/// is deterministic.
pub type Registry = BTreeMap<String, Package>;

/// Error produced when a package fails to resolve and the caller asked to
/// stop on errors.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to import '{name}' (at depth {depth}, imported by '{imported_by}'): {source}")]
    Resolution {
        name: String,
        depth: usize,
        imported_by: String,
        #[source]
        source: ResolveError,
    },
}

/// Stable, first-seen-wins rendering identifiers.
///
/// Repeated references to the same package render as the same node.
#[derive(Debug, Default)]
pub struct RenderIds {
    ids: FxHashMap<String, String>,
}

impl RenderIds {
    /// Assign an identifier to `name`, keeping any existing assignment.
    pub fn assign(&mut self, name: &str) -> String {
        if let Some(id) = self.ids.get(name) {
            return id.clone();
        }
        let id = format!("n{}", self.ids.len());
        self.ids.insert(name.to_string(), id.clone());
        id
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }
}

/// Orchestrates recursive, memoized import resolution from one or more root
/// package names into a flat [`Registry`].
///
/// The traversal is an explicit worklist rather than call-stack recursion, so
/// stack depth stays bounded regardless of the configured max depth. Imports
/// are pushed in reverse so pop order matches a depth-first visit, keeping
/// render-id assignment stable.
pub struct GraphBuilder<R> {
    resolver: R,
    filter: FilterConfig,
    registry: Registry,
    render_ids: RenderIds,
}

struct WorkItem {
    name: String,
    search_dir: PathBuf,
    depth: usize,
    imported_by: String,
}

impl<R: Resolver> GraphBuilder<R> {
    pub fn new(resolver: R, filter: FilterConfig) -> Self {
        Self {
            resolver,
            filter,
            registry: Registry::new(),
            render_ids: RenderIds::default(),
        }
    }

    /// Resolve the transitive import closure of `roots`.
    ///
    /// Roots enter at depth 0 and an item is silently truncated once its
    /// depth exceeds the configured maximum, so `max_depth = 0` registers
    /// the roots only. With `stop_on_error` unset, unresolvable packages are
    /// skipped and the run continues with a degraded graph.
    pub fn resolve(
        &mut self,
        roots: &[String],
        search_root: &Path,
        stop_on_error: bool,
    ) -> Result<(), BuildError> {
        let mut work: Vec<WorkItem> = roots
            .iter()
            .rev()
            .map(|name| WorkItem {
                name: name.clone(),
                search_dir: search_root.to_path_buf(),
                depth: 0,
                imported_by: String::new(),
            })
            .collect();

        while let Some(item) = work.pop() {
            if item.depth > self.filter.max_depth {
                trace!(name = %item.name, depth = item.depth, "max depth reached, truncating");
                continue;
            }
            if self.filter.ignored.contains(item.name.as_str()) {
                continue;
            }
            if self.registry.contains_key(normalize_vendor(&item.name)) {
                continue;
            }

            let raw = match self.resolver.resolve(&item.name, &item.search_dir) {
                Ok(raw) => raw,
                Err(source) => {
                    if stop_on_error {
                        return Err(BuildError::Resolution {
                            name: item.name,
                            depth: item.depth,
                            imported_by: item.imported_by,
                            source,
                        });
                    }
                    debug!(name = %item.name, error = %source, "skipping unresolvable package");
                    continue;
                }
            };

            if self.filter.is_ignored(&raw.import_path, raw.is_stdlib) {
                trace!(name = %raw.import_path, "filtered out");
                continue;
            }

            let normalized = normalize_vendor(&raw.import_path).to_string();
            if self.registry.contains_key(&normalized) {
                continue;
            }

            let package = Self::record(&normalized, &raw);
            self.render_ids.assign(&normalized);
            trace!(name = %normalized, depth = item.depth, "registered package");

            let explore = !package.is_stdlib || self.filter.with_stdlib_deps;
            let imports = package.import_list(self.filter.with_tests);
            self.registry.insert(normalized.clone(), package);

            // Stdlib short-circuit: the package itself is registered above,
            // but its own dependencies are not explored.
            if !explore {
                continue;
            }

            for import in imports.iter().rev() {
                if !self.registry.contains_key(normalize_vendor(import)) {
                    work.push(WorkItem {
                        name: import.clone(),
                        search_dir: raw.dir.clone(),
                        depth: item.depth + 1,
                        imported_by: normalized.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn record(normalized: &str, raw: &RawPackage) -> Package {
        let mut test_imports = raw.test_imports.clone();
        test_imports.extend(raw.xtest_imports.iter().cloned());
        Package::builder(normalized)
            .dir(raw.dir.clone())
            .stdlib(raw.is_stdlib)
            .vendored(is_vendored(&raw.import_path))
            .foreign_code(raw.has_foreign_code)
            .imports(dedup_excluding(&raw.imports, normalized))
            .test_imports(dedup_excluding(&test_imports, normalized))
            .build()
    }
}

impl<R> GraphBuilder<R> {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn render_ids(&self) -> &RenderIds {
        &self.render_ids
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Consume the builder, yielding the registry and the id cache.
    pub fn into_parts(self) -> (Registry, RenderIds) {
        (self.registry, self.render_ids)
    }
}

fn dedup_excluding(imports: &[String], own_path: &str) -> Vec<String> {
    let mut seen = rustc_hash::FxHashSet::default();
    imports
        .iter()
        .filter(|import| import.as_str() != own_path && seen.insert(import.as_str()))
        .cloned()
        .collect()
}
