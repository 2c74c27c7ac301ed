//! Filter configuration and vendor-path normalization.
//!
//! A [`FilterConfig`] is an immutable value constructed once per run and
//! passed into the builder; nothing here touches process-wide state.

use rustc_hash::FxHashSet;

/// Reserved directory segment used for vendored dependencies.
const VENDOR_SEGMENT: &str = "vendor/";

/// Filtering options for a single graph-construction run.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Exact import paths to exclude.
    pub ignored: FxHashSet<String>,
    /// Import-path prefixes to exclude.
    pub ignored_prefixes: Vec<String>,
    /// If non-empty, acts as an allow-list: only paths matching one of these
    /// prefixes survive, overriding every other ignore rule.
    pub only_prefixes: Vec<String>,
    /// Exclude packages living under a vendor directory.
    pub ignore_vendor: bool,
    /// Exclude standard-library packages.
    pub ignore_stdlib: bool,
    /// Explore the imports of standard-library packages instead of stopping
    /// at them.
    pub with_stdlib_deps: bool,
    /// Include test imports when computing a package's import list.
    pub with_tests: bool,
    /// Maximum traversal depth; roots sit at depth 0.
    pub max_depth: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        // "C" is the cgo pseudo-package; it never resolves to a directory.
        let mut ignored = FxHashSet::default();
        ignored.insert("C".to_string());
        Self {
            ignored,
            ignored_prefixes: Vec::new(),
            only_prefixes: Vec::new(),
            ignore_vendor: false,
            ignore_stdlib: false,
            with_stdlib_deps: false,
            with_tests: false,
            max_depth: 256,
        }
    }
}

impl FilterConfig {
    /// Decide whether a resolved package is excluded from the graph.
    ///
    /// Pure function of the package's (unnormalized) import path, its
    /// standard-library membership, and this configuration. The allow-list
    /// check runs first, then vendor exclusion, then exact/stdlib/prefix
    /// ignores.
    pub fn is_ignored(&self, import_path: &str, is_stdlib: bool) -> bool {
        let normalized = normalize_vendor(import_path);
        if !self.only_prefixes.is_empty() && !has_any_prefix(normalized, &self.only_prefixes) {
            return true;
        }
        if self.ignore_vendor && is_vendored(import_path) {
            return true;
        }
        self.ignored.contains(normalized)
            || (is_stdlib && self.ignore_stdlib)
            || has_any_prefix(normalized, &self.ignored_prefixes)
    }
}

/// Returns true if the import path contains a vendor directory segment.
pub fn is_vendored(path: &str) -> bool {
    path.contains("/vendor/") || path.starts_with(VENDOR_SEGMENT)
}

/// Strip everything up to and including the last vendor segment, yielding the
/// canonical import path used as the registry key.
pub fn normalize_vendor(path: &str) -> &str {
    match path.rfind(VENDOR_SEGMENT) {
        Some(idx) => &path[idx + VENDOR_SEGMENT.len()..],
        None => path,
    }
}

fn has_any_prefix(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}
