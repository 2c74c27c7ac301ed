//! Import-resolution oracle seam.
//!
//! The builder only depends on the [`Resolver`] trait. [`GoResolver`] is the
//! production implementation backed by `go list`; [`StaticResolver`] is a
//! deterministic in-memory implementation for tests and embedding callers.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Raw package metadata as reported by the oracle, before vendor
/// normalization and filtering.
#[derive(Debug, Clone, Default)]
pub struct RawPackage {
    /// Import path as reported, vendor prefix included if present.
    pub import_path: String,
    /// Directory the package sources live in.
    pub dir: PathBuf,
    /// Standard-distribution membership.
    pub is_stdlib: bool,
    /// True if the package carries foreign-code (cgo) files.
    pub has_foreign_code: bool,
    /// Direct imports, as reported.
    pub imports: Vec<String>,
    /// Imports of the package's internal test files.
    pub test_imports: Vec<String>,
    /// Imports of the package's external (`_test` package) test files.
    pub xtest_imports: Vec<String>,
}

/// Error produced by a single oracle lookup.
///
/// Lookups are definitive: a failed resolution indicates a missing or
/// misnamed package, so callers never retry.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to run `go list` for '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`go list` produced invalid JSON for '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot load package '{name}': {message}")]
    Package { name: String, message: String },
}

/// A single import lookup: package identifier relative to a search directory.
pub trait Resolver {
    fn resolve(&self, name: &str, search_dir: &Path) -> Result<RawPackage, ResolveError>;
}

/// Production resolver backed by `go list -e -json`.
///
/// Each lookup is a blocking subprocess invocation; the builder calls it
/// strictly sequentially.
#[derive(Debug, Clone, Default)]
pub struct GoResolver {
    build_tags: Vec<String>,
}

impl GoResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build tags considered satisfied when listing package files.
    pub fn with_tags(mut self, build_tags: Vec<String>) -> Self {
        self.build_tags = build_tags;
        self
    }
}

impl Resolver for GoResolver {
    fn resolve(&self, name: &str, search_dir: &Path) -> Result<RawPackage, ResolveError> {
        let mut cmd = Command::new("go");
        cmd.arg("list").arg("-e").arg("-json");
        if !self.build_tags.is_empty() {
            cmd.arg("-tags").arg(self.build_tags.join(","));
        }
        cmd.arg("--").arg(name);
        if !search_dir.as_os_str().is_empty() {
            cmd.current_dir(search_dir);
        }

        let output = cmd.output().map_err(|source| ResolveError::Spawn {
            name: name.to_string(),
            source,
        })?;

        if output.stdout.is_empty() {
            return Err(ResolveError::Package {
                name: name.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let listed: GoListPackage =
            serde_json::from_slice(&output.stdout).map_err(|source| ResolveError::Parse {
                name: name.to_string(),
                source,
            })?;

        // With -e the process exits zero and reports load failures inline.
        if let Some(error) = listed.error {
            return Err(ResolveError::Package {
                name: name.to_string(),
                message: error.err,
            });
        }

        Ok(RawPackage {
            import_path: listed.import_path,
            dir: listed.dir,
            is_stdlib: listed.standard,
            has_foreign_code: !listed.cgo_files.is_empty(),
            imports: listed.imports,
            test_imports: listed.test_imports,
            xtest_imports: listed.xtest_imports,
        })
    }
}

/// Subset of the `go list -json` payload the graph needs.
#[derive(Debug, Deserialize)]
struct GoListPackage {
    #[serde(rename = "ImportPath", default)]
    import_path: String,
    #[serde(rename = "Dir", default)]
    dir: PathBuf,
    #[serde(rename = "Standard", default)]
    standard: bool,
    #[serde(rename = "CgoFiles", default)]
    cgo_files: Vec<String>,
    #[serde(rename = "Imports", default)]
    imports: Vec<String>,
    #[serde(rename = "TestImports", default)]
    test_imports: Vec<String>,
    #[serde(rename = "XTestImports", default)]
    xtest_imports: Vec<String>,
    #[serde(rename = "Error", default)]
    error: Option<GoListError>,
}

#[derive(Debug, Deserialize)]
struct GoListError {
    #[serde(rename = "Err", default)]
    err: String,
}

/// Deterministic in-memory resolver keyed by requested package name.
///
/// Records every lookup so tests can assert how often a package was
/// resolved (memoization behavior).
#[derive(Debug, Default)]
pub struct StaticResolver {
    packages: FxHashMap<String, RawPackage>,
    lookups: RefCell<Vec<String>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package under its (unnormalized) import path.
    pub fn insert(&mut self, package: RawPackage) {
        self.packages.insert(package.import_path.clone(), package);
    }

    /// Every lookup performed so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, name: &str, _search_dir: &Path) -> Result<RawPackage, ResolveError> {
        self.lookups.borrow_mut().push(name.to_string());
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::Package {
                name: name.to_string(),
                message: "package not found".to_string(),
            })
    }
}
