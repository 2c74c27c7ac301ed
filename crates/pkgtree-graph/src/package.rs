//! Resolved package metadata.

use std::path::PathBuf;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Resolved package metadata stored in the registry.
///
/// The import path is normalized (vendor prefix stripped) and doubles as the
/// registry key. Records are immutable once resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Normalized import path, unique within a registry.
    pub import_path: String,
    /// On-disk directory the package was resolved to.
    pub dir: PathBuf,
    /// True for packages shipped with the standard distribution.
    pub is_stdlib: bool,
    /// True if the package was found under a vendor directory.
    pub is_vendored: bool,
    /// True if the package contains foreign-code (cgo) files.
    pub has_foreign_code: bool,
    /// Direct imports, deduplicated, self-reference excluded.
    pub imports: Vec<String>,
    /// Test-only imports, deduplicated, self-reference excluded.
    pub test_imports: Vec<String>,
}

impl Package {
    /// Create a new package builder with empty import lists.
    pub fn builder(import_path: impl Into<String>) -> PackageBuilder {
        PackageBuilder {
            package: Self {
                import_path: import_path.into(),
                dir: PathBuf::new(),
                is_stdlib: false,
                is_vendored: false,
                has_foreign_code: false,
                imports: Vec::new(),
                test_imports: Vec::new(),
            },
        }
    }

    /// The import list used for traversal and edge emission.
    ///
    /// Merges direct and (optionally) test imports, deduplicated in first
    /// occurrence order. A package's test variant importing the package
    /// itself does not produce a self-edge.
    pub fn import_list(&self, with_tests: bool) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let test_imports = if with_tests {
            self.test_imports.as_slice()
        } else {
            &[]
        };
        for import in self.imports.iter().chain(test_imports) {
            if import == &self.import_path {
                continue;
            }
            if seen.insert(import.as_str()) {
                out.push(import.clone());
            }
        }
        out
    }

    /// Rendering category, derived from the record's flags.
    pub fn category(&self) -> PackageCategory {
        if self.is_stdlib {
            PackageCategory::Stdlib
        } else if self.has_foreign_code {
            PackageCategory::ForeignCode
        } else if self.is_vendored {
            PackageCategory::Vendored
        } else {
            PackageCategory::Ordinary
        }
    }
}

/// Builder for [`Package`] to avoid long constructor argument lists.
pub struct PackageBuilder {
    package: Package,
}

impl PackageBuilder {
    pub fn dir(mut self, dir: PathBuf) -> Self {
        self.package.dir = dir;
        self
    }

    pub fn stdlib(mut self, is_stdlib: bool) -> Self {
        self.package.is_stdlib = is_stdlib;
        self
    }

    pub fn vendored(mut self, is_vendored: bool) -> Self {
        self.package.is_vendored = is_vendored;
        self
    }

    pub fn foreign_code(mut self, has_foreign_code: bool) -> Self {
        self.package.has_foreign_code = has_foreign_code;
        self
    }

    pub fn imports(mut self, imports: Vec<String>) -> Self {
        self.package.imports = imports;
        self
    }

    pub fn test_imports(mut self, test_imports: Vec<String>) -> Self {
        self.package.test_imports = test_imports;
        self
    }

    pub fn build(self) -> Package {
        self.package
    }
}

/// Rendering category for a package node.
///
/// Categories are checked in declaration order: standard-library membership
/// wins over foreign code, which wins over vendoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageCategory {
    Stdlib,
    ForeignCode,
    Vendored,
    Ordinary,
}
