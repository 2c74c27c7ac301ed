//! End-to-end graph construction and aggregation tests over an in-memory
//! resolver.

use std::path::{Path, PathBuf};

use pkgtree_graph::{
    FilterConfig, GraphBuilder, PackageTree, RawPackage, StaticResolver,
};

fn raw(import_path: &str, imports: &[&str]) -> RawPackage {
    RawPackage {
        import_path: import_path.to_string(),
        dir: PathBuf::from("/src").join(import_path),
        imports: imports.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn resolver_with(packages: Vec<RawPackage>) -> StaticResolver {
    let mut resolver = StaticResolver::new();
    for package in packages {
        resolver.insert(package);
    }
    resolver
}

fn registry_keys<R>(builder: &GraphBuilder<R>) -> Vec<&str> {
    builder.registry().keys().map(String::as_str).collect()
}

#[test]
fn resolves_transitive_closure() {
    let resolver = resolver_with(vec![
        raw("app", &["lib/a", "lib/b"]),
        raw("lib/a", &["lib/c"]),
        raw("lib/b", &[]),
        raw("lib/c", &[]),
    ]);
    let mut builder = GraphBuilder::new(resolver, FilterConfig::default());
    builder
        .resolve(&["app".into()], Path::new("/src"), true)
        .unwrap();

    assert_eq!(registry_keys(&builder), vec!["app", "lib/a", "lib/b", "lib/c"]);
}

#[test]
fn diamond_dependency_resolves_shared_node_once() {
    let resolver = resolver_with(vec![
        raw("a", &["b", "c"]),
        raw("b", &["d"]),
        raw("c", &["d"]),
        raw("d", &[]),
    ]);
    let mut builder = GraphBuilder::new(resolver, FilterConfig::default());
    builder.resolve(&["a".into()], Path::new("/src"), true).unwrap();

    assert_eq!(registry_keys(&builder), vec!["a", "b", "c", "d"]);
    let d_lookups = builder
        .resolver()
        .lookups()
        .iter()
        .filter(|name| name.as_str() == "d")
        .count();
    assert_eq!(d_lookups, 1);
}

#[test]
fn max_depth_zero_keeps_roots_only() {
    let resolver = resolver_with(vec![raw("a", &["b"]), raw("b", &[])]);
    let filter = FilterConfig {
        max_depth: 0,
        ..Default::default()
    };
    let mut builder = GraphBuilder::new(resolver, filter);
    builder.resolve(&["a".into()], Path::new("/src"), true).unwrap();

    assert_eq!(registry_keys(&builder), vec!["a"]);
}

#[test]
fn vendor_ignore_excludes_package_and_does_not_recurse() {
    let resolver = resolver_with(vec![
        raw("app", &["a/vendor/lib/x"]),
        raw("a/vendor/lib/x", &["lib/deep"]),
        raw("lib/deep", &[]),
    ]);
    let filter = FilterConfig {
        ignore_vendor: true,
        ..Default::default()
    };
    let mut builder = GraphBuilder::new(resolver, filter);
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    // The vendored package is excluded and never recursed into.
    assert_eq!(registry_keys(&builder), vec!["app"]);
    assert!(!builder
        .resolver()
        .lookups()
        .contains(&"lib/deep".to_string()));
}

#[test]
fn ignored_prefixes_prune_matching_branches() {
    let resolver = resolver_with(vec![
        raw("app", &["lib/a", "internal/tools"]),
        raw("lib/a", &[]),
        raw("internal/tools", &["internal/deep"]),
    ]);
    let filter = FilterConfig {
        ignored_prefixes: vec!["internal/".to_string()],
        ..Default::default()
    };
    let mut builder = GraphBuilder::new(resolver, filter);
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    assert_eq!(registry_keys(&builder), vec!["app", "lib/a"]);
}

#[test]
fn stdlib_packages_register_without_recursing() {
    let mut fmt = raw("fmt", &["io", "unicode/utf8"]);
    fmt.is_stdlib = true;
    let resolver = resolver_with(vec![raw("app", &["fmt"]), fmt]);
    let mut builder = GraphBuilder::new(resolver, FilterConfig::default());
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    assert_eq!(registry_keys(&builder), vec!["app", "fmt"]);
    assert!(!builder.resolver().lookups().contains(&"io".to_string()));
}

#[test]
fn stdlib_deps_are_explored_when_requested() {
    let mut fmt = raw("fmt", &["io"]);
    fmt.is_stdlib = true;
    let mut io = raw("io", &[]);
    io.is_stdlib = true;
    let resolver = resolver_with(vec![raw("app", &["fmt"]), fmt, io]);
    let filter = FilterConfig {
        with_stdlib_deps: true,
        ..Default::default()
    };
    let mut builder = GraphBuilder::new(resolver, filter);
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    assert_eq!(registry_keys(&builder), vec!["app", "fmt", "io"]);
}

#[test]
fn vendored_import_is_normalized_in_registry() {
    let resolver = resolver_with(vec![
        raw("app", &["app/vendor/lib/x"]),
        raw("app/vendor/lib/x", &[]),
    ]);
    let mut builder = GraphBuilder::new(resolver, FilterConfig::default());
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    assert_eq!(registry_keys(&builder), vec!["app", "lib/x"]);
    assert!(builder.registry()["lib/x"].is_vendored);
}

#[test]
fn unresolvable_package_fails_with_context_when_stopping() {
    let resolver = resolver_with(vec![raw("app", &["gone"])]);
    let mut builder = GraphBuilder::new(resolver, FilterConfig::default());
    let err = builder
        .resolve(&["app".into()], Path::new("/src"), true)
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("'gone'"));
    assert!(message.contains("depth 1"));
    assert!(message.contains("imported by 'app'"));
}

#[test]
fn unresolvable_package_is_skipped_when_continuing() {
    let resolver = resolver_with(vec![raw("app", &["gone", "lib/a"]), raw("lib/a", &[])]);
    let mut builder = GraphBuilder::new(resolver, FilterConfig::default());
    builder.resolve(&["app".into()], Path::new("/src"), false).unwrap();

    assert_eq!(registry_keys(&builder), vec!["app", "lib/a"]);
}

#[test]
fn test_imports_are_traversed_only_when_enabled() {
    let mut app = raw("app", &["lib/a"]);
    app.test_imports = vec!["lib/testkit".into()];
    let packages = vec![app, raw("lib/a", &[]), raw("lib/testkit", &[])];

    let mut builder = GraphBuilder::new(
        resolver_with(packages.clone()),
        FilterConfig::default(),
    );
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();
    assert_eq!(registry_keys(&builder), vec!["app", "lib/a"]);

    let filter = FilterConfig {
        with_tests: true,
        ..Default::default()
    };
    let mut builder = GraphBuilder::new(resolver_with(packages), filter);
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();
    assert_eq!(registry_keys(&builder), vec!["app", "lib/a", "lib/testkit"]);
}

#[test]
fn tree_round_trips_registry_key_set() {
    let resolver = resolver_with(vec![
        raw("app", &["lib/a", "lib/b"]),
        raw("lib/a", &["lib/c"]),
        raw("lib/b", &[]),
        raw("lib/c", &[]),
    ]);
    let filter = FilterConfig::default();
    let mut builder = GraphBuilder::new(resolver, filter.clone());
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    let tree = PackageTree::from_registry(builder.registry(), &filter);
    let keys: Vec<String> = builder.registry().keys().cloned().collect();
    assert_eq!(tree.leaf_paths(), keys);
}

#[test]
fn concrete_scenario_builds_expected_tree() {
    let resolver = resolver_with(vec![
        raw("app", &["lib/a", "lib/b"]),
        raw("lib/a", &["lib/c"]),
        raw("lib/b", &[]),
        raw("lib/c", &[]),
    ]);
    let filter = FilterConfig::default();
    let mut builder = GraphBuilder::new(resolver, filter.clone());
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    let tree = PackageTree::from_registry(builder.registry(), &filter);

    let app = &tree.children["app"];
    assert_eq!(app.imports, vec!["lib/a", "lib/b"]);
    assert!(app.children.is_empty());

    let lib = &tree.children["lib"];
    assert!(lib.imports.is_empty());
    assert_eq!(lib.children["a"].imports, vec!["lib/c"]);
    assert!(lib.children["b"].imports.is_empty());
    assert!(lib.children["c"].imports.is_empty());
}

#[test]
fn dropped_imports_are_filtered_from_tree_lists() {
    // lib/a imports a package that failed to resolve; the tree must not
    // attribute it.
    let resolver = resolver_with(vec![raw("app", &["lib/a"]), raw("lib/a", &["gone"])]);
    let filter = FilterConfig::default();
    let mut builder = GraphBuilder::new(resolver, filter.clone());
    builder.resolve(&["app".into()], Path::new("/src"), false).unwrap();

    let tree = PackageTree::from_registry(builder.registry(), &filter);
    assert!(tree.children["lib"].children["a"].imports.is_empty());
}

#[test]
fn subtree_rejoin_reconstructs_original_imports() {
    let resolver = resolver_with(vec![
        raw("app", &["lib/a"]),
        raw("lib/a", &["lib/c"]),
        raw("lib/c", &[]),
    ]);
    let filter = FilterConfig::default();
    let mut builder = GraphBuilder::new(resolver, filter.clone());
    builder.resolve(&["app".into()], Path::new("/src"), true).unwrap();

    let tree = PackageTree::from_registry(builder.registry(), &filter);
    let lib = tree.get_child(&["lib"]).expect("lib subtree exists");

    // Re-joining the stripped prefix reconstructs the original path.
    assert_eq!(lib.children["a"].imports, vec!["c"]);
    assert_eq!(format!("lib/{}", lib.children["a"].imports[0]), "lib/c");
}
