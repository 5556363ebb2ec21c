use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use lode_ir::{Interner, UnitName};

fn write_unit(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn test_resolve_file_unit() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "pleasantries.lode", "fn greet() {}\n");

    let interner = Interner::new();
    let name = UnitName::parse("pleasantries", &interner).unwrap();
    let path = SearchPath::from_roots(vec![dir.path().to_path_buf()]);

    let resolved = path.resolve(&name, &interner).unwrap();
    assert_eq!(resolved.kind, UnitKind::File);
    assert_eq!(resolved.path, dir.path().join("pleasantries.lode"));
    assert!(resolved.package.is_none());
}

#[test]
fn test_resolve_group_unit() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "grouped/mod.lode", "");

    let interner = Interner::new();
    let name = UnitName::parse("grouped", &interner).unwrap();
    let path = SearchPath::from_roots(vec![dir.path().to_path_buf()]);

    let resolved = path.resolve(&name, &interner).unwrap();
    assert_eq!(resolved.kind, UnitKind::Group);
    assert_eq!(resolved.path, dir.path().join("grouped").join("mod.lode"));
    // A group is its own package.
    assert_eq!(resolved.package, Some(name));
}

#[test]
fn test_resolve_dotted_name_inside_group() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "grouped/mod.lode", "");
    write_unit(dir.path(), "grouped/math.lode", "fn add(a, b) {\n    return a + b\n}\n");

    let interner = Interner::new();
    let name = UnitName::parse("grouped.math", &interner).unwrap();
    let path = SearchPath::from_roots(vec![dir.path().to_path_buf()]);

    let resolved = path.resolve(&name, &interner).unwrap();
    assert_eq!(resolved.path, dir.path().join("grouped").join("math.lode"));
    assert_eq!(
        resolved.package,
        Some(UnitName::parse("grouped", &interner).unwrap())
    );
}

#[test]
fn test_file_unit_beats_group_unit_in_same_root() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "math.lode", "");
    write_unit(dir.path(), "math/mod.lode", "");

    let interner = Interner::new();
    let name = UnitName::parse("math", &interner).unwrap();
    let path = SearchPath::from_roots(vec![dir.path().to_path_buf()]);

    let resolved = path.resolve(&name, &interner).unwrap();
    assert_eq!(resolved.kind, UnitKind::File);
}

#[test]
fn test_earlier_root_wins() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_unit(first.path(), "math.lode", "let winner = 1\n");
    write_unit(second.path(), "math.lode", "let loser = 1\n");

    let interner = Interner::new();
    let name = UnitName::parse("math", &interner).unwrap();
    let path = SearchPath::from_roots(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);

    let resolved = path.resolve(&name, &interner).unwrap();
    assert_eq!(resolved.path, first.path().join("math.lode"));

    // Both matches are visible through the explicit surface.
    let found = path.matches(&name, &interner);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].path, first.path().join("math.lode"));
    assert_eq!(found[1].path, second.path().join("math.lode"));
}

#[test]
fn test_prepend_root_takes_priority() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_unit(first.path(), "math.lode", "");
    write_unit(second.path(), "math.lode", "");

    let interner = Interner::new();
    let name = UnitName::parse("math", &interner).unwrap();
    let mut path = SearchPath::from_roots(vec![first.path().to_path_buf()]);
    path.prepend_root(second.path());

    let resolved = path.resolve(&name, &interner).unwrap();
    assert_eq!(resolved.path, second.path().join("math.lode"));
}

#[test]
fn test_not_found_lists_all_probed_paths() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let interner = Interner::new();
    let name = UnitName::parse("doesnotexist", &interner).unwrap();
    let path = SearchPath::from_roots(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);

    let err = path.resolve(&name, &interner).unwrap_err();
    assert_eq!(err.name, "doesnotexist");
    // Two candidates per root: file unit and group marker.
    assert_eq!(err.searched.len(), 4);
    assert!(err.to_string().contains("doesnotexist"));
}

#[test]
fn test_empty_search_path_resolves_nothing() {
    let interner = Interner::new();
    let name = UnitName::parse("anything", &interner).unwrap();
    let path = SearchPath::new();
    assert!(path.resolve(&name, &interner).is_err());
}
