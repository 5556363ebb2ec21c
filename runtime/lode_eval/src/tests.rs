use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use lode_ir::{SharedInterner, UnitName};
use lode_resolve::SearchPath;

fn write_unit(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn loader_for(roots: Vec<PathBuf>) -> (Loader, SharedInterner) {
    let interner = SharedInterner::new();
    let loader = Loader::with_printer(
        SearchPath::from_roots(roots),
        interner.clone(),
        PrintHandler::buffer(),
    );
    (loader, interner)
}

fn name(text: &str, interner: &SharedInterner) -> UnitName {
    UnitName::parse(text, interner).unwrap()
}

#[test]
fn test_resolve_executes_top_level_exactly_once() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "counter.lode", "print(\"side effect\")\nlet x = 1\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let counter = name("counter", &interner);

    let first = loader.resolve(&counter).unwrap();
    let second = loader.resolve(&counter).unwrap();
    let third = loader.resolve(&counter).unwrap();

    // Same namespace handle every time, side effect observed once.
    assert!(first.same(&second));
    assert!(second.same(&third));
    assert_eq!(loader.printer().output(), "side effect\n");
}

#[test]
fn test_entry_flag_true_only_for_entry_execution() {
    let dir = TempDir::new().unwrap();
    write_unit(
        dir.path(),
        "lib.lode",
        "if is_entry() {\n    print(\"lib is entry\")\n}\nlet marker = 1\n",
    );
    write_unit(
        dir.path(),
        "app.lode",
        "use lib\nif is_entry() {\n    print(\"app is entry\")\n}\n",
    );

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let app = name("app", &interner);
    let lib = name("lib", &interner);

    let status = loader.invoke_entry(&app).unwrap();
    assert_eq!(status, ExitStatus::SUCCESS);

    // Only the entry unit's gate fired.
    assert_eq!(loader.printer().output(), "app is entry\n");
    assert!(loader.cache().get(&app).unwrap().is_entry());
    assert!(!loader.cache().get(&lib).unwrap().is_entry());
}

#[test]
fn test_is_entry_is_lexical_to_the_defining_unit() {
    let dir = TempDir::new().unwrap();
    write_unit(
        dir.path(),
        "lib.lode",
        "fn report() {\n    if is_entry() {\n        print(\"entry\")\n    } else {\n        print(\"imported\")\n    }\n}\n",
    );
    write_unit(dir.path(), "app.lode", "use lib\nlib.report()\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    loader.invoke_entry(&name("app", &interner)).unwrap();

    // `report` lives in lib, which was imported, so its view of the flag is
    // false even though the call came from the entry unit.
    assert_eq!(loader.printer().output(), "imported\n");
}

#[test]
fn test_earlier_root_shadows_later_same_named_unit() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_unit(first.path(), "math.lode", "let winner = 1\n");
    write_unit(second.path(), "math.lode", "let loser = 1\n");

    let (mut loader, interner) = loader_for(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);

    let ns = loader.resolve(&name("math", &interner)).unwrap();
    assert!(ns.get(interner.intern("winner")).is_some());
    // Members unique to the shadowed unit are unreachable under the bare
    // name.
    assert!(ns.get(interner.intern("loser")).is_none());
}

#[test]
fn test_grouped_and_bare_units_are_independent() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "math.lode", "let flavor = \"bare\"\n");
    write_unit(dir.path(), "grouped/mod.lode", "");
    write_unit(dir.path(), "grouped/math.lode", "let flavor = \"grouped\"\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let bare = loader.resolve(&name("math", &interner)).unwrap();
    let grouped = loader.resolve(&name("grouped.math", &interner)).unwrap();

    assert!(!bare.same(&grouped));
    let flavor = interner.intern("flavor");
    match (bare.get(flavor).unwrap(), grouped.get(flavor).unwrap()) {
        (Value::Str(b), Value::Str(g)) => {
            assert_eq!(&*b, "bare");
            assert_eq!(&*g, "grouped");
        }
        other => panic!("expected strings, got {:?}", (other.0.type_name(), other.1.type_name())),
    }
}

#[test]
fn test_dotted_resolution_executes_ancestor_groups_once() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "grouped/mod.lode", "print(\"group loaded\")\n");
    write_unit(dir.path(), "grouped/math.lode", "let x = 1\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    loader.resolve(&name("grouped.math", &interner)).unwrap();

    // The group executed, and is cached under its own prefix name.
    assert_eq!(loader.printer().output(), "group loaded\n");
    assert!(loader.cache().contains(&name("grouped", &interner)));

    // A later resolution of the group is a cache hit.
    loader.resolve(&name("grouped", &interner)).unwrap();
    assert_eq!(loader.printer().output(), "group loaded\n");
}

#[test]
fn test_pleasantries_scenario() {
    let dir = TempDir::new().unwrap();
    write_unit(
        dir.path(),
        "pleasantries.lode",
        "fn greet(greeting = \"Hello\") {\n    print(greeting)\n}\n",
    );

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let ns = loader.resolve(&name("pleasantries", &interner)).unwrap();

    // Resolution itself printed nothing.
    assert_eq!(loader.printer().output(), "");

    let greet = ns.get(interner.intern("greet")).unwrap();
    loader
        .call(&greet, vec![Value::Str(Rc::from("Howdy"))])
        .unwrap();
    assert_eq!(loader.printer().output(), "Howdy\n");

    // Default applies when no argument is supplied.
    loader.printer().clear();
    loader.call(&greet, vec![]).unwrap();
    assert_eq!(loader.printer().output(), "Hello\n");
}

#[test]
fn test_unresolved_name_is_an_error_not_an_empty_namespace() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let (mut loader, interner) = loader_for(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]);

    let err = loader.resolve(&name("doesnotexist", &interner)).unwrap_err();
    match err.kind {
        EvalErrorKind::UnitNotFound { name, searched } => {
            assert_eq!(name, "doesnotexist");
            assert_eq!(searched.len(), 4);
        }
        other => panic!("expected UnitNotFound, got {other:?}"),
    }
}

#[test]
fn test_circular_import_sees_partial_namespace() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "a.lode", "let early = 1\nuse b\nlet late = 2\n");
    write_unit(dir.path(), "b.lode", "use a\nlet copied = a.early\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let a = loader.resolve(&name("a", &interner)).unwrap();

    // b executed mid-a and read the part of a that already existed.
    let b = loader.resolve(&name("b", &interner)).unwrap();
    assert!(matches!(b.get(interner.intern("copied")), Some(Value::Int(1))));
    // a finished executing after b's import of it.
    assert!(matches!(a.get(interner.intern("late")), Some(Value::Int(2))));
}

#[test]
fn test_circular_import_missing_member_fails_at_use_site() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "a.lode", "use b\nlet late = 2\n");
    write_unit(dir.path(), "b.lode", "use a\nlet copied = a.late\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let err = loader.resolve(&name("a", &interner)).unwrap_err();

    // The failure names the member that was not yet defined, not a cycle.
    match err.kind {
        EvalErrorKind::UndefinedMember { unit, member } => {
            assert_eq!(unit, "a");
            assert_eq!(member, "late");
        }
        other => panic!("expected UndefinedMember, got {other:?}"),
    }
}

#[test]
fn test_entry_unit_resolved_later_is_a_cache_hit() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "app.lode", "print(\"ran\")\n");
    write_unit(dir.path(), "other.lode", "use app\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    loader.invoke_entry(&name("app", &interner)).unwrap();
    loader.resolve(&name("other", &interner)).unwrap();

    // `other`'s import of the entry unit did not re-execute it.
    assert_eq!(loader.printer().output(), "ran\n");
}

#[test]
fn test_use_alias_binds_under_alias() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "grouped/mod.lode", "");
    write_unit(dir.path(), "grouped/math.lode", "fn add(a, b) {\n    return a + b\n}\n");
    write_unit(
        dir.path(),
        "app.lode",
        "use grouped.math as gm\nprint(gm.add(2, 3))\n",
    );

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    loader.invoke_entry(&name("app", &interner)).unwrap();
    assert_eq!(loader.printer().output(), "5\n");
}

#[test]
fn test_arithmetic_and_comparison() {
    let dir = TempDir::new().unwrap();
    write_unit(
        dir.path(),
        "calc.lode",
        "let a = 2 + 3 * 4\nif a == 14 {\n    print(\"yes\")\n}\nif a > 100 {\n    print(\"no\")\n}\n",
    );

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    loader.resolve(&name("calc", &interner)).unwrap();
    assert_eq!(loader.printer().output(), "yes\n");
}

#[test]
fn test_division_by_zero() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "boom.lode", "let x = 1 / 0\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let err = loader.resolve(&name("boom", &interner)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
}

#[test]
fn test_undefined_name() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "oops.lode", "print(nope)\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let err = loader.resolve(&name("oops", &interner)).unwrap_err();
    match err.kind {
        EvalErrorKind::UndefinedName { name } => assert_eq!(name, "nope"),
        other => panic!("expected UndefinedName, got {other:?}"),
    }
}

#[test]
fn test_arity_checking() {
    let dir = TempDir::new().unwrap();
    write_unit(
        dir.path(),
        "f.lode",
        "fn two(a, b) {\n    return a\n}\ntwo(1, 2, 3)\n",
    );

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let err = loader.resolve(&name("f", &interner)).unwrap_err();
    match err.kind {
        EvalErrorKind::ArityMismatch {
            expected, supplied, ..
        } => {
            assert_eq!(expected, 2);
            assert_eq!(supplied, 3);
        }
        other => panic!("expected ArityMismatch, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_surfaces_as_load_failure() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "broken.lode", "fn oops( {\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let err = loader.resolve(&name("broken", &interner)).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::LoadFailed { .. }));
}

#[test]
fn test_reset_allows_re_execution() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "counter.lode", "print(\"tick\")\n");

    let (mut loader, interner) = loader_for(vec![dir.path().to_path_buf()]);
    let counter = name("counter", &interner);

    loader.resolve(&counter).unwrap();
    loader.reset();
    loader.resolve(&counter).unwrap();

    assert_eq!(loader.printer().output(), "tick\ntick\n");
}
