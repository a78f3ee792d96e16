use std::collections::HashSet;

use super::Languages;

#[test]
fn it_resolves_every_name_and_alias() {
    for lang in Languages::list() {
        let res = Languages::resolve(lang.name);
        assert_eq!(res.map(|e| return e.name), Some(lang.name));

        for alias in lang.aliases {
            let res = Languages::resolve(alias);
            assert_eq!(res.map(|e| return e.name), Some(lang.name), "alias {alias}");
        }
    }
}

#[test]
fn it_rejects_unknown_identifiers() {
    for identifier in ["", " ", "cobol", "pyth", "javascript2", "/py", "python 3"] {
        assert!(
            Languages::resolve(identifier).is_none(),
            "{identifier} should not resolve"
        );
    }
}

#[test]
fn it_resolves_ignoring_case_and_whitespace() {
    let res = Languages::resolve("  PY ").unwrap();
    assert_eq!(res.name, "python");
    assert_eq!(res.runtime, "python");
    assert_eq!(res.version, "3.10.0");
}

#[test]
fn it_maps_cpp_to_the_service_runtime() {
    let res = Languages::resolve("c++").unwrap();
    assert_eq!(res.name, "cpp");
    assert_eq!(res.runtime, "c++");
    assert_eq!(res.file_name(), "main.cpp");
}

#[test]
fn it_has_no_ambiguous_identifiers() {
    let mut seen = HashSet::new();
    for lang in Languages::list() {
        assert!(seen.insert(lang.name), "duplicate {}", lang.name);
        for alias in lang.aliases {
            assert!(seen.insert(*alias), "duplicate {alias}");
        }
    }
}

#[test]
fn it_resolves_from_extension() {
    assert_eq!(Languages::from_extension(".rs").unwrap().name, "rust");
    assert_eq!(Languages::from_extension("PY").unwrap().name, "python");
    assert!(Languages::from_extension("txt").is_none());
}
