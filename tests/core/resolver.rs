use symload::core::error::LoadError;
use symload::core::family::Family;
use symload::core::namespace::{Namespace, is_valid_name};

fn top() -> Namespace {
    Namespace::new("Top", "Plugins")
}

#[test]
fn valid_alphabet_never_fails() {
    let alphabet: Vec<char> = ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain(['_', '\\'])
        .collect();

    // Every window of the alphabet, in both directions, is a valid name.
    for len in 1..=alphabet.len() {
        for start in (0..alphabet.len()).step_by(7) {
            let forward: String = alphabet.iter().cycle().skip(start).take(len).collect();
            let backward: String = forward.chars().rev().collect();
            for name in [forward, backward] {
                assert!(is_valid_name(&name), "{:?}", name);
                assert!(top().resolve(&name).is_ok(), "{:?}", name);
            }
        }
    }
}

#[test]
fn any_foreign_character_fails() {
    for bad in ['.', '-', '/', ' ', ':', '$', '\n', '\t', 'é', '\0', '*'] {
        for name in [
            format!("{}Top\\Foo", bad),
            format!("Top\\{}Foo", bad),
            format!("Top\\Foo{}", bad),
        ] {
            match top().resolve(&name) {
                Err(LoadError::InvalidName(n)) => assert_eq!(n, name),
                other => panic!("{:?} should be invalid, got {:?}", name, other),
            }
        }
    }
}

#[test]
fn bare_top_name_maps_to_itself() {
    assert_eq!(top().resolve("Top").unwrap().as_str(), "Top");
}

#[test]
fn plugin_name_strips_both_prefixes() {
    assert_eq!(top().resolve("Top\\Plugins\\Foo\\Bar").unwrap().as_str(), "Foo/Bar");
}

#[test]
fn legacy_underscore_names() {
    assert_eq!(
        top().resolve("Legacy_Module_Name").unwrap().as_str(),
        "Legacy/Module/Name"
    );
    assert_eq!(top().resolve("Top_Plugins_Foo").unwrap().as_str(), "Foo");
}

#[test]
fn mixed_separators_collapse_to_one_layout() {
    let a = top().resolve("Top\\Db\\Adapter_Mysql").unwrap();
    let b = top().resolve("Top_Db_Adapter_Mysql").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "Db/Adapter/Mysql");
}

#[test]
fn custom_namespace_names() {
    let ns = Namespace::new("Acme", "Ext");
    assert_eq!(ns.resolve("Acme\\Ext\\Mail\\Sender").unwrap().as_str(), "Mail/Sender");
    assert_eq!(ns.resolve("Acme\\Plugins\\Mail").unwrap().as_str(), "Plugins/Mail");
    assert_eq!(ns.classify("Acme\\Ext\\Mail"), Family::Plugin);
    assert_eq!(ns.classify("Acme\\Plugins\\Mail"), Family::CoreNamespace);
}

#[test]
fn classification_covers_both_leading_forms() {
    let cases = [
        ("Top\\Plugins\\Live", Family::Plugin),
        ("\\Top\\Plugins\\Live", Family::Plugin),
        ("Top\\Common", Family::CoreNamespace),
        ("\\Top\\Common", Family::CoreNamespace),
        ("Top", Family::Foreign),
        ("Zend_Db", Family::Foreign),
        ("\\Zend\\Db", Family::Foreign),
    ];
    for (name, family) in cases {
        assert_eq!(top().classify(name), family, "{}", name);
    }
}

#[test]
fn classification_is_total_on_invalid_names() {
    // classify does not validate; the loader rejects these through resolve first
    assert_eq!(top().classify(""), Family::Foreign);
    assert_eq!(top().classify("Top\\Foo-Bar"), Family::CoreNamespace);
}
