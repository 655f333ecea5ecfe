//! Fixture-driven props rewriting tests.
//!
//! Cases live in `tests/fixtures/props.toml` and run in both build modes.

use moulage::{transform_macros, BuildMode, MacroOptions};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixtures {
    case: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    props: String,
    development: String,
    production: String,
}

fn load() -> Fixtures {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/props.toml");
    let content = std::fs::read_to_string(path).expect("read props fixtures");
    toml::from_str(&content).expect("parse props fixtures")
}

fn transform_props(props: &str, mode: BuildMode) -> String {
    let source = format!(
        "import {{ component, type }} from 'vue-jsx-component.macro';\nexport default component({{ props: {props} }});"
    );
    transform_macros(&source, &MacroOptions::new(mode))
        .expect("transform fixture")
        .code
}

#[test]
fn props_fixtures() {
    let fixtures = load();
    assert!(!fixtures.case.is_empty());

    let mut failures = Vec::new();
    for case in &fixtures.case {
        for (mode, expected) in [
            (BuildMode::Development, &case.development),
            (BuildMode::Production, &case.production),
        ] {
            let actual = transform_props(&case.props, mode);
            let expected = format!("export default {{ props: {expected} }};");
            if actual != expected {
                failures.push(format!(
                    "[{} / {:?}]\n  expected: {}\n  actual:   {}",
                    case.name, mode, expected, actual
                ));
            }
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}
