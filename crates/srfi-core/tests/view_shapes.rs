//! JSON shapes of the boundary records.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use srfi_core::views::{ImplementationView, SpecificationView, SymbolView};
use srfi_core::{Implementation, Specification};

#[test]
fn specification_view_has_exactly_the_index_fields() {
    let spec = Specification::empty(0, "o".to_string(), "m".to_string());
    let value = serde_json::to_value(SpecificationView::from(&spec)).unwrap();
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "github_html_url",
            "implementations",
            "number",
            "official_html_url",
            "symbols",
            "title",
        ]
    );
}

#[test]
fn implementation_view_lists_numbers_ascending() {
    let implementation = Implementation {
        id: "guile".to_string(),
        title: "Guile".to_string(),
        homepage_url: "https://www.gnu.org/software/guile/".to_string(),
        specifications_supported: BTreeSet::from([69, 1, 13]),
    };
    let view = ImplementationView::from(&implementation);
    assert_eq!(view.srfi_implemented, vec![1, 13, 69]);

    let recovered: ImplementationView =
        serde_json::from_str(&serde_json::to_string(&view).unwrap()).unwrap();
    assert_eq!(recovered, view);
}

#[test]
fn symbol_view_parses_served_shape() {
    let raw = r#"{
        "name": "fold",
        "definitions": [
            { "defined_in": { "type": "srfi", "number": 1 }, "type": "procedure" }
        ]
    }"#;
    let view: SymbolView = serde_json::from_str(raw).unwrap();
    assert_eq!(view.name, "fold");
    assert_eq!(view.definitions[0].defined_in.number, 1);
    assert_eq!(view.definitions[0].kind, "procedure");
}
