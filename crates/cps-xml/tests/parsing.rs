// crates/cps-xml/tests/parsing.rs

use cps_xml::{FieldValue, Leaf, Node, ROOT_NAME, Value, load_from_path, load_from_str};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

/// Helper function to resolve a test file in the `tests/data/` directory.
fn test_file(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

fn node<'a>(value: Option<&'a Value>) -> &'a Node {
    value
        .and_then(Value::as_node)
        .unwrap_or_else(|| panic!("expected a node, got {:?}", value))
}

/// `<a><b x="1">hello</b><b x="2">world</b></a>`
#[test]
fn test_repeated_leaves_keep_order_and_attributes() {
    let root = load_from_str(r#"<a><b x="1">hello</b><b x="2">world</b></a>"#).unwrap();
    assert_eq!(root.name, ROOT_NAME);

    let a = node(root.first("a"));
    let b = a.get("b").expect("field b");
    assert!(b.is_many());
    assert_eq!(b.len(), 2);

    let items = b.as_list();
    assert_eq!(items[0].text(), "hello");
    assert_eq!(items[0].attr("x"), Some("1"));
    assert_eq!(items[1].text(), "world");
    assert_eq!(items[1].attr("x"), Some("2"));
}

/// The same tag resolves to a leaf or a node depending on what follows it.
#[test]
fn test_same_tag_resolves_by_content() {
    let scalar = load_from_str("<a><b>text</b></a>").unwrap();
    let a = node(scalar.first("a"));
    let leaf = a.first("b").and_then(Value::as_leaf).expect("b should be a leaf");
    assert_eq!(leaf.text, "text");
    assert!(leaf.attributes.is_empty());
    assert_eq!(
        a.get("b"),
        Some(&FieldValue::Single(Value::Leaf(Leaf::new("text"))))
    );

    let nested = load_from_str("<a><b><c>text</c></b></a>").unwrap();
    let a = node(nested.first("a"));
    assert!(a.first("b").and_then(Value::as_leaf).is_none());
    let b = node(a.first("b"));
    assert_eq!(b.name, "b");
    assert_eq!(
        b.get("c"),
        Some(&FieldValue::Single(Value::Leaf(Leaf::new("text"))))
    );
}

/// A single child is stored directly; a second one promotes the field.
#[test]
fn test_promotion_on_second_sibling() {
    let one = load_from_str("<a><item>1</item></a>").unwrap();
    let a = node(one.first("a"));
    assert!(matches!(a.get("item"), Some(FieldValue::Single(Value::Leaf(_)))));

    let two = load_from_str("<a><item>1</item><item>2</item></a>").unwrap();
    let a2 = node(two.first("a"));
    let items = a2.list("item");
    assert_eq!(items.len(), 2);
    assert_eq!(&items[0], a.first("item").unwrap());
}

/// Siblings of one tag separated by other tags still collect in document order.
#[test]
fn test_interleaved_siblings_preserve_order() {
    let root = load_from_str("<a><x>1</x><y>a</y><x>2</x><y>b</y><x>3</x></a>").unwrap();
    let a = node(root.first("a"));
    let xs: Vec<&str> = a.list("x").iter().map(Value::text).collect();
    let ys: Vec<&str> = a.list("y").iter().map(Value::text).collect();
    assert_eq!(xs, vec!["1", "2", "3"]);
    assert_eq!(ys, vec!["a", "b"]);
}

/// Attributes on a container tag belong to the child node, not its parent.
#[test]
fn test_container_attributes_attach_to_child() {
    let xml = r#"<device>
        <controlPanel languageSet="myLanguages"><name>cp</name></controlPanel>
    </device>"#;
    let root = load_from_str(xml).unwrap();
    let device = node(root.first("device"));
    assert!(device.attributes.is_empty());
    let panel = node(device.first("controlPanel"));
    assert_eq!(panel.attr("languageSet"), Some("myLanguages"));
    assert_eq!(panel.text_of("name"), Some("cp"));
    assert!(panel.first("name").unwrap().attributes().is_empty());
}

#[test]
fn test_control_panel_document() {
    let root = load_from_path(test_file("ac_control_panel.xml")).expect("Failed to load fixture");
    let device = node(root.first("controlPanelDevice"));

    assert_eq!(
        device.attr("xmlns"),
        Some("http://www.allseenalliance.org/controlpanel/gen")
    );
    assert_eq!(device.text_of("name"), Some("MyDevice"));
    assert_eq!(
        device.text_of("headerCode"),
        Some("#include \"ControlPanelProvided.h\"")
    );

    // A single languageSet stays a node; its languages become a sequence.
    let language_set = node(device.first("languageSet"));
    assert_eq!(language_set.attr("name"), Some("myLanguages"));
    let languages: Vec<&str> = language_set.list("language").iter().map(Value::text).collect();
    assert_eq!(languages, vec!["en", "de-AT"]);

    let panels = node(device.first("controlPanels"));
    let panel = node(panels.first("controlPanel"));
    assert_eq!(panel.attr("languageSet"), Some("myLanguages"));

    let root_container = node(panel.first("rootContainer"));
    assert_eq!(root_container.text_of("name"), Some("rootContainer"));
    assert_eq!(root_container.text_of("bgcolor"), Some("0x200"));

    let labels = node(root_container.first("label")).list("value");
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[1].attr("language"), Some("de-AT"));
    assert_eq!(labels[1].attr("type"), Some("literal"));
    assert_eq!(labels[1].text(), "Container Etikett");

    let elements = node(root_container.first("elements"));
    let property = node(elements.first("scalarProperty"));
    assert_eq!(property.attr("dataType"), Some("UINT16"));

    let enabled = property.first("enabled").unwrap();
    assert_eq!(enabled.text(), "isHeatEnabled()");
    assert_eq!(enabled.attr("code"), Some("true"));

    // `value` is a leaf under `constraint` and a sequence under `display`.
    let constraint_vals = node(node(property.first("constraintDefs")).first("constraintVals"));
    let constraints = constraint_vals.list("constraint");
    assert_eq!(constraints.len(), 2);
    let hot = node(constraints.get(1));
    assert_eq!(hot.text_of("value"), Some("200"));
    assert_eq!(node(hot.first("display")).list("value").len(), 2);

    let action = node(elements.first("action"));
    let on_action = node(action.first("onAction"));
    assert_eq!(on_action.text_of("executeCode"), Some("startOven();"));

    let dialog = node(node(device.first("notificationActions")).first("dialog"));
    assert_eq!(dialog.attr("languageSet"), Some("myLanguages"));
    assert_eq!(dialog.text_of("name"), Some("areYouSure"));
}

/// Collects cross-cutting fields such as every `hint` under a property.
#[test]
fn test_find_field_in_control_panel() {
    let root = load_from_path(test_file("ac_control_panel.xml")).unwrap();

    let hints: Vec<&str> = root.find_field("hint").iter().map(|v| v.text()).collect();
    assert_eq!(hints.len(), 6);
    for expected in [
        "vertical_linear",
        "horizontal_linear",
        "spinner",
        "actionButton",
        "checkbox",
    ] {
        assert!(hints.contains(&expected), "missing hint {}", expected);
    }

    let properties = root.find_field("scalarProperty");
    assert_eq!(properties.len(), 1);
    let property = properties[0].as_node().unwrap();
    let property_hints: Vec<&str> = property
        .find_field("hint")
        .iter()
        .map(|v| v.text())
        .collect();
    assert_eq!(property_hints, vec!["spinner"]);
    assert_eq!(property.find_field("constraint").len(), 2);
    assert!(property.find_field("constraintRange").is_empty());

    // Every `name` field, at every depth, exactly once.
    let names: Vec<&str> = root.find_field("name").iter().map(|v| v.text()).collect();
    assert_eq!(names.len(), 7);
    assert!(names.contains(&"lightOn"));
    assert!(names.contains(&"areYouSure"));
}

#[test]
fn test_tree_serializes_to_json() {
    let root = load_from_str(r#"<a><b x="1">hello</b><b>world</b><c><d>e</d></c></a>"#).unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": ROOT_NAME,
            "fields": {
                "a": {
                    "name": "a",
                    "fields": {
                        "b": [
                            { "text": "hello", "attributes": { "x": "1" } },
                            { "text": "world" }
                        ],
                        "c": {
                            "name": "c",
                            "fields": { "d": { "text": "e" } }
                        }
                    }
                }
            }
        })
    );
}
