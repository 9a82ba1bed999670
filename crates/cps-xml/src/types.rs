// crates/cps-xml/src/types.rs

//! Public data structures for an object tree built from an XML document.
//!
//! A tree has no schema: every element becomes either a [`Leaf`] (text plus
//! attributes) or a [`Node`] (attributes plus named child fields), depending
//! only on what followed its start tag. A field holds one value until a second
//! sibling with the same tag appears, after which it holds an ordered
//! sequence. Read sites should therefore go through [`FieldValue::as_list`] or
//! [`Node::list`] whenever a field may repeat.

use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute name to value, as written on one XML tag.
pub type Attributes = BTreeMap<String, String>;

/// Name given to the synthetic node that owns the whole tree.
pub const ROOT_NAME: &str = "magic root";

// --- Values ---

/// A scalar field value: accumulated character data carrying the attributes
/// of the tag it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub text: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(text: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// One element of the tree: either a leaf or a nested node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Leaf(Leaf),
    Node(Node),
}

impl Value {
    /// The text of a leaf, or the mixed-content text of a node.
    pub fn text(&self) -> &str {
        match self {
            Value::Leaf(leaf) => &leaf.text,
            Value::Node(node) => &node.text,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Value::Leaf(leaf) => &leaf.attributes,
            Value::Node(node) => &node.attributes,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            Value::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Value::Leaf(leaf) => Some(leaf),
            Value::Node(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }
}

impl From<Leaf> for Value {
    fn from(leaf: Leaf) -> Self {
        Value::Leaf(leaf)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

/// The content of a field: a single value until a second occurrence of the
/// same tag promotes it to a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(Value),
    Many(Vec<Value>),
}

impl FieldValue {
    /// Normalizes the field to a slice of one or more values.
    pub fn as_list(&self) -> &[Value] {
        match self {
            FieldValue::Single(value) => core::slice::from_ref(value),
            FieldValue::Many(values) => values,
        }
    }

    pub fn first(&self) -> Option<&Value> {
        self.as_list().first()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.as_list().iter()
    }

    pub fn len(&self) -> usize {
        self.as_list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_list().is_empty()
    }

    pub fn is_many(&self) -> bool {
        matches!(self, FieldValue::Many(_))
    }

    /// Appends `value`, promoting a single value to a two-element sequence.
    fn push(self, value: Value) -> Self {
        match self {
            FieldValue::Single(first) => FieldValue::Many(vec![first, value]),
            FieldValue::Many(mut values) => {
                values.push(value);
                FieldValue::Many(values)
            }
        }
    }
}

impl<'a> IntoIterator for &'a FieldValue {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Nodes ---

/// A container element whose fields mirror the tags of its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// The tag that produced this node. Not unique across the tree.
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    /// Child fields keyed by tag name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldValue>,
    /// Non-blank character data seen while no child field was pending.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            ..Default::default()
        }
    }

    /// Stores `value` under `field`, promoting the field to a sequence if it
    /// already holds a value.
    pub(crate) fn store(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        let stored = match self.fields.remove(&field) {
            None => FieldValue::Single(value),
            Some(existing) => existing.push(value),
        };
        self.fields.insert(field, stored);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// List coercion of an optional field: an empty slice when the field is
    /// absent, otherwise every stored value in first-seen order.
    pub fn list(&self, field: &str) -> &[Value] {
        self.fields.get(field).map(FieldValue::as_list).unwrap_or_default()
    }

    pub fn first(&self, field: &str) -> Option<&Value> {
        self.list(field).first()
    }

    /// Text of the first value stored under `field`.
    pub fn text_of(&self, field: &str) -> Option<&str> {
        self.first(field).map(Value::text)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Every stored value of every field, sequences flattened.
    pub fn kids(&self) -> impl Iterator<Item = &Value> {
        self.fields.values().flat_map(FieldValue::iter)
    }

    /// Collects every value stored under `field` anywhere in this subtree.
    ///
    /// Values stored on this node come first, followed by the matches found
    /// inside each child node in field order. Matched nodes are searched as
    /// well, so a field nested inside a field of the same name is found.
    pub fn find_field(&self, field: &str) -> Vec<&Value> {
        let mut found = Vec::new();
        self.collect_field(field, &mut found);
        found
    }

    fn collect_field<'a>(&'a self, field: &str, found: &mut Vec<&'a Value>) {
        found.extend(self.list(field));
        for child in self.kids().filter_map(Value::as_node) {
            child.collect_field(field, found);
        }
    }
}
