// crates/cps-xml/src/dump.rs

//! Indented, line-oriented rendering of an object tree for debugging.
//!
//! Each nesting level adds one space of indentation. For every node the
//! output lists its own attributes, then its leaf fields, then its node
//! fields, then its sequence fields:
//!
//! ```text
//! controlPanelDevice
//!  name=MyDevice
//!  languageSet
//!   languageSet.name=myLanguages
//!   language[0]=en
//!   language[1]=de_AT
//! ```

use crate::types::{FieldValue, Leaf, Node, Value};
use core::fmt::{self, Write};

/// Writes the dump of `node` into `out`, starting at `indent` spaces.
pub fn dump_to<W: Write>(node: &Node, out: &mut W, indent: usize) -> fmt::Result {
    let tab = " ".repeat(indent);
    for (key, value) in &node.attributes {
        writeln!(out, "{}{}.{}={}", tab, node.name, key, value)?;
    }
    if !node.text.is_empty() {
        writeln!(out, "{}#text={}", tab, node.text)?;
    }

    for (field, value) in node.fields() {
        if let FieldValue::Single(Value::Leaf(leaf)) = value {
            dump_leaf(out, &tab, field, leaf)?;
        }
    }
    for (field, value) in node.fields() {
        if let FieldValue::Single(Value::Node(child)) = value {
            writeln!(out, "{}{}", tab, field)?;
            dump_to(child, out, indent + 1)?;
        }
    }
    for (field, value) in node.fields() {
        if let FieldValue::Many(entries) = value {
            for (counter, entry) in entries.iter().enumerate() {
                match entry {
                    Value::Leaf(leaf) => {
                        dump_leaf(out, &tab, &format!("{}[{}]", field, counter), leaf)?
                    }
                    Value::Node(child) => {
                        writeln!(out, "{}{}", tab, field)?;
                        dump_to(child, out, indent + 1)?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn dump_leaf<W: Write>(out: &mut W, tab: &str, field: &str, leaf: &Leaf) -> fmt::Result {
    writeln!(out, "{}{}={}", tab, field, leaf.text)?;
    for (key, value) in &leaf.attributes {
        writeln!(out, " {}{}.{}={}", tab, field, key, value)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump_to(self, f, 0)
    }
}
