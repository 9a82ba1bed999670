// crates/cps-xml/src/lib.rs

#![doc = "Builds schema-free object trees from control panel XML descriptions."]
#![doc = ""]
#![doc = "Every element becomes a field on its parent named after its tag. Fields"]
#![doc = "holding only text become leaves that keep their tag's attributes; fields"]
#![doc = "with nested elements become nodes. Repeated sibling tags promote a field"]
#![doc = "to an ordered sequence."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_from_str` / `load_from_reader` / `load_from_path`: Building a tree from XML."]
#![doc = "- `ObjectBuilder`: Building a tree from any source of start/text/end events."]
#![doc = "- `Node::find_field`: Collecting a field's values at any depth."]

// --- Crate Modules ---

mod builder;
mod dump;
mod error;
mod parser;
mod types;

// --- Public API Re-exports ---

pub use builder::ObjectBuilder;
pub use dump::dump_to;
pub use error::CpsXmlError;
pub use parser::{
    LoadOptions, load_from_path, load_from_path_with_options, load_from_reader,
    load_from_reader_with_options, load_from_str, load_from_str_with_options,
};
pub use types::{Attributes, FieldValue, Leaf, Node, ROOT_NAME, Value};
