// crates/cps-xml/src/builder.rs

//! Incremental construction of a [`Node`] tree from start/text/end events.
//!
//! When a start tag arrives the builder cannot know whether the element will
//! hold text (a [`Leaf`]) or nested elements (a [`Node`]). The tag is therefore
//! left pending on the enclosing node, with its attributes parked alongside,
//! and the next event decides:
//!
//! - character data resolves it to a leaf that takes over the parked
//!   attributes;
//! - a nested start tag resolves it to a child node that takes over the parked
//!   attributes and becomes the current context, after which the nested tag is
//!   handled against that child;
//! - an end tag with nothing in between resolves it to an empty leaf.
//!
//! Each open node keeps at most one pending field, so two unresolved tags can
//! never coexist on the same node: a second start tag always resolves the
//! first one as a container before being parked itself.

use crate::types::{Attributes, Leaf, Node, ROOT_NAME, Value};
use log::{debug, trace, warn};

/// Resolution state of the most recently opened field of a frame.
#[derive(Debug, Default)]
enum FieldState {
    /// No field is awaiting resolution.
    #[default]
    Unseen,
    /// The field's tag is open but its shape is still unknown.
    PendingAttributes { field: String, attributes: Attributes },
    /// The field has received text; more fragments extend it until it closes.
    Resolved { field: String, leaf: Leaf },
}

/// An open node together with its pending-field state.
#[derive(Debug)]
struct Frame {
    node: Node,
    state: FieldState,
    /// Elements opened on this node whose end tag has not arrived yet.
    open_fields: usize,
}

impl Frame {
    fn new(node: Node) -> Self {
        Self {
            node,
            state: FieldState::Unseen,
            open_fields: 0,
        }
    }

    fn park(&mut self, field: &str, attributes: Attributes) {
        trace!("[{}] {} in limbo, parking {:?}", self.node.name, field, attributes);
        self.state = FieldState::PendingAttributes {
            field: field.to_owned(),
            attributes,
        };
        self.open_fields += 1;
    }

    /// Stores whatever the pending field resolved to. A field that never saw
    /// text or children becomes an empty leaf carrying its attributes.
    fn commit(&mut self) {
        match core::mem::take(&mut self.state) {
            FieldState::Unseen => {}
            FieldState::PendingAttributes { field, attributes } => {
                trace!("[{}] {} closed empty", self.node.name, field);
                self.node.store(field, Leaf::with_attributes("", attributes));
            }
            FieldState::Resolved { field, leaf } => {
                trace!("[{}] {} = {:?}", self.node.name, field, leaf.text);
                self.node.store(field, leaf);
            }
        }
    }
}

/// Builds a [`Node`] tree from a stream of element events.
///
/// The builder performs no validation; it trusts the event source to deliver
/// balanced events for a well-formed document. Call [`ObjectBuilder::finish`]
/// once the document has been consumed to obtain the root node.
#[derive(Debug)]
pub struct ObjectBuilder {
    root: Frame,
    open: Vec<Frame>,
}

impl Default for ObjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::with_root_name(ROOT_NAME)
    }

    pub fn with_root_name(name: impl Into<String>) -> Self {
        Self {
            root: Frame::new(Node::new(name)),
            open: Vec::new(),
        }
    }

    fn top(&mut self) -> &mut Frame {
        match self.open.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        let pending: usize = self
            .open
            .iter()
            .chain(Some(&self.root))
            .map(|frame| frame.open_fields)
            .sum();
        self.open.len() + pending
    }

    /// Signals that element `tag` has started under the current element.
    pub fn open(&mut self, tag: &str, attributes: Attributes) {
        let frame = self.top();
        match core::mem::take(&mut frame.state) {
            FieldState::PendingAttributes {
                field,
                attributes: parked,
            } => {
                // A nested tag proves the pending field is a container. Its
                // open element now belongs to the new frame.
                frame.open_fields -= 1;
                trace!("[{}] moving {} out of limbo as a node", frame.node.name, field);
                let mut child = Frame::new(Node::with_attributes(field, parked));
                child.park(tag, attributes);
                self.open.push(child);
            }
            FieldState::Resolved { field, leaf } => {
                // Elements inside a text leaf land beside it on the same node.
                frame.node.store(field, leaf);
                frame.park(tag, attributes);
            }
            FieldState::Unseen => frame.park(tag, attributes),
        }
    }

    /// Signals character data for the current element. Whitespace-only
    /// content is ignored; other content is trimmed before being appended.
    pub fn text(&mut self, content: &str) {
        let fragment = content.trim();
        if fragment.is_empty() {
            return;
        }
        let frame = self.top();
        frame.state = match core::mem::take(&mut frame.state) {
            FieldState::PendingAttributes { field, attributes } => {
                trace!("[{}] moving {} to text", frame.node.name, field);
                FieldState::Resolved {
                    field,
                    leaf: Leaf::with_attributes(fragment, attributes),
                }
            }
            FieldState::Resolved { field, mut leaf } => {
                leaf.text.push_str(fragment);
                FieldState::Resolved { field, leaf }
            }
            FieldState::Unseen => {
                frame.node.text.push_str(fragment);
                FieldState::Unseen
            }
        };
    }

    /// Signals that the current element has ended.
    pub fn close(&mut self) {
        let frame = self.top();
        if frame.open_fields > 0 {
            frame.open_fields -= 1;
            frame.commit();
            return;
        }
        match self.open.pop() {
            Some(done) => self.attach(done),
            None => warn!("Ignoring end of element with no open element"),
        }
    }

    fn attach(&mut self, mut done: Frame) {
        done.commit();
        let node = done.node;
        trace!("[{}] closed with {} field(s)", node.name, node.fields.len());
        let parent = self.top();
        parent.node.store(node.name.clone(), Value::Node(node));
    }

    /// Completes construction and returns the root node.
    ///
    /// Frames still open (a truncated stream) are committed into their
    /// parents as they stand.
    pub fn finish(mut self) -> Node {
        let depth = self.depth();
        if depth > 0 {
            debug!("Finishing with {} element(s) still open", depth);
        }
        while let Some(frame) = self.open.pop() {
            self.attach(frame);
        }
        self.root.commit();
        self.root.node
    }
}
