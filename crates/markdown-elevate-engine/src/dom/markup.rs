//! Markup parsing and serialisation for [`Document`].
//!
//! Both directions go through `html5ever`: fragments are parsed as the
//! content of a `<body>` element by the HTML5 tree builder, so malformed
//! input is repaired the way a browser repairs it, and nodes are written
//! back with the HTML5 serialiser. The `markup5ever_rcdom` tree is only a
//! staging area; [`Document`] keeps its own arena.

use super::{Attribute, Document, NodeId, NodeKind, ROOT_TAG};
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The non-breaking space character.
pub const NBSP: char = '\u{a0}';

/// The one named character reference decoded ahead of generic decoding.
pub const NBSP_ENTITY: &str = "&nbsp;";

/// Encodes text for inclusion in markup: `&`, `<`, `>` and non-breaking spaces.
///
/// Matches what the serialiser writes for text nodes.
pub fn encode_text(text: &str) -> String {
    let encoded = html_escape::encode_text(text);
    if encoded.contains(NBSP) {
        encoded.replace(NBSP, NBSP_ENTITY)
    } else {
        encoded.into_owned()
    }
}

/// Decodes character references, `&nbsp;` first.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let normalized = text.replace(NBSP_ENTITY, "\u{a0}");
    html_escape::decode_html_entities(&normalized).into_owned()
}

/// Parses `markup` in body context and returns the body element's handle.
fn parse_body(markup: &str) -> Option<Handle> {
    let dom = html5ever::parse_document(RcDom::default(), Default::default())
        .one(format!("<{ROOT_TAG}>{markup}"));
    let html = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|h| is_element_named(h, "html"))
        .cloned()?;
    html.children
        .borrow()
        .iter()
        .find(|h| is_element_named(h, ROOT_TAG))
        .cloned()
}

fn is_element_named(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if &*name.local == tag)
}

fn qualified_attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

fn element_handle(tag: &str, attributes: &[Attribute]) -> Handle {
    let attrs = attributes
        .iter()
        .map(|a| html5ever::Attribute {
            name: QualName::new(None, ns!(), LocalName::from(a.name.as_str())),
            value: a.value.clone().into(),
        })
        .collect();
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(attrs),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn leaf_handle(data: NodeData) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data,
    })
}

fn write_handle(handle: Handle, scope: TraversalScope) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };
    if let Err(err) = html5ever::serialize(&mut output, &SerializableHandle::from(handle), opts) {
        log::warn!("Markup serialisation stopped early: {err}");
    }
    String::from_utf8_lossy(&output).into_owned()
}

impl Document {
    /// Parses `markup` into new detached nodes and returns the top-level ones.
    ///
    /// Never fails: stray `<` is text, unmatched end tags are dropped,
    /// unterminated comments run to the end and open elements close there.
    pub fn parse_fragment(&mut self, markup: &str) -> Vec<NodeId> {
        let Some(body) = parse_body(markup) else {
            log::warn!("Parser produced no body for {markup:?}");
            return Vec::new();
        };
        let children = body.children.borrow();
        children
            .iter()
            .filter_map(|child| self.import(child))
            .collect()
    }

    /// Copies a parsed node and its subtree into the arena.
    fn import(&mut self, handle: &Handle) -> Option<NodeId> {
        let id = match &handle.data {
            NodeData::Text { contents } => self.create_text(contents.borrow().to_string()),
            NodeData::Comment { contents } => self.create_comment(contents.to_string()),
            NodeData::Element { name, attrs, .. } => {
                let id = self.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    self.set_attribute(id, &qualified_attribute_name(&attr.name), &attr.value);
                }
                for child in handle.children.borrow().iter() {
                    if let Some(child) = self.import(child) {
                        self.append_child(id, child);
                    }
                }
                id
            }
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => return None,
        };
        Some(id)
    }

    /// Replaces the children of `id` with the parsed `markup`.
    pub fn set_inner_markup(&mut self, id: NodeId, markup: &str) {
        self.clear_children(id);
        for child in self.parse_fragment(markup) {
            self.append_child(id, child);
        }
    }

    /// Serialised children of `id`.
    pub fn inner_markup(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Element { tag, .. } => {
                let name = QualName::new(None, ns!(html), LocalName::from(tag.as_str()));
                write_handle(self.export(id), TraversalScope::ChildrenOnly(Some(name)))
            }
            _ => String::new(),
        }
    }

    /// Serialised `id` including its own tag.
    pub fn outer_markup(&self, id: NodeId) -> String {
        write_handle(self.export(id), TraversalScope::IncludeNode)
    }

    /// Builds a serialisable copy of `id` and its subtree.
    fn export(&self, id: NodeId) -> Handle {
        match self.kind(id) {
            NodeKind::Text(text) => leaf_handle(NodeData::Text {
                contents: RefCell::new(text.as_str().into()),
            }),
            NodeKind::Comment(text) => leaf_handle(NodeData::Comment {
                contents: text.as_str().into(),
            }),
            NodeKind::Element { tag, attributes } => {
                let handle = element_handle(tag, attributes);
                handle
                    .children
                    .borrow_mut()
                    .extend(self.children(id).iter().map(|&child| self.export(child)));
                handle
            }
        }
    }
}
