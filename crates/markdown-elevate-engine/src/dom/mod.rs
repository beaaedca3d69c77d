//! # Tree Node Model
//!
//! A small mutable document tree standing in for the host editor's live DOM.
//!
//! ## Storage
//!
//! Nodes live in a [`SlotMap`] owned by [`Document`] and are addressed by
//! copyable [`NodeId`]s. Detaching a node keeps it alive, so ids held by the
//! host (cursor anchors, listeners, UI handles) stay valid across
//! transformations. Object identity of a node *is* the identity of its id.
//! Only [`Document::remove`] frees a subtree; its slots are reused with a new
//! generation, so a stale id never aliases a later node.
//!
//! ## Key Invariants
//!
//! - Every attached node has exactly one parent; the root has none
//! - A node is never inserted into its own subtree
//! - Tag names are stored ASCII-lowercase
//!
//! Accessors index the arena directly and panic on an id this document does
//! not hold; check [`Document::contains`] first when an id may be foreign or
//! removed.
//!
//! Markup parsing and serialisation live in [`markup`].

pub mod markup;

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node inside a [`Document`].
    pub struct NodeId;
}

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// What a node is, independent of where it sits in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A named element with ordered attributes.
    Element {
        tag: String,
        attributes: Vec<Attribute>,
    },
    /// Decoded character data.
    Text(String),
    /// Comment body, without the `<!--`/`-->` delimiters.
    Comment(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Tag of the element every [`Document`] is rooted at.
pub const ROOT_TAG: &str = "body";

/// An ordered tree of element, text and comment nodes.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
}

impl Document {
    /// Creates an empty document rooted at a [`ROOT_TAG`] element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: SlotMap::with_key(),
            root: NodeId::default(),
        };
        doc.root = doc.create_element(ROOT_TAG);
        doc
    }

    /// Creates a document whose root holds the parsed `markup`.
    pub fn parse(markup: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root;
        doc.set_inner_markup(root, markup);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` names a live node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        })
    }

    // Creation

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Creates a detached text node holding already-decoded characters.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    /// Creates a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    // Node data

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element { .. })
    }

    /// Tag name of an element, `None` for text and comments.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Case-insensitive tag comparison; always false for non-elements.
    pub fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Renames an element in place. Returns false for non-elements.
    pub fn set_tag(&mut self, id: NodeId, new_tag: &str) -> bool {
        match &mut self.nodes[id].kind {
            NodeKind::Element { tag, .. } => {
                *tag = new_tag.to_ascii_lowercase();
                true
            }
            _ => false,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match self.kind(id) {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Sets or overwrites an attribute. Returns false for non-elements.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let NodeKind::Element { attributes, .. } = &mut self.nodes[id].kind else {
            return false;
        };
        match attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.value = value.to_string(),
            None => attributes.push(Attribute::new(name.to_ascii_lowercase(), value)),
        }
        true
    }

    /// Concatenated text of all descendant text nodes, in document order.
    ///
    /// Comments inside elements do not contribute.
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Text(t) | NodeKind::Comment(t) => t.clone(),
            NodeKind::Element { .. } => {
                let mut out = String::new();
                self.collect_text(id, &mut out);
                out
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match self.kind(child) {
                NodeKind::Text(t) => out.push_str(t),
                NodeKind::Element { .. } => self.collect_text(child, out),
                NodeKind::Comment(_) => {}
            }
        }
    }

    /// Replaces an element's children with a single text node, or overwrites
    /// the data of a text/comment node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let NodeKind::Text(t) | NodeKind::Comment(t) = &mut self.nodes[id].kind {
            *t = text.to_string();
            return;
        }
        self.clear_children(id);
        if !text.is_empty() {
            let t = self.create_text(text);
            self.append_child(id, t);
        }
    }

    // Navigation

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        idx.checked_sub(1).map(|i| self.children(parent)[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    /// True when `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    // Mutation

    /// Removes a node from its parent. The node and its subtree stay usable.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    /// Detaches `id` and frees it together with its whole subtree.
    ///
    /// Returns false, changing nothing, for the root or an id that is not
    /// live. Ids of freed nodes stop being [`contains`](Self::contains)-ed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(data) = self.nodes.remove(next) {
                pending.extend(data.children);
            }
        }
        true
    }

    /// Appends `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` into `parent` before `reference` (or last when `None`).
    ///
    /// Refuses (returning false, tree untouched) when `parent` is not an
    /// element, when `reference` is not a child of `parent`, or when the
    /// insertion would put `child` inside its own subtree.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> bool {
        if !self.is_element(parent) || self.is_ancestor_of(child, parent) {
            return false;
        }
        if let Some(r) = reference {
            if r == child {
                return self.parent(child) == Some(parent);
            }
            if self.parent(r) != Some(parent) {
                return false;
            }
        }

        self.detach(child);
        let idx = match reference {
            Some(r) => self
                .children(parent)
                .iter()
                .position(|&c| c == r)
                .unwrap_or(self.children(parent).len()),
            None => self.children(parent).len(),
        };
        self.nodes[parent].children.insert(idx, child);
        self.nodes[child].parent = Some(parent);
        true
    }

    /// Puts `new` where `old` is and detaches `old`.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        if old == new {
            return true;
        }
        let Some(parent) = self.parent(old) else {
            return false;
        };
        if !self.insert_before(parent, new, Some(old)) {
            return false;
        }
        self.detach(old);
        true
    }

    /// Detaches every child of `id`, returning them in their former order.
    pub fn clear_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id].children);
        for &c in &children {
            self.nodes[c].parent = None;
        }
        children
    }

    /// Moves all children of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        if from == to || self.is_ancestor_of(from, to) {
            return;
        }
        for child in self.clear_children(from) {
            self.append_child(to, child);
        }
    }

    /// Puts `wrapper` at `node`'s position, then moves `node` inside it.
    pub fn wrap(&mut self, node: NodeId, wrapper: NodeId) -> bool {
        if !self.replace(node, wrapper) {
            return false;
        }
        self.append_child(wrapper, node)
    }

    // Comparison

    /// Deep structural equality: kind, tag, attributes, data and children.
    ///
    /// Identity is not considered, so a rebuilt copy of a node compares equal
    /// to the original.
    pub fn structurally_eq(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        if self.kind(a) != self.kind(b) {
            return false;
        }
        let (ca, cb) = (self.children(a), self.children(b));
        ca.len() == cb.len()
            && ca
                .iter()
                .zip(cb)
                .all(|(&x, &y)| self.structurally_eq(x, y))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
