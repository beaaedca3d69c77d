use regex::{Captures, Regex};

use crate::dom::{Document, NodeId, NodeKind};
use crate::elevate::kinds::SPACE;
use crate::error::EngineError;
use crate::hybrid::HybridText;
use crate::hybrid::mark::{MARK_PATTERN, mark_regex};

/// How a descriptor restructures a node once its pattern matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElevationKind {
    /// Strip the marker, rename to the child tag, wrap in or merge into the
    /// parent tag.
    Container,
    /// Replace the node with a void rule element, discarding its content.
    HorizontalRule,
    /// Child tag is `prefix` + the length of the first capture group (the
    /// run of `#`), clamped to `max_level`.
    Header { prefix: String, max_level: u8 },
}

/// Nodes produced by one successful elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elevation {
    /// The container the child now lives in, if the descriptor wraps.
    pub parent: Option<NodeId>,
    /// The elevated block itself.
    pub child: NodeId,
}

/// Removal pattern for `body`: any run of leading marks and indentation is
/// captured as `lead`, so markup in front of a marker does not hide it.
fn removal_pattern(body: &str) -> String {
    format!("^(?P<lead>(?:{MARK_PATTERN}|{SPACE})*?)(?:{body})")
}

/// The marks of the `lead` capture; indentation before the marker goes.
fn leading_marks(caps: &Captures<'_>) -> String {
    caps.name("lead").map_or_else(String::new, |lead| {
        mark_regex()
            .find_iter(lead.as_str())
            .map(|m| m.as_str())
            .collect()
    })
}

/// Declarative rule for one recognisable block construct.
///
/// Immutable once built; an elevator shares its descriptors by reference.
#[derive(Debug, Clone)]
pub struct ContainerDescriptor {
    name: String,
    pattern: Regex,
    removal: Regex,
    child_tag: Option<String>,
    parent_tag: Option<String>,
    typable: bool,
    remove_feature_mark: bool,
    kind: ElevationKind,
}

impl ContainerDescriptor {
    /// Creates a generic container descriptor. The pattern is always anchored
    /// at the start of the text, whether or not it begins with `^`.
    ///
    /// Defaults: no child tag, no parent tag, typable, marker removed.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, EngineError> {
        let body = pattern.strip_prefix('^').unwrap_or(pattern);
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(&format!("^(?:{body})"))?,
            removal: Regex::new(&removal_pattern(body))?,
            child_tag: None,
            parent_tag: None,
            typable: true,
            remove_feature_mark: true,
            kind: ElevationKind::Container,
        })
    }

    pub fn with_child_tag(mut self, tag: impl Into<String>) -> Self {
        self.child_tag = Some(tag.into());
        self
    }

    pub fn with_parent_tag(mut self, tag: impl Into<String>) -> Self {
        self.parent_tag = Some(tag.into());
        self
    }

    pub fn with_typable(mut self, typable: bool) -> Self {
        self.typable = typable;
        self
    }

    pub fn with_remove_feature_mark(mut self, remove: bool) -> Self {
        self.remove_feature_mark = remove;
        self
    }

    pub fn with_kind(mut self, kind: ElevationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The anchored feature pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn child_tag(&self) -> Option<&str> {
        self.child_tag.as_deref()
    }

    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag.as_deref()
    }

    /// Whether the elevated block accepts further typing.
    pub fn is_typable(&self) -> bool {
        self.typable
    }

    pub fn removes_feature_mark(&self) -> bool {
        self.remove_feature_mark
    }

    pub fn kind(&self) -> &ElevationKind {
        &self.kind
    }

    /// Whether the feature pattern matches the start of `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Elevates `node` if its text starts with this descriptor's marker.
    ///
    /// Returns `None`, leaving the tree untouched, when the pattern does not
    /// match or when `node` is not an attached element of `doc`.
    pub fn try_elevate(&self, doc: &mut Document, node: NodeId) -> Option<Elevation> {
        if !doc.contains(node) || !doc.is_element(node) || doc.parent(node).is_none() {
            return None;
        }
        let text = doc.text_content(node);
        let Some(caps) = self.pattern.captures(&text) else {
            log::trace!("{} does not match {node:?}", self.name);
            return None;
        };

        let elevation = match &self.kind {
            ElevationKind::Container => self.elevate_container(doc, node),
            ElevationKind::HorizontalRule => self.elevate_rule(doc, node),
            ElevationKind::Header { prefix, max_level } => {
                let level = caps
                    .get(1)
                    .map_or(1, |m| m.as_str().chars().count())
                    .clamp(1, usize::from((*max_level).max(1)));
                self.elevate_header(doc, node, &format!("{prefix}{level}"))
            }
        };
        log::debug!(
            "{} elevated {node:?}: child {:?}, parent {:?}",
            self.name,
            elevation.child,
            elevation.parent
        );
        Some(elevation)
    }

    fn elevate_container(&self, doc: &mut Document, node: NodeId) -> Elevation {
        if self.remove_feature_mark {
            self.strip_feature_mark(doc, node);
        }
        let child = match &self.child_tag {
            Some(tag) => retag(doc, node, tag),
            None => node,
        };
        let parent = self
            .parent_tag
            .as_deref()
            .map(|tag| attach_to_container(doc, child, tag));
        Elevation { parent, child }
    }

    fn elevate_rule(&self, doc: &mut Document, node: NodeId) -> Elevation {
        let rule = doc.create_element(self.child_tag.as_deref().unwrap_or("hr"));
        doc.replace(node, rule);
        Elevation {
            parent: None,
            child: rule,
        }
    }

    fn elevate_header(&self, doc: &mut Document, node: NodeId, tag: &str) -> Elevation {
        if self.remove_feature_mark {
            self.strip_feature_mark(doc, node);
        }
        Elevation {
            parent: None,
            child: retag(doc, node, tag),
        }
    }

    /// Removes the marker from the node's markup, keeping any markup around
    /// it and every child node the removal did not touch.
    fn strip_feature_mark(&self, doc: &mut Document, node: NodeId) {
        let mut model = HybridText::new();
        model.load_from_node(doc, node);
        if model.rewrite(&self.removal, leading_marks) > 0 {
            model.reconcile(doc, node);
        }
    }
}

/// Moves the children of `node` into a new `tag` element that takes its place.
fn retag(doc: &mut Document, node: NodeId, tag: &str) -> NodeId {
    let child = doc.create_element(tag);
    doc.move_children(node, child);
    doc.replace(node, child);
    child
}

/// Merges `child` into a preceding `tag` sibling, or wraps it in a new one.
fn attach_to_container(doc: &mut Document, child: NodeId, tag: &str) -> NodeId {
    match previous_block_sibling(doc, child) {
        Some(prev) if doc.has_tag(prev, tag) => {
            doc.append_child(prev, child);
            prev
        }
        _ => {
            let wrapper = doc.create_element(tag);
            doc.wrap(child, wrapper);
            wrapper
        }
    }
}

/// The nearest preceding element sibling, looking past whitespace-only text
/// and comments. Any other text in between blocks the merge.
fn previous_block_sibling(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut cur = doc.previous_sibling(node);
    while let Some(id) = cur {
        match doc.kind(id) {
            NodeKind::Element { .. } => return Some(id),
            NodeKind::Text(t) if !t.trim().is_empty() => return None,
            NodeKind::Text(_) | NodeKind::Comment(_) => {}
        }
        cur = doc.previous_sibling(id);
    }
    None
}
