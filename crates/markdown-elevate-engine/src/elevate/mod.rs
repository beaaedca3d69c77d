//! # Block Elevation
//!
//! Promotes a freshly typed generic block into the structure its leading
//! marker asks for: `- item` becomes a list item inside a list, `# Title` a
//! header, `---` a rule.
//!
//! ## Modules
//!
//! - **`descriptor`**: [`ContainerDescriptor`], the immutable rule for one
//!   construct, and the elevation algorithm it runs
//! - **`kinds`**: the standard constructs, each owning its marker syntax
//! - **`tags`**: [`TagSet`], the element names the standard constructs use
//!
//! ## Priority
//!
//! Markers overlap (`* * *` is a rule, not a bullet), so the elevator tries
//! descriptors in a fixed order and stops at the first that applies:
//! blockquote, header, horizontal rule, ordered list, unordered list.

pub mod descriptor;
pub mod kinds;
pub mod tags;

pub use descriptor::{ContainerDescriptor, Elevation, ElevationKind};
pub use tags::TagSet;

use crate::dom::{Document, NodeId};
use crate::error::EngineError;
use kinds::{BlockQuote, Header, HorizontalRule, OrderedList, UnorderedList};

/// Outcome of a successful [`BlockElevator::elevate`] call.
#[derive(Debug, Clone, Copy)]
pub struct ElevationResult<'a> {
    /// The descriptor that matched.
    pub descriptor: &'a ContainerDescriptor,
    pub parent: Option<NodeId>,
    pub child: NodeId,
}

impl ElevationResult<'_> {
    /// Whether the host should keep the caret in the elevated block.
    pub fn is_typable(&self) -> bool {
        self.descriptor.is_typable()
    }
}

/// Ordered set of descriptors resolved by first match.
#[derive(Debug, Clone)]
pub struct BlockElevator {
    descriptors: Vec<ContainerDescriptor>,
}

impl BlockElevator {
    /// Uses `descriptors` as given; earlier entries win.
    pub fn new(descriptors: Vec<ContainerDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The standard descriptor set in priority order.
    pub fn with_tags(tags: &TagSet) -> Result<Self, EngineError> {
        tags.validate()?;
        Ok(Self::new(vec![
            BlockQuote::descriptor(tags)?,
            Header::descriptor(tags)?,
            HorizontalRule::descriptor(tags)?,
            OrderedList::descriptor(tags)?,
            UnorderedList::descriptor(tags)?,
        ]))
    }

    pub fn descriptors(&self) -> &[ContainerDescriptor] {
        &self.descriptors
    }

    /// Elevates `node` with the first descriptor that applies.
    ///
    /// `None` means nothing matched and the tree is exactly as it was.
    pub fn elevate(&self, doc: &mut Document, node: NodeId) -> Option<ElevationResult<'_>> {
        self.descriptors.iter().find_map(|descriptor| {
            descriptor
                .try_elevate(doc, node)
                .map(|Elevation { parent, child }| ElevationResult {
                    descriptor,
                    parent,
                    child,
                })
        })
    }

    /// Tag a new line inside `container` should get, without pattern
    /// matching: the child tag of the first descriptor whose parent tag is the
    /// container's tag.
    pub fn suggest_child_tag(&self, doc: &Document, container: NodeId) -> Option<&str> {
        if !doc.contains(container) {
            return None;
        }
        let tag = doc.tag(container)?;
        self.descriptors
            .iter()
            .find(|d| d.parent_tag().is_some_and(|p| p.eq_ignore_ascii_case(tag)))?
            .child_tag()
    }
}

impl Default for BlockElevator {
    fn default() -> Self {
        Self::with_tags(&TagSet::default()).expect("Invalid default tag set")
    }
}
