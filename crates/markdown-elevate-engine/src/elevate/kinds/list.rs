use super::SPACE;
use crate::elevate::{ContainerDescriptor, TagSet};
use crate::error::EngineError;

/// Bulleted list item: optional leading space, one of `* + -`, one space.
pub struct UnorderedList;

impl UnorderedList {
    pub const BULLETS: [char; 3] = ['*', '+', '-'];

    pub fn pattern() -> String {
        format!("{SPACE}?[-*+]{SPACE}")
    }

    pub fn descriptor(tags: &TagSet) -> Result<ContainerDescriptor, EngineError> {
        Ok(ContainerDescriptor::new("unordered list", &Self::pattern())?
            .with_child_tag(tags.list_item.as_str())
            .with_parent_tag(tags.unordered_list.as_str()))
    }
}

/// Numbered list item: optional leading space, digits, `.`, one space.
pub struct OrderedList;

impl OrderedList {
    pub const DELIMITER: char = '.';

    pub fn pattern() -> String {
        format!(r"{SPACE}?[0-9]+\{}{SPACE}", Self::DELIMITER)
    }

    pub fn descriptor(tags: &TagSet) -> Result<ContainerDescriptor, EngineError> {
        Ok(ContainerDescriptor::new("ordered list", &Self::pattern())?
            .with_child_tag(tags.list_item.as_str())
            .with_parent_tag(tags.ordered_list.as_str()))
    }
}
