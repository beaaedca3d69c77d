use super::SPACE;
use crate::elevate::{ContainerDescriptor, TagSet};
use crate::error::EngineError;

/// Blockquote marker: `>` or its entity form, optionally followed by a space.
///
/// The block keeps its own tag and is wrapped in (or merged into) a
/// blockquote container.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
    /// The prefix as it appears in encoded markup.
    pub const PREFIX_ENTITY: &'static str = "&gt;";

    pub fn pattern() -> String {
        format!("(?:{}|{}){SPACE}?", Self::PREFIX, Self::PREFIX_ENTITY)
    }

    pub fn descriptor(tags: &TagSet) -> Result<ContainerDescriptor, EngineError> {
        Ok(ContainerDescriptor::new("blockquote", &Self::pattern())?
            .with_parent_tag(tags.blockquote.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("> quoted", true)]
    #[case(">quoted", true)]
    #[case(">\u{a0}quoted", true)]
    #[case("&gt; quoted", true)]
    #[case(" > indented", false)]
    #[case("quoted >", false)]
    fn marker_detection(#[case] text: &str, #[case] expected: bool) {
        let d = BlockQuote::descriptor(&TagSet::default()).unwrap();
        assert_eq!(d.matches(text), expected);
    }

    #[test]
    fn keeps_block_tag() {
        let d = BlockQuote::descriptor(&TagSet::default()).unwrap();
        assert_eq!(d.child_tag(), None);
        assert_eq!(d.parent_tag(), Some("blockquote"));
        assert!(d.is_typable());
    }
}
