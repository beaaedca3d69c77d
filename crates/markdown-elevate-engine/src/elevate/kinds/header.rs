use super::SPACE;
use crate::elevate::{ContainerDescriptor, ElevationKind, TagSet};
use crate::error::EngineError;

/// ATX-style header marker: one to `max_header_level` hashes and a space.
///
/// The header level comes from the length of the hash run, so the child tag
/// is only known once the pattern matched.
pub struct Header;

impl Header {
    pub const HASH: char = '#';

    pub fn pattern(max_level: u8) -> String {
        format!("({}{{1,{max_level}}}){SPACE}", Self::HASH)
    }

    pub fn descriptor(tags: &TagSet) -> Result<ContainerDescriptor, EngineError> {
        Ok(
            ContainerDescriptor::new("header", &Self::pattern(tags.max_header_level))?.with_kind(
                ElevationKind::Header {
                    prefix: tags.header_prefix.clone(),
                    max_level: tags.max_header_level,
                },
            ),
        )
    }
}
