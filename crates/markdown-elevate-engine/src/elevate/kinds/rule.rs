use super::SPACE;
use crate::elevate::{ContainerDescriptor, ElevationKind, TagSet};
use crate::error::EngineError;

/// Thematic break: the whole line is three or more of one rule character,
/// with spaces allowed around and between them.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const CHARS: [char; 3] = ['-', '=', '*'];

    pub fn pattern() -> String {
        let runs: Vec<String> = Self::CHARS
            .iter()
            .map(|c| {
                let c = regex::escape(&c.to_string());
                format!("(?:{c}{SPACE}*){{3,}}")
            })
            .collect();
        format!("{SPACE}*(?:{})$", runs.join("|"))
    }

    pub fn descriptor(tags: &TagSet) -> Result<ContainerDescriptor, EngineError> {
        Ok(ContainerDescriptor::new("horizontal rule", &Self::pattern())?
            .with_child_tag(tags.rule.as_str())
            .with_typable(false)
            .with_remove_feature_mark(false)
            .with_kind(ElevationKind::HorizontalRule))
    }
}
