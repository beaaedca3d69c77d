use serde::{Deserialize, Serialize};

use crate::error::{EngineError, validate_tag};

/// Element names the standard descriptors produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSet {
    /// Generic block a freshly typed line starts as.
    pub block: String,
    pub unordered_list: String,
    pub ordered_list: String,
    pub list_item: String,
    pub blockquote: String,
    /// Void element a horizontal rule becomes.
    pub rule: String,
    /// Header tags are this prefix followed by the level (`h` → `h1`…).
    pub header_prefix: String,
    /// Deepest header level a run of `#` can produce.
    pub max_header_level: u8,
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            block: "p".to_string(),
            unordered_list: "ul".to_string(),
            ordered_list: "ol".to_string(),
            list_item: "li".to_string(),
            blockquote: "blockquote".to_string(),
            rule: "hr".to_string(),
            header_prefix: "h".to_string(),
            max_header_level: 6,
        }
    }
}

impl TagSet {
    /// Tag for a header of `level`.
    pub fn header(&self, level: usize) -> String {
        format!("{}{level}", self.header_prefix)
    }

    /// Checks every name, and that at least one header level exists.
    pub fn validate(&self) -> Result<(), EngineError> {
        for tag in [
            &self.block,
            &self.unordered_list,
            &self.ordered_list,
            &self.list_item,
            &self.blockquote,
            &self.rule,
            &self.header_prefix,
        ] {
            validate_tag(tag)?;
        }
        if self.max_header_level == 0 {
            return Err(EngineError::InvalidTagName(self.header(0)));
        }
        Ok(())
    }
}
