use thiserror::Error;

/// Errors raised while building rules from user-supplied settings.
///
/// Transformations themselves never fail: a rule that does not apply yields
/// `None` or a zero count instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Inline rule has an empty {side} delimiter")]
    EmptyDelimiter { side: &'static str },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Checks that `tag` is usable as an element name.
pub fn validate_tag(tag: &str) -> Result<(), EngineError> {
    let mut chars = tag.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidTagName(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("em", true)]
    #[case("h1", true)]
    #[case("my-tag", true)]
    #[case("", false)]
    #[case("1h", false)]
    #[case("a b", false)]
    #[case("<em>", false)]
    fn tag_validation(#[case] tag: &str, #[case] ok: bool) {
        assert_eq!(validate_tag(tag).is_ok(), ok);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            EngineError::EmptyDelimiter { side: "left" }.to_string(),
            "Inline rule has an empty left delimiter"
        );
        assert_eq!(
            EngineError::InvalidTagName("a b".into()).to_string(),
            "Invalid tag name: \"a b\""
        );
    }
}
