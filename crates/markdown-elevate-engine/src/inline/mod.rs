//! # Inline Rules
//!
//! A bracket-delimited span such as `*word*` rendered into an element. Rules
//! run over [`HybridText`], so existing markup in the block is already a mark
//! by the time the delimiter pattern is evaluated and cannot be corrupted.

use regex::{Captures, Regex};

use crate::dom::markup::encode_text;
use crate::dom::{Attribute, Document, NodeId};
use crate::error::{EngineError, validate_tag};
use crate::hybrid::HybridText;

/// Wraps text between `left` and `right` in a `tag` element.
#[derive(Debug, Clone)]
pub struct InlineRule {
    pattern: Regex,
    tag: String,
    attributes: Vec<Attribute>,
}

impl InlineRule {
    /// Builds the non-greedy pattern `left(.+?)right` with both delimiters
    /// matched literally.
    pub fn new(left: &str, right: &str, tag: &str) -> Result<Self, EngineError> {
        if left.is_empty() {
            return Err(EngineError::EmptyDelimiter { side: "left" });
        }
        if right.is_empty() {
            return Err(EngineError::EmptyDelimiter { side: "right" });
        }
        validate_tag(tag)?;
        let pattern = Regex::new(&format!(
            "{}(.+?){}",
            regex::escape(left),
            regex::escape(right)
        ))?;
        Ok(Self {
            pattern,
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Rewrites every delimited span in `model`. Returns the number of spans.
    pub fn render(&self, model: &mut HybridText) -> usize {
        let open = self.open_tag();
        let tag = &self.tag;
        let count = model.rewrite(&self.pattern, |caps: &Captures<'_>| {
            format!("{open}{}</{tag}>", encode_text(&caps[1]))
        });
        if count > 0 {
            log::debug!("inline <{tag}> rendered {count} span(s)");
        }
        count
    }

    fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for attr in &self.attributes {
            out.push_str(&format!(
                " {}=\"{}\"",
                attr.name,
                html_escape::encode_double_quoted_attribute(&attr.value)
            ));
        }
        out.push('>');
        out
    }
}

/// Runs `rules` in order over the content of `node` and reconciles the
/// result back onto it. Nothing is touched when no rule matched.
pub fn apply_inline_rules(rules: &[InlineRule], doc: &mut Document, node: NodeId) -> usize {
    if rules.is_empty() || !doc.contains(node) || !doc.is_element(node) {
        return 0;
    }
    let mut model = HybridText::new();
    model.load_from_node(doc, node);
    let count: usize = rules.iter().map(|rule| rule.render(&mut model)).sum();
    if count > 0 {
        model.reconcile(doc, node);
    }
    count
}
