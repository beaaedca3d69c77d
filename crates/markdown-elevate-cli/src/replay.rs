use markdown_elevate_config::{Config, ConfigError};
use markdown_elevate_engine::{BlockElevator, Document, InlineRule, NodeId, apply_inline_rules};

/// Feeds lines into a [`Document`] the way an editor would as they are typed.
///
/// Each non-blank line is appended as a generic block and elevated. The last
/// typable container stays *open*: lines that match nothing are pulled into
/// it, pre-tagged with the container's suggested child tag. A blank line or a
/// rule closes it.
pub struct Replay {
    doc: Document,
    elevator: BlockElevator,
    inline_rules: Vec<InlineRule>,
    block_tag: String,
    open_container: Option<NodeId>,
}

impl Replay {
    pub fn new(
        elevator: BlockElevator,
        inline_rules: Vec<InlineRule>,
        block_tag: impl Into<String>,
    ) -> Self {
        Self {
            doc: Document::new(),
            elevator,
            inline_rules,
            block_tag: block_tag.into(),
            open_container: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.elevator()?,
            config.inline_rules()?,
            config.tags.block.as_str(),
        ))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn type_text(&mut self, text: &str) {
        for line in text.lines() {
            self.type_line(line);
        }
    }

    /// Types one line. Returns the block it ended up as, or `None` for a
    /// blank line.
    pub fn type_line(&mut self, line: &str) -> Option<NodeId> {
        if line.trim().is_empty() {
            self.open_container = None;
            return None;
        }

        let root = self.doc.root();
        let block = self.doc.create_element(&self.block_tag);
        self.doc.set_text_content(block, line);
        self.doc.append_child(root, block);

        let block = match self.elevator.elevate(&mut self.doc, block) {
            Some(result) if result.is_typable() => {
                log::debug!("{:?} elevated as {}", line, result.descriptor.name());
                self.open_container = result.parent;
                result.child
            }
            Some(result) => {
                self.open_container = None;
                return Some(result.child);
            }
            None => match self.open_container {
                Some(container) => self.continue_container(container, block),
                None => block,
            },
        };

        apply_inline_rules(&self.inline_rules, &mut self.doc, block);
        Some(block)
    }

    fn continue_container(&mut self, container: NodeId, block: NodeId) -> NodeId {
        let item = match self.elevator.suggest_child_tag(&self.doc, container) {
            Some(tag) => {
                let item = self.doc.create_element(tag);
                self.doc.move_children(block, item);
                self.doc.remove(block);
                item
            }
            None => block,
        };
        self.doc.append_child(container, item);
        item
    }

    /// Outer markup of each top-level block, one per line.
    pub fn render(&self) -> String {
        self.doc
            .children(self.doc.root())
            .iter()
            .map(|&block| self.doc.outer_markup(block))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn replay(input: &str) -> String {
        let mut replay = Replay::from_config(&Config::default()).unwrap();
        replay.type_text(input);
        replay.render()
    }

    #[test]
    fn plain_lines_stay_paragraphs() {
        assert_eq!(replay("one\ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn list_lines_share_a_list() {
        insta::assert_snapshot!(replay("- one\n- two\n- three"), @"<ul><li>one</li><li>two</li><li>three</li></ul>");
    }

    #[test]
    fn unmarked_line_continues_open_list() {
        insta::assert_snapshot!(replay("1. first\nsecond"), @"<ol><li>first</li><li>second</li></ol>");
    }

    #[test]
    fn unmarked_line_continues_open_quote_without_retagging() {
        insta::assert_snapshot!(replay("> quoted\nlazy"), @"<blockquote><p>quoted</p><p>lazy</p></blockquote>");
    }

    #[test]
    fn blank_line_closes_container() {
        insta::assert_snapshot!(replay("- a\n\nafter\n- b"), @r"
        <ul><li>a</li></ul>
        <p>after</p>
        <ul><li>b</li></ul>
        ");
    }

    #[test]
    fn rule_closes_container() {
        insta::assert_snapshot!(replay("- a\n---\nafter"), @r"
        <ul><li>a</li></ul>
        <hr>
        <p>after</p>
        ");
    }

    #[test]
    fn header_does_not_open_container() {
        insta::assert_snapshot!(replay("# Title\nbody"), @r"
        <h1>Title</h1>
        <p>body</p>
        ");
    }

    #[test]
    fn inline_rules_apply_to_each_block() {
        insta::assert_snapshot!(replay("- *loud* item\nplain *too*"), @r"
        <ul><li><em>loud</em> item</li><li>plain <em>too</em></li></ul>
        ");
    }

    #[test]
    fn text_is_escaped_in_output() {
        assert_eq!(replay("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn type_line_reports_final_block() {
        let mut replay = Replay::from_config(&Config::default()).unwrap();
        assert_eq!(replay.type_line("   "), None);
        let item = replay.type_line("- x").unwrap();
        let doc = replay.document();
        assert_eq!(doc.tag(item), Some("li"));
        let list = doc.parent(item).unwrap();
        let next = replay.type_line("y").unwrap();
        assert_eq!(replay.document().parent(next), Some(list));
    }

    #[test]
    fn continued_lines_free_their_scratch_block() {
        let mut replay = Replay::from_config(&Config::default()).unwrap();
        replay.type_line("- first");
        let settled = replay.document().node_count();
        replay.type_line("second");
        // one li plus its text node
        assert_eq!(replay.document().node_count(), settled + 2);
    }
}
