//! # Hybrid Text Model
//!
//! Lets plain-text pattern matching run over content that already contains
//! embedded markup.
//!
//! ## How it works
//!
//! [`HybridText::digest`] pulls every markup-bearing fragment (comments, tags,
//! `\x` escapes) out of a markup string and leaves an opaque *mark* in its
//! place, recording `mark → fragment` in the proxy storage. Remaining entities
//! are decoded, so `text` is what a reader sees plus marks.
//!
//! Rewrites operate on that text only. Whatever markup a rewrite introduces
//! is digested too, so raw tags never leak into `text`.
//! [`HybridText::materialize`] encodes the text and swaps the marks back, and
//! [`HybridText::reconcile`] applies the result onto a live node while keeping
//! every unchanged child node (see [`reconcile`]).
//!
//! ## Marks
//!
//! A mark is [`MARK_OPEN`] + a base-36 counter + [`MARK_CLOSE`], all in the
//! Private Use Area: a mark holds nothing a later digest could extract and
//! nothing an ASCII or word-class pattern matches. Candidates that already
//! occur in the text are skipped. A rewrite match that would start or end
//! strictly inside a mark is left alone.

pub mod mark;
pub mod reconcile;
pub mod replace;

use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::dom::markup::{decode_entities, encode_text};
use crate::dom::{Document, NodeId};

pub use mark::{MARK_CLOSE, MARK_OPEN};
pub use reconcile::ReconcileOutcome;
pub use replace::MarkupReplacer;

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMENT_REGEX.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"))
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("Invalid tag regex"))
}

fn escape_regex() -> &'static Regex {
    static ESCAPE_REGEX: OnceLock<Regex> = OnceLock::new();
    ESCAPE_REGEX
        .get_or_init(|| Regex::new(r"\\[^\x{E000}-\x{E033}]").expect("Invalid escape regex"))
}

/// Markup-free text plus the side table needed to restore its markup.
#[derive(Debug, Clone, Default)]
pub struct HybridText {
    text: String,
    storage: HashMap<String, String>,
    counter: u64,
}

impl HybridText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from a markup string.
    pub fn from_markup(markup: &str) -> Self {
        let mut model = Self::new();
        model.load_markup(markup);
        model
    }

    /// Starts a transformation pass over the content of `node`.
    ///
    /// Returns false, leaving an empty model, when `node` is not a live node
    /// of `doc`.
    pub fn load_from_node(&mut self, doc: &Document, node: NodeId) -> bool {
        if !doc.contains(node) {
            log::debug!("load_from_node: {node:?} is not in this document");
            self.load_markup("");
            return false;
        }
        let markup = doc.inner_markup(node);
        self.load_markup(&markup);
        true
    }

    /// Resets storage and the mark counter, then digests `markup` as the text.
    pub fn load_markup(&mut self, markup: &str) {
        self.text.clear();
        self.storage.clear();
        self.counter = 0;
        self.text = self.digest(markup);
    }

    /// The markup-free, mark-substituted text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The original fragment a mark stands for.
    pub fn fragment(&self, mark: &str) -> Option<&str> {
        self.storage.get(mark).map(String::as_str)
    }

    pub fn mark_count(&self) -> usize {
        self.storage.len()
    }

    /// Turns markup into text: comments, then tags, then `\x` escapes become
    /// marks, and what is left is entity-decoded.
    pub fn digest(&mut self, markup: &str) -> String {
        let mut current = markup.to_string();
        for pattern in [comment_regex(), tag_regex(), escape_regex()] {
            if !pattern.is_match(&current) {
                continue;
            }
            let next = pattern
                .replace_all(&current, |caps: &Captures<'_>| {
                    self.stash(&caps[0], &current)
                })
                .into_owned();
            current = next;
        }
        decode_entities(&current)
    }

    /// Encodes the text for markup and substitutes every known mark back.
    ///
    /// Marks are restored verbatim: their fragments were cut from markup and
    /// must not be encoded a second time.
    pub fn materialize(&self) -> String {
        let encoded = encode_text(&self.text);
        mark::mark_regex()
            .replace_all(&encoded, |caps: &Captures<'_>| {
                self.storage
                    .get(&caps[0])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Replaces every match of `pattern` in the text with digested markup.
    ///
    /// Matches whose start or end falls strictly inside a mark are skipped,
    /// so a mark is only ever replaced whole. Returns the number of matches
    /// replaced; the text is untouched when there were none.
    pub fn rewrite<R: MarkupReplacer>(&mut self, pattern: &Regex, mut replacement: R) -> usize {
        let source = self.text.clone();
        let marks: Vec<Range<usize>> = mark::mark_regex()
            .find_iter(&source)
            .map(|m| m.range())
            .collect();
        let splits_mark = |pos: usize| marks.iter().any(|m| m.start < pos && pos < m.end);

        let mut out = String::with_capacity(source.len());
        let mut last = 0;
        let mut count = 0;

        for caps in pattern.captures_iter(&source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if splits_mark(whole.start()) || splits_mark(whole.end()) {
                log::trace!("skipping match {:?} that splits a mark", whole.range());
                continue;
            }
            out.push_str(&source[last..whole.start()]);
            let markup = replacement.replace_markup(&caps);
            let digested = self.digest(&markup);
            out.push_str(&digested);
            last = whole.end();
            count += 1;
        }

        if count > 0 {
            out.push_str(&source[last..]);
            self.text = out;
        }
        count
    }

    /// Records `fragment` under a fresh mark and returns the mark.
    fn stash(&mut self, fragment: &str, haystack: &str) -> String {
        let mark = self.next_mark(haystack);
        self.storage.insert(mark.clone(), fragment.to_string());
        mark
    }

    /// Next counter value whose mark occurs in neither the text, the string
    /// being digested, nor the storage.
    fn next_mark(&mut self, haystack: &str) -> String {
        loop {
            let candidate = mark::format_mark(self.counter);
            self.counter += 1;
            if self.text.contains(&candidate)
                || haystack.contains(&candidate)
                || self.storage.contains_key(&candidate)
            {
                log::trace!("skipping colliding mark #{}", self.counter - 1);
                continue;
            }
            return candidate;
        }
    }
}
