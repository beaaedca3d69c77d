use regex::Captures;

/// Produces the markup that replaces one match during [`HybridText::rewrite`].
///
/// Implemented for templates (`&str`, `String`) expanded with `$1` /
/// `${name}` syntax, and for closures over the match captures.
///
/// [`HybridText::rewrite`]: super::HybridText::rewrite
pub trait MarkupReplacer {
    fn replace_markup(&mut self, caps: &Captures<'_>) -> String;
}

impl MarkupReplacer for &str {
    fn replace_markup(&mut self, caps: &Captures<'_>) -> String {
        let mut dst = String::new();
        caps.expand(*self, &mut dst);
        dst
    }
}

impl MarkupReplacer for String {
    fn replace_markup(&mut self, caps: &Captures<'_>) -> String {
        let mut dst = String::new();
        caps.expand(self.as_str(), &mut dst);
        dst
    }
}

impl<F> MarkupReplacer for F
where
    F: FnMut(&Captures<'_>) -> String,
{
    fn replace_markup(&mut self, caps: &Captures<'_>) -> String {
        self(caps)
    }
}
