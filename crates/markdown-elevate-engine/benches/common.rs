use markdown_elevate_engine::{Document, NodeId};

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn typed_lines(size: usize) -> Vec<String> {
    let base = [
        "# Title",
        "Paragraph with some content.",
        "- Bullet point",
        "- Another item",
        "1. Numbered",
        "> A quote with <b>markup</b>",
        "---",
    ];
    base.iter()
        .cycle()
        .take(size)
        .map(|line| line.to_string())
        .collect()
}

#[allow(dead_code)]
pub fn push_block(doc: &mut Document, text: &str) -> NodeId {
    let p = doc.create_element("p");
    doc.set_text_content(p, text);
    let root = doc.root();
    doc.append_child(root, p);
    p
}

#[allow(dead_code)]
pub fn inline_heavy_markup(spans: usize) -> String {
    let mut content = String::new();
    for i in 0..spans {
        content.push_str(&format!(
            "word <b>bold {i}</b> *em {i}* <a href=\"/n/{i}\">link</a> &amp; "
        ));
    }
    content
}
