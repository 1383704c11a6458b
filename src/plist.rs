//! Minimal XML property list writer.
//!
//! Only the handful of value types a launchd descriptor needs are supported
//! and the layout is fixed: four spaces per indent, one element per line.

use std::fmt::Display;

const INDENT: &str = "    ";

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);

/// Depth of entries in the top level dictionary.
pub const ENTRY: usize = 2;
/// Depth of members nested one level below an entry.
pub const MEMBER: usize = 3;

/// Escape text for use inside `<key>` and `<string>` elements.
pub fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }

    escaped
}

pub struct Document {
    buf: String,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Document { buf: String::from(HEADER) };
        doc.open(1, "dict");
        doc
    }

    fn line(&mut self, depth: usize, text: &str) -> &mut Self {
        (0..depth).for_each(|_| self.buf.push_str(INDENT));
        self.buf.push_str(text);
        self.buf.push('\n');
        self
    }

    pub fn open(&mut self, depth: usize, tag: &str) -> &mut Self { self.line(depth, &format!("<{tag}>")) }
    pub fn close(&mut self, depth: usize, tag: &str) -> &mut Self { self.line(depth, &format!("</{tag}>")) }

    pub fn key(&mut self, depth: usize, name: &str) -> &mut Self { self.line(depth, &format!("<key>{}</key>", escape(name))) }
    pub fn string(&mut self, depth: usize, value: &str) -> &mut Self { self.line(depth, &format!("<string>{}</string>", escape(value))) }
    pub fn integer(&mut self, depth: usize, value: impl Display) -> &mut Self { self.line(depth, &format!("<integer>{value}</integer>")) }
    pub fn boolean(&mut self, depth: usize, value: bool) -> &mut Self { self.line(depth, &format!("<{value}/>")) }

    /// Close the top level dictionary and the document.
    pub fn finish(mut self) -> String {
        self.close(1, "dict");
        self.close(0, "plist");
        self.buf
    }
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}
