//! Nested `NAME { key = value }` text tree used by the config file.
//!
//! Grammar, line oriented:
//! - `key = value` sets a value; the value is the rest of the line, trimmed,
//!   and may itself contain `=`.
//! - A bare word names the next node; its `{` may follow on the same line or
//!   on a later one. `}` closes the innermost open node.
//! - `//` starts a comment that runs to the end of the line.
//! - `\` escapes the next character, so `\{`, `\}` and `\/` are literal.
//!   `\n`, `\r`, `\t` and `\s` stand for line feed, carriage return, tab
//!   and space. Unknown escapes are kept as written.
//!
//! The writer escapes every key, value and node name, so any string
//! survives a write/parse cycle unchanged.

use std::fmt::Write as _;

const ESCAPE: char = '\\';

/// Byte offset of the first character outside an escape sequence for which
/// `pred(char, next_char)` holds.
fn find_unescaped(s: &str, mut pred: impl FnMut(char, Option<char>) -> bool) -> Option<usize> {
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == ESCAPE {
            chars.next();
            continue;
        }
        if pred(c, chars.peek().map(|&(_, n)| n)) {
            return Some(i);
        }
    }
    None
}

/// Makes `raw` safe to write as a key, value or node name.
pub fn escape(raw: &str) -> String {
    let last = raw.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        match c {
            ESCAPE | '{' | '}' | '/' => {
                out.push(ESCAPE);
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Edge spaces would otherwise be trimmed on parse.
            ' ' if i == 0 || i == last => out.push_str("\\s"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape`].
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != ESCAPE {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some(e @ (ESCAPE | '{' | '}' | '/')) => out.push(e),
            Some(other) => {
                out.push(ESCAPE);
                out.push(other);
            }
            None => out.push(ESCAPE),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: `}}` without a matching `{{`")]
    UnexpectedClose { line: usize },
    #[error("node `{name}` opened on line {line} is never closed")]
    Unclosed { name: String, line: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    pub name: String,
    values: Vec<(String, String)>,
    nodes: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First value stored under `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrites the first value under `key`, or appends a new pair.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
    }

    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    /// First child named `name`.
    pub fn node(&self, name: &str) -> Option<&ConfigNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// All children in source order.
    pub fn nodes(&self) -> &[ConfigNode] {
        &self.nodes
    }

    pub fn add_node(&mut self, node: ConfigNode) {
        self.nodes.push(node);
    }

    /// Parses text into an unnamed root node holding the top-level content.
    pub fn parse(text: &str) -> Result<ConfigNode, ParseError> {
        let mut root = ConfigNode::default();
        // Nodes still waiting for their `}`, with the line of their `{`.
        let mut open: Vec<(ConfigNode, usize)> = Vec::new();
        let mut pending_name: Option<String> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let comment = find_unescaped(raw_line, |c, next| c == '/' && next == Some('/'));
            let line = match comment {
                Some(pos) => &raw_line[..pos],
                None => raw_line,
            };

            let mut rest = line;
            while !rest.is_empty() {
                let cut = find_unescaped(rest, |c, _| c == '{' || c == '}').unwrap_or(rest.len());
                let text_part = rest[..cut].trim();
                if !text_part.is_empty() {
                    let top = match open.last_mut() {
                        Some((node, _)) => node,
                        None => &mut root,
                    };
                    match text_part.split_once('=') {
                        Some((k, v)) => {
                            pending_name = None;
                            top.add_value(unescape(k.trim()), unescape(v.trim()));
                        }
                        None => pending_name = Some(unescape(text_part)),
                    }
                }
                if cut >= rest.len() {
                    break;
                }
                if rest.as_bytes()[cut] == b'{' {
                    let name = pending_name.take().unwrap_or_default();
                    open.push((ConfigNode::new(name), line_no));
                } else {
                    pending_name = None;
                    let Some((done, _)) = open.pop() else {
                        return Err(ParseError::UnexpectedClose { line: line_no });
                    };
                    match open.last_mut() {
                        Some((parent, _)) => parent.add_node(done),
                        None => root.add_node(done),
                    }
                }
                rest = &rest[cut + 1..];
            }
        }

        if let Some((node, line)) = open.into_iter().next() {
            return Err(ParseError::Unclosed {
                name: node.name,
                line,
            });
        }
        Ok(root)
    }

    /// Writes the root's content (not the root itself) in the tree format,
    /// tab-indented with braces on their own lines.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_body(&mut out, 0);
        out
    }

    fn write_body(&self, out: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        for (k, v) in &self.values {
            let _ = writeln!(out, "{indent}{} = {}", escape(k), escape(v));
        }
        for child in &self.nodes {
            let _ = writeln!(out, "{indent}{}", escape(&child.name));
            let _ = writeln!(out, "{indent}{{");
            child.write_body(out, depth + 1);
            let _ = writeln!(out, "{indent}}}");
        }
    }
}
