//! # Docstring
//!
//! Structured documentation attached to an entity. Raw comment text is split into
//! a prose body and a list of [`Tag`]s (`@param`, `@return`, `@author`, ...).
//!
//! Tag lines start with `@name`. Indented lines that follow belong to the
//! preceding tag; a blank or unindented line ends it.

mod tags;

pub use tags::{Tag, TagStyle};

use std::fmt;

/// Parsed documentation: body text plus metadata tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docstring {
    raw: String,
    body: String,
    tags: Vec<Tag>,
}

impl Docstring {
    /// Parse raw comment text into a structured docstring.
    pub fn parse(raw: &str) -> Self {
        let mut body_lines: Vec<&str> = Vec::new();
        let mut tags = Vec::new();
        let mut current: Option<(&str, String)> = None;

        for line in raw.lines() {
            let line = line.trim_end();

            if let Some((name, rest)) = tag_start(line) {
                if let Some((name, text)) = current.take() {
                    tags.push(Tag::parse(name, &text));
                }
                current = Some((name, rest.to_string()));
                continue;
            }

            let continues_tag = !line.is_empty() && line.starts_with(char::is_whitespace);
            match current.as_mut() {
                Some((_, text)) if continues_tag => {
                    text.push('\n');
                    text.push_str(line.trim_start());
                }
                _ => {
                    if let Some((name, text)) = current.take() {
                        tags.push(Tag::parse(name, &text));
                    }
                    body_lines.push(line);
                }
            }
        }
        if let Some((name, text)) = current.take() {
            tags.push(Tag::parse(name, &text));
        }

        Self {
            raw: raw.to_string(),
            body: join_trimmed(&body_lines),
            tags,
        }
    }

    /// The raw text this docstring was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Prose body with tags removed.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// First sentence of the first paragraph.
    pub fn summary(&self) -> &str {
        let paragraph = self.body.split("\n\n").next().unwrap_or("");
        let mut end = paragraph.len();
        for (idx, c) in paragraph.char_indices() {
            if c != '.' {
                continue;
            }
            let next = paragraph[idx + 1..].chars().next();
            if next.is_none_or(char::is_whitespace) {
                end = idx + 1;
                break;
            }
        }
        paragraph[..end].trim()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// All tags with the given name, in declaration order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    /// First tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// Returns true if there is neither body text nor any tag.
    pub fn is_blank(&self) -> bool {
        self.body.is_empty() && self.tags.is_empty()
    }
}

/// Recognize `@name rest` at the start of a line.
fn tag_start(line: &str) -> Option<(&str, &str)> {
    let after = line.trim_start().strip_prefix('@')?;
    let end = after
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after.len());
    if end == 0 {
        return None;
    }
    let rest = &after[end..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((&after[..end], rest.trim_start()))
}

fn join_trimmed(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |idx| idx + 1);
    lines[start..end].join("\n")
}

impl From<&str> for Docstring {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Docstring {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl PartialEq<str> for Docstring {
    fn eq(&self, other: &str) -> bool {
        self.body == other
    }
}

impl PartialEq<&str> for Docstring {
    fn eq(&self, other: &&str) -> bool {
        self.body == *other
    }
}

impl fmt::Display for Docstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
