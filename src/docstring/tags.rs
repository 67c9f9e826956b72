use smol_str::SmolStr;

/// How the text following a tag name is split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle {
    /// `@param [String, nil] name description`
    TypedNamed,
    /// `@return [Integer] description`
    Typed,
    /// `@author Jane Doe`
    Text,
}

impl TagStyle {
    pub fn for_name(name: &str) -> Self {
        match name {
            "param" | "yieldparam" | "option" | "attr" | "attr_reader" | "attr_writer" => {
                TagStyle::TypedNamed
            }
            "return" | "yieldreturn" | "raise" => TagStyle::Typed,
            _ => TagStyle::Text,
        }
    }

    pub fn has_types(self) -> bool {
        matches!(self, TagStyle::TypedNamed | TagStyle::Typed)
    }

    pub fn has_name(self) -> bool {
        matches!(self, TagStyle::TypedNamed)
    }
}

/// A single `@tag` entry of a docstring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name without the leading `@` (e.g. `param`).
    pub name: SmolStr,
    /// Free text after types and name.
    pub text: String,
    /// Types listed in brackets, in declaration order.
    pub types: Vec<String>,
    /// Parameter / option name for named tags.
    pub param: Option<String>,
}

impl Tag {
    /// Build a tag from its name and the raw text that followed it.
    pub fn parse(name: &str, raw: &str) -> Self {
        let style = TagStyle::for_name(name);
        let mut rest = raw.trim();
        let mut types = Vec::new();
        let mut param = None;

        if style.has_types() {
            if let Some((parsed, after)) = split_types(rest) {
                types = parsed;
                rest = after;
            }
        }

        if style.has_name() {
            if let Some((word, after)) = split_word(rest) {
                param = Some(word.to_string());
                rest = after;
            }
            // `@param name [Type] text` puts the types after the name
            if types.is_empty() {
                if let Some((parsed, after)) = split_types(rest) {
                    types = parsed;
                    rest = after;
                }
            }
        }

        Self {
            name: SmolStr::new(name),
            text: rest.trim().to_string(),
            types,
            param,
        }
    }
}

/// Split a leading `[A, B]` type list off `text`.
fn split_types(text: &str) -> Option<(Vec<String>, &str)> {
    let inner = text.strip_prefix('[')?;
    let mut depth = 1usize;
    let mut close = None;
    let mut prev = ' ';
    for (idx, c) in inner.char_indices() {
        let arrow = c == '>' && prev == '=';
        prev = c;
        match c {
            _ if arrow => {}
            '[' | '<' | '{' | '(' => depth += 1,
            ']' | '>' | '}' | ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let types = split_top_level(&inner[..close]);
    Some((types, inner[close + 1..].trim_start()))
}

/// Split a type list on commas that are not nested inside brackets.
fn split_top_level(list: &str) -> Vec<String> {
    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut prev = ' ';
    for (idx, c) in list.char_indices() {
        let arrow = c == '>' && prev == '=';
        prev = c;
        match c {
            _ if arrow => {}
            '[' | '<' | '{' | '(' => depth += 1,
            ']' | '>' | '}' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                types.push(list[start..idx].trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    types.push(list[start..].trim().to_string());
    types.retain(|t| !t.is_empty());
    types
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() || text.starts_with('[') {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], text[end..].trim_start())),
        None => Some((text, "")),
    }
}
