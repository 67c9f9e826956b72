//! Source text normalization for captured declaration snippets.
//!
//! Scanners capture a declaration's source span verbatim, so every line carries
//! the indentation of the enclosing block. [`normalize_source`] removes that
//! shared indentation so the snippet reads as if it were declared at column zero.

/// Check if a character counts as indentation.
///
/// Spaces and tabs each count as a single column.
#[inline]
fn is_indent_character(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Number of leading indentation columns on a line.
pub fn indentation_width(line: &str) -> usize {
    line.chars().take_while(|&c| is_indent_character(c)).count()
}

/// Remove a single trailing line terminator (`\n` or `\r\n`), if present.
pub fn strip_line_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Strip up to `width` indentation columns from the start of `line`.
///
/// Lines indented less than `width` lose all of their indentation.
fn strip_columns(line: &str, width: usize) -> &str {
    let strip = line
        .char_indices()
        .take(width)
        .take_while(|&(_, c)| is_indent_character(c))
        .last()
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    &line[strip..]
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Re-indent a captured source snippet so its least indented line starts at column zero.
///
/// The shared indentation width is the smallest indentation among non-blank lines.
/// Exactly that many columns are removed from every non-blank line and a single
/// trailing line terminator is dropped. Whitespace-only lines always become
/// empty, even when there is no shared indentation.
/// Relative indentation and internal blank lines are preserved.
///
/// # Example
/// ```
/// use docent::normalize_source;
///
/// let raw = "    def key?(key)\n      super(key)\n    end\n";
/// assert_eq!(normalize_source(raw), "def key?(key)\n  super(key)\nend");
/// ```
pub fn normalize_source(raw: &str) -> String {
    let text = strip_line_terminator(raw);

    let width = text
        .split('\n')
        .filter(|line| !is_blank(line))
        .map(indentation_width)
        .min()
        .unwrap_or(0);

    let mut normalized = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            normalized.push('\n');
        }
        if is_blank(line) {
            normalized.push_str(line.trim_start_matches(is_indent_character));
        } else {
            normalized.push_str(strip_columns(line, width));
        }
    }
    normalized
}
