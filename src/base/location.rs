use std::fmt;
use std::sync::Arc;

/// A declaration site: the file an entity was declared in and the line
/// (1-indexed, as reported by the scanner) where the declaration starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub file: Arc<str>,
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<Arc<str>>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl<F: Into<Arc<str>>> From<(F, usize)> for Location {
    fn from((file, line): (F, usize)) -> Self {
        Self::new(file, line)
    }
}
