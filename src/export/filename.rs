use std::fmt;

use crate::types::PageRecord;

/// How the output filename stem for a page file is chosen.
pub enum FilenameStrategy {
    /// The page's id.
    Id,
    /// The page's index, as a decimal string.
    Index,
    /// A caller-supplied function over the page record.
    Custom(Box<dyn Fn(&PageRecord) -> String + Send + Sync>),
}

impl FilenameStrategy {
    /// Compute the filename stem (no extension) for a page.
    pub fn stem(&self, page: &PageRecord) -> String {
        match self {
            FilenameStrategy::Id => page.id.clone(),
            FilenameStrategy::Index => page.index.to_string(),
            FilenameStrategy::Custom(f) => f(page),
        }
    }
}

impl Default for FilenameStrategy {
    fn default() -> Self {
        FilenameStrategy::Id
    }
}

impl fmt::Debug for FilenameStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameStrategy::Id => f.write_str("Id"),
            FilenameStrategy::Index => f.write_str("Index"),
            FilenameStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
