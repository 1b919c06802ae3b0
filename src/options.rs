use crate::error::{Error, Result};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for building one paginated collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOptions {
    /// Collection identity. Required, non-empty.
    pub name: String,
    /// Maximum number of items per page.
    pub page_size: usize,
    /// Recognized override for the size of the first page. Defaults to
    /// `page_size`. Chunking applies a uniform `page_size`; this value is
    /// validated and carried but does not change how pages are cut.
    pub first_page_size: Option<usize>,
}

impl CollectionOptions {
    /// Create options for the named collection with default sizing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_size: DEFAULT_PAGE_SIZE,
            first_page_size: None,
        }
    }

    /// Set the maximum number of items per page.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the first-page size override.
    pub fn first_page_size(mut self, size: usize) -> Self {
        self.first_page_size = Some(size);
        self
    }

    /// Check the options before any pagination work happens.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidArgument(
                "collection name must not be empty".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::InvalidArgument(
                "page size must be a positive integer".to_string(),
            ));
        }

        if self.first_page_size == Some(0) {
            return Err(Error::InvalidArgument(
                "first page size must be a positive integer".to_string(),
            ));
        }

        Ok(())
    }
}
