// Public API exports
pub mod chunker;
pub mod collection;
pub mod error;
pub mod export;
pub mod graph;
pub mod options;
pub mod pipeline;
pub mod types;

// Re-export main types for convenience
pub use chunker::chunk;
pub use collection::create_paginated_collection;
pub use error::{Error, Result};
pub use export::{
    export_collection, Expand, FilenameStrategy, JsonFilesExporter, DEFAULT_EXPORT_PATH,
};
pub use graph::{MemoryGraph, RecordHost};
pub use options::{CollectionOptions, DEFAULT_PAGE_SIZE};
pub use pipeline::{paginate, PostBuildHook, QueryResult};
pub use types::{
    CollectionRecord, Item, PageRecord, Record, RecordId, RecordKind, RecordMeta, OWNER,
};
