use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque content unit supplied by the caller's normalizer.
pub type Item = serde_json::Map<String, Value>;

/// Identifier minted by the host graph.
pub type RecordId = String;

/// Owner tag stamped on every record this crate creates.
pub const OWNER: &str = "pagemill";

/// Record type tags used for host bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "PaginatedCollection")]
    Collection,
    #[serde(rename = "PaginatedCollectionPage")]
    Page,
}

/// Host bookkeeping attached to every record.
///
/// Not part of the semantic collection/page shape; the file exporter strips
/// it before writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub content_digest: String,
    pub owner: String,
}

impl RecordMeta {
    pub fn new(kind: RecordKind, content_digest: String) -> Self {
        Self {
            kind,
            content_digest,
            owner: OWNER.to_string(),
        }
    }
}

/// One fixed-size slice of a collection, with cursor links to its neighbors.
///
/// Pages form a doubly linked chain ordered by `index`: page 0 has no
/// previous page, the last page has no next page, and `has_next_page` /
/// `has_previous_page` mirror the presence of the corresponding id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: RecordId,
    /// Id of the collection this page belongs to.
    pub collection: RecordId,
    /// 0-based position of this page within the collection.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub next_page: Option<RecordId>,
    pub has_next_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub previous_page: Option<RecordId>,
    pub has_previous_page: bool,
    pub item_count: usize,
    pub items: Vec<Item>,
    pub internal: RecordMeta,
}

/// Summary record over an item sequence split into pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub id: RecordId,
    pub name: String,
    /// Configured maximum number of items per page.
    pub page_size: usize,
    /// Measured size of the first page.
    pub first_page_size: usize,
    /// Measured size of the last page.
    pub last_page_size: usize,
    pub total_item_count: usize,
    pub page_count: usize,
    /// Page ids in index order.
    pub page_ids: Vec<RecordId>,
    pub internal: RecordMeta,
}

/// Any record this crate materializes in the host graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Page(PageRecord),
    Collection(CollectionRecord),
}

impl Record {
    pub fn id(&self) -> &RecordId {
        match self {
            Record::Page(page) => &page.id,
            Record::Collection(collection) => &collection.id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Page(page) => page.internal.kind,
            Record::Collection(collection) => collection.internal.kind,
        }
    }
}
