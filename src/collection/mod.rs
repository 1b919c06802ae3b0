
use serde_json::Value;

use crate::chunker::chunk;
use crate::error::Result;
use crate::graph::RecordHost;
use crate::options::CollectionOptions;
use crate::types::{
    CollectionRecord, Item, PageRecord, Record, RecordId, RecordKind, RecordMeta,
};

/// Builds the page and collection records for `items` and persists them
/// through the host.
///
/// Page ids are assigned for every chunk before any linking happens, so each
/// page's cursor fields reference ids that already exist on its neighbors.
/// Pages are persisted in index order, then the collection that references
/// them, so a consumer resolving `page_ids` right after creation finds every
/// page in place.
pub fn create_paginated_collection<H>(
    host: &H,
    items: Vec<Item>,
    options: &CollectionOptions,
) -> Result<CollectionRecord>
where
    H: RecordHost + ?Sized,
{
    options.validate()?;

    let collection_id = host.generate_id(&format!("Collection:{}", options.name));

    let mut chunks = chunk(options.page_size, items)?;
    // A collection always carries at least one page, even over an empty set.
    if chunks.is_empty() {
        chunks.push(Vec::new());
    }

    // First pass: an id for every page, so links can point at real neighbors.
    let page_ids: Vec<RecordId> = (0..chunks.len())
        .map(|index| host.generate_id(&format!("Page:{}:{}", options.name, index)))
        .collect();

    let pages: Vec<PageRecord> = chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk_items)| build_page(host, &collection_id, &page_ids, index, chunk_items))
        .collect();

    for page in &pages {
        host.create_record(Record::Page(page.clone()))?;
    }

    let total_item_count = pages.iter().map(|page| page.item_count).sum();
    let digest = host.generate_digest(&serde_json::to_value(&pages)?);

    let collection = CollectionRecord {
        id: collection_id,
        name: options.name.clone(),
        page_size: options.page_size,
        first_page_size: pages[0].item_count,
        last_page_size: pages[pages.len() - 1].item_count,
        total_item_count,
        page_count: pages.len(),
        page_ids,
        internal: RecordMeta::new(RecordKind::Collection, digest),
    };

    host.create_record(Record::Collection(collection.clone()))?;

    Ok(collection)
}

/// Second pass: link one page against the full id list and digest its items.
fn build_page<H>(
    host: &H,
    collection_id: &RecordId,
    page_ids: &[RecordId],
    index: usize,
    items: Vec<Item>,
) -> PageRecord
where
    H: RecordHost + ?Sized,
{
    let next_page = page_ids.get(index + 1).cloned();
    let previous_page = index.checked_sub(1).and_then(|i| page_ids.get(i).cloned());

    let digest = host.generate_digest(&Value::Array(
        items.iter().cloned().map(Value::Object).collect(),
    ));

    PageRecord {
        id: page_ids[index].clone(),
        collection: collection_id.clone(),
        index,
        has_next_page: next_page.is_some(),
        next_page,
        has_previous_page: previous_page.is_some(),
        previous_page,
        item_count: items.len(),
        items,
        internal: RecordMeta::new(RecordKind::Page, digest),
    }
}
