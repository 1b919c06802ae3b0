use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Record, RecordId};

/// Capability interface onto the host graph.
///
/// The builder and exporter never talk to the surrounding platform directly.
/// Id minting, content digests, and record storage are injected through this
/// trait, so the pagination logic can run against an in-memory graph just as
/// well as a real host.
pub trait RecordHost: Send + Sync {
    /// Mint a stable identifier for the given seed string.
    fn generate_id(&self, seed: &str) -> RecordId;

    /// Fingerprint content for change detection. Opaque to this crate.
    fn generate_digest(&self, content: &Value) -> String;

    /// Persist a record. It becomes resolvable by `get_record` immediately.
    fn create_record(&self, record: Record) -> Result<()>;

    /// Resolve a record by id.
    fn get_record(&self, id: &str) -> Option<Record>;
}

#[derive(Default)]
struct GraphInner {
    records: HashMap<RecordId, Record>,
    order: Vec<RecordId>,
}

/// In-memory record store.
///
/// Ids are UUIDv5 over the seed string and digests are hex-encoded SHA-256
/// of the serialized content, so the same input always produces the same
/// records. Creation order is tracked.
#[derive(Default)]
pub struct MemoryGraph {
    inner: RwLock<GraphInner>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records created so far.
    pub fn record_count(&self) -> usize {
        self.lock_read().records.len()
    }

    /// Record ids in creation order.
    pub fn created_ids(&self) -> Vec<RecordId> {
        self.lock_read().order.clone()
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, GraphInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordHost for MemoryGraph {
    fn generate_id(&self, seed: &str) -> RecordId {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
    }

    fn generate_digest(&self, content: &Value) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    fn create_record(&self, record: Record) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let id = record.id().clone();
        // Re-creating a record replaces it without duplicating the id.
        if inner.records.insert(id.clone(), record).is_none() {
            inner.order.push(id);
        }

        Ok(())
    }

    fn get_record(&self, id: &str) -> Option<Record> {
        self.lock_read().records.get(id).cloned()
    }
}
