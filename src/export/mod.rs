mod filename;


pub use filename::FilenameStrategy;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::graph::RecordHost;
use crate::pipeline::PostBuildHook;
use crate::types::{CollectionRecord, PageRecord, Record, RecordId};

/// Default directory for exported page files, relative to the host's output
/// root.
pub const DEFAULT_EXPORT_PATH: &str = "paginated-collections";

/// Cross-reference fields that can be inlined into exported page JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expand {
    NextPage,
    PreviousPage,
    Collection,
}

/// Writes one JSON file per page of `collection` into `directory`.
///
/// The directory is created first (recursively, idempotent); page writes
/// then fan out in parallel, each to its own distinct file. All writes are
/// allowed to settle and the first failure in page order is returned;
/// already-written files are left in place.
pub fn export_collection<H>(
    host: &H,
    collection: &CollectionRecord,
    directory: &Path,
    expand: &[Expand],
    filename: &FilenameStrategy,
) -> Result<()>
where
    H: RecordHost + ?Sized,
{
    fs::create_dir_all(directory).map_err(|source| Error::Filesystem {
        path: directory.to_path_buf(),
        source,
    })?;

    let results: Vec<Result<()>> = collection
        .page_ids
        .par_iter()
        .map(|page_id| export_page(host, page_id, directory, expand, filename))
        .collect();

    for result in results {
        result?;
    }

    log::debug!(
        "Exported {} page files for \"{}\" to {}",
        collection.page_count,
        collection.name,
        directory.display()
    );

    Ok(())
}

fn export_page<H>(
    host: &H,
    page_id: &RecordId,
    directory: &Path,
    expand: &[Expand],
    filename: &FilenameStrategy,
) -> Result<()>
where
    H: RecordHost + ?Sized,
{
    let page = resolve_page(host, page_id)?;

    let mut value = serde_json::to_value(&page)?;
    strip_bookkeeping(&mut value);
    for field in expand {
        apply_expansion(host, &page, *field, &mut value)?;
    }

    let stem = filename.stem(&page);
    let path = directory.join(format!("{stem}.json"));
    let contents = serde_json::to_vec(&value)?;
    fs::write(&path, contents).map_err(|source| Error::Filesystem {
        path: path.clone(),
        source,
    })?;

    Ok(())
}

fn resolve_page<H>(host: &H, page_id: &RecordId) -> Result<PageRecord>
where
    H: RecordHost + ?Sized,
{
    match host.get_record(page_id) {
        Some(Record::Page(page)) => Ok(page),
        Some(Record::Collection(_)) | None => Err(Error::MissingRecord(page_id.clone())),
    }
}

/// Drop host-internal metadata so the exported JSON is self-contained.
fn strip_bookkeeping(value: &mut Value) {
    if let Some(object) = value.as_object_mut() {
        object.remove("internal");
    }
}

/// Replace one bare id reference with the resolved record.
fn apply_expansion<H>(
    host: &H,
    page: &PageRecord,
    field: Expand,
    value: &mut Value,
) -> Result<()>
where
    H: RecordHost + ?Sized,
{
    let (key, target) = match field {
        Expand::NextPage => ("nextPage", page.next_page.as_ref()),
        Expand::PreviousPage => ("previousPage", page.previous_page.as_ref()),
        Expand::Collection => ("collection", Some(&page.collection)),
    };

    // Pages without the link keep the field absent.
    let Some(id) = target else {
        return Ok(());
    };

    let record = host
        .get_record(id)
        .ok_or_else(|| Error::MissingRecord(id.clone()))?;

    let mut expanded = serde_json::to_value(&record)?;
    if let Some(object) = expanded.as_object_mut() {
        object.remove("internal");
        // Inlined neighbors keep their link and count shape, not their items.
        object.remove("items");
    }

    if let Some(object) = value.as_object_mut() {
        object.insert(key.to_string(), expanded);
    }

    Ok(())
}

/// The file-export half of the plugin pair, packaged as a post-build hook.
///
/// Writes every page of the built collection to
/// `<output_root>/<path>/<stem>.json` once the collection records exist.
pub struct JsonFilesExporter {
    output_root: PathBuf,
    path: PathBuf,
    expand: Vec<Expand>,
    filename: FilenameStrategy,
}

impl JsonFilesExporter {
    /// Create an exporter rooted at the host's output directory.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            path: PathBuf::from(DEFAULT_EXPORT_PATH),
            expand: Vec::new(),
            filename: FilenameStrategy::Id,
        }
    }

    /// Directory for page files, relative to the output root.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Cross-reference fields to inline into each page file.
    pub fn expand(mut self, fields: impl IntoIterator<Item = Expand>) -> Self {
        self.expand = fields.into_iter().collect();
        self
    }

    /// Filename strategy for page files.
    pub fn filename(mut self, filename: FilenameStrategy) -> Self {
        self.filename = filename;
        self
    }

    fn directory(&self) -> PathBuf {
        self.output_root.join(&self.path)
    }
}

impl PostBuildHook for JsonFilesExporter {
    fn name(&self) -> &str {
        "json-files"
    }

    fn on_post_create(
        &self,
        collection: &CollectionRecord,
        host: &dyn RecordHost,
    ) -> anyhow::Result<()> {
        export_collection(
            host,
            collection,
            &self.directory(),
            &self.expand,
            &self.filename,
        )?;
        Ok(())
    }
}
