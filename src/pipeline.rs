use serde_json::Value;

use crate::collection::create_paginated_collection;
use crate::error::{Error, Result};
use crate::graph::RecordHost;
use crate::options::CollectionOptions;
use crate::types::{CollectionRecord, Item};

/// Outcome of the host's query facility.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Resolved query data, if any.
    pub data: Option<Value>,
    /// Errors reported by the query layer. Non-empty means the query failed.
    pub errors: Vec<String>,
}

impl QueryResult {
    /// A successful result carrying `data`.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed result carrying query errors.
    pub fn with_errors(errors: Vec<String>) -> Self {
        Self {
            data: None,
            errors,
        }
    }
}

/// A consumer invoked after the collection records exist.
///
/// Hooks run in registration order. A failing hook is reported and skipped;
/// it aborts neither the pipeline nor the hooks after it.
pub trait PostBuildHook: Send + Sync {
    /// Name used when reporting hook failures.
    fn name(&self) -> &str;

    /// Called once with the built collection and the host that owns its
    /// records.
    fn on_post_create(
        &self,
        collection: &CollectionRecord,
        host: &dyn RecordHost,
    ) -> anyhow::Result<()>;
}

/// Runs the full pagination pipeline for one collection.
///
/// Executes `query`, normalizes its result into items, builds the page and
/// collection records, then invokes each post-build hook. Query and
/// normalization failures abort before any record is created.
pub fn paginate<Q, N>(
    host: &dyn RecordHost,
    options: &CollectionOptions,
    query: Q,
    normalizer: N,
    hooks: &[Box<dyn PostBuildHook>],
) -> Result<CollectionRecord>
where
    Q: FnOnce() -> QueryResult,
    N: FnOnce(&QueryResult) -> Value,
{
    options.validate()?;

    let query_result = query();
    if !query_result.errors.is_empty() {
        log::error!(
            "The provided query for \"{}\" contains errors. Pagination records will not be created.",
            options.name
        );
        return Err(Error::Query {
            name: options.name.clone(),
            message: query_result.errors.join("; "),
        });
    }

    let items = normalize_items(&options.name, normalizer(&query_result))?;

    if items.is_empty() {
        log::warn!(
            "No items for \"{}\" were returned. Pagination records will be created on an empty set.",
            options.name
        );
    }

    let collection = create_paginated_collection(host, items, options)?;

    for hook in hooks {
        if let Err(error) = hook.on_post_create(&collection, host) {
            log::error!(
                "Post-build hook \"{}\" failed for \"{}\": {:#}",
                hook.name(),
                options.name,
                error
            );
        }
    }

    Ok(collection)
}

/// Checks that the normalizer produced a sequence of items before any
/// chunking happens.
fn normalize_items(name: &str, value: Value) -> Result<Vec<Item>> {
    let entries = match value {
        Value::Array(entries) => entries,
        _ => {
            log::error!(
                "The normalizer function for \"{name}\" did not return an array. Pagination records will not be created."
            );
            return Err(Error::Normalization {
                name: name.to_string(),
                reason: "result is not an array".to_string(),
            });
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(item) => Ok(item),
            _ => Err(Error::Normalization {
                name: name.to_string(),
                reason: format!("element {index} is not an object"),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::graph::MemoryGraph;

    struct RecordingHook {
        label: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl PostBuildHook for RecordingHook {
        fn name(&self) -> &str {
            self.label
        }

        fn on_post_create(
            &self,
            collection: &CollectionRecord,
            _host: &dyn RecordHost,
        ) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.label, collection.name));
            if self.fail {
                anyhow::bail!("hook failure");
            }
            Ok(())
        }
    }

    fn item_normalizer(result: &QueryResult) -> Value {
        result.data.clone().unwrap_or(Value::Null)
    }

    #[test]
    fn test_builds_collection_from_query_data() {
        let graph = MemoryGraph::new();
        let options = CollectionOptions::new("posts").page_size(2);

        let collection = paginate(
            &graph,
            &options,
            || QueryResult::with_data(json!([{ "foo": 1 }, { "foo": 2 }, { "foo": 3 }])),
            item_normalizer,
            &[],
        )
        .unwrap();

        assert_eq!(collection.page_count, 2);
        assert_eq!(collection.total_item_count, 3);
        // Two pages plus the collection itself.
        assert_eq!(graph.record_count(), 3);
    }

    #[test]
    fn test_query_errors_abort_before_any_record() {
        let graph = MemoryGraph::new();
        let options = CollectionOptions::new("posts");

        let result = paginate(
            &graph,
            &options,
            || QueryResult::with_errors(vec!["bad field".to_string()]),
            item_normalizer,
            &[],
        );

        assert!(matches!(result, Err(Error::Query { .. })));
        assert_eq!(graph.record_count(), 0);
    }

    #[test]
    fn test_non_array_normalizer_aborts_before_any_record() {
        let graph = MemoryGraph::new();
        let options = CollectionOptions::new("posts");

        let result = paginate(
            &graph,
            &options,
            || QueryResult::with_data(json!({ "not": "an array" })),
            item_normalizer,
            &[],
        );

        assert!(matches!(result, Err(Error::Normalization { .. })));
        assert_eq!(graph.record_count(), 0);
    }

    #[test]
    fn test_non_object_element_aborts_before_any_record() {
        let graph = MemoryGraph::new();
        let options = CollectionOptions::new("posts");

        let result = paginate(
            &graph,
            &options,
            || QueryResult::with_data(json!([{ "foo": 1 }, 42])),
            item_normalizer,
            &[],
        );

        assert!(matches!(result, Err(Error::Normalization { .. })));
        assert_eq!(graph.record_count(), 0);
    }

    #[test]
    fn test_empty_items_still_build_a_collection() {
        let graph = MemoryGraph::new();
        let options = CollectionOptions::new("posts");

        let collection = paginate(
            &graph,
            &options,
            || QueryResult::with_data(json!([])),
            item_normalizer,
            &[],
        )
        .unwrap();

        assert_eq!(collection.page_count, 1);
        assert_eq!(collection.total_item_count, 0);
    }

    #[test]
    fn test_hooks_run_in_order_and_failures_are_isolated() {
        let graph = MemoryGraph::new();
        let options = CollectionOptions::new("posts");
        let calls = Arc::new(Mutex::new(Vec::new()));

        let hooks: Vec<Box<dyn PostBuildHook>> = vec![
            Box::new(RecordingHook {
                label: "first",
                calls: Arc::clone(&calls),
                fail: true,
            }),
            Box::new(RecordingHook {
                label: "second",
                calls: Arc::clone(&calls),
                fail: false,
            }),
        ];

        let result = paginate(
            &graph,
            &options,
            || QueryResult::with_data(json!([{ "foo": 1 }])),
            item_normalizer,
            &hooks,
        );

        // The failing first hook affects neither the pipeline result nor the
        // second hook.
        assert!(result.is_ok());
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["first:posts".to_string(), "second:posts".to_string()]
        );
    }
}
