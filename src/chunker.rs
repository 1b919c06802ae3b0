use crate::error::{Error, Result};

/// Splits a sequence into groups of the provided size.
///
/// Order is preserved within and across chunks. If the sequence cannot be
/// split evenly, the final chunk holds the remaining elements. An empty
/// input produces no chunks; callers that need a page for an empty set own
/// that policy themselves.
pub fn chunk<T>(size: usize, items: Vec<T>) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(Error::InvalidArgument(
            "chunk size must be a positive integer".to_string(),
        ));
    }

    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut current = Vec::with_capacity(size.min(items.len()));

    for item in items {
        current.push(item);
        if current.len() == size {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }

    // Flush the remainder
    if !current.is_empty() {
        chunks.push(current);
    }

    Ok(chunks)
}
