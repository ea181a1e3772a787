//! Rerun detection.

/// Returns the part of `ordered` that still needs to be migrated.
///
/// GitHub numbers issues sequentially, so when the destination already holds
/// `existing` issues the first `existing` source issues (in migration order)
/// are assumed to be the ones an earlier run created. This only holds if
/// every earlier run used the same ordering and nobody created or deleted
/// issues on the destination in between.
#[must_use]
pub fn resolve_skip<T>(ordered: &[T], existing: usize) -> &[T] {
    ordered.get(existing..).unwrap_or_default()
}
