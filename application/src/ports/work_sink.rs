//! Work sink port
//!
//! Receives work items drained from the coordinator's pending queue.

use edrr_domain::WorkItem;

/// Destination for drained coordinator work
///
/// The tiered memory manager implements this and buffers the items until
/// its next `flush_pending`.
pub trait WorkSink: Send + Sync {
    fn accept(&self, item: WorkItem);
}
