//! Backing source contract for windowed lists.
//!
//! Varying backing entity types (orders, notes, media, ...) map onto one
//! generic capability the engine is generic over, rather than a hierarchy
//! per entity. A source is created per generation and exclusively owned by
//! that generation's engine; it is never shared across generations.

use crate::error::SourceError;
use async_trait::async_trait;

/// One generation's view of the backing collection.
#[async_trait]
pub trait ListWindowSource: Send + Sync {
    type Item: Send + 'static;

    /// Current best-known total count. May differ across generations.
    async fn total_size(&self) -> Result<usize, SourceError>;

    /// Fetch the items in `[start, end)`, in list order.
    ///
    /// The engine never invokes this with `start == end`; implementations
    /// must still return an empty sequence for an empty range rather than
    /// failing. Retries are this layer's responsibility, not the engine's.
    async fn items_in_range(&self, start: usize, end: usize) -> Result<Vec<Self::Item>, SourceError>;
}
