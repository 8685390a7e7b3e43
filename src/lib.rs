//! Listwindow: Windowed Loading for Server-Backed Lists
//!
//! Streams a large, server/storage-backed ordered collection into bounded
//! in-memory windows for scroll-driven consumption. A `GenerationFactory`
//! pairs a backing source with a `WindowLoadEngine` per generation and
//! marshals invalidation signals to an owner context so a consumer can
//! safely discard and replace stale loads when the underlying list changes.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod factory;
pub mod source;
pub mod types;
