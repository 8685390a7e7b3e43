//! Identity types for lists and generations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing identity of one (source, engine) generation.
///
/// Issued by a [`crate::factory::GenerationFactory`]; ids are never reused
/// within a factory. Every load result is tagged with the id of the
/// generation that produced it, so a consumer can discard results from a
/// superseded generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GenerationId(u64);

impl GenerationId {
    /// Build an id from a raw counter value. Normally issued by a factory;
    /// exposed for driving a [`crate::engine::WindowLoadEngine`] directly.
    pub fn from_raw(raw: u64) -> Self {
        GenerationId(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity derived from a descriptor's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescriptorId([u8; 32]);

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", blake3::Hash::from(self.0).to_hex())
    }
}

/// Opaque, immutable identity and parameters for "which list".
///
/// Created once by the consumer and held for the lifetime of the list.
/// Two descriptors with the same type, filter and sort identify the same
/// logical list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListDescriptor {
    list_type: String,
    filter: Option<String>,
    sort: Option<String>,
}

impl ListDescriptor {
    pub fn new(list_type: impl Into<String>) -> Self {
        ListDescriptor {
            list_type: list_type.into(),
            filter: None,
            sort: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn list_type(&self) -> &str {
        &self.list_type
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Identity of the list type alone, ignoring filter and sort.
    pub fn type_identifier(&self) -> DescriptorId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.list_type.as_bytes());
        DescriptorId(*hasher.finalize().as_bytes())
    }

    /// Identity of the full descriptor: type plus filter and sort.
    pub fn unique_identifier(&self) -> DescriptorId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.list_type.as_bytes());
        hasher.update(&[0]);
        hash_opt(&mut hasher, self.filter.as_deref());
        hash_opt(&mut hasher, self.sort.as_deref());
        DescriptorId(*hasher.finalize().as_bytes())
    }
}

// Length-prefix free encoding: a presence byte keeps None distinct from
// Some("") and a separator byte keeps field boundaries unambiguous.
fn hash_opt(hasher: &mut blake3::Hasher, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update(&[1]);
            hasher.update(v.as_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    hasher.update(&[0]);
}
