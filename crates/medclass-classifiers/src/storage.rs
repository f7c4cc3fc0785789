//! Collaborator seams: item storage and record decoding
//!
//! The classification engine consumes items by address. Resolving an address
//! to bytes and decoding bytes into a record are jobs of the surrounding
//! platform; the engine only depends on these two traits.

use async_trait::async_trait;
use medclass_core::{Record, Result};

/// Resolver from item addresses to raw byte payloads.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the payload stored at the given address.
    ///
    /// Returns `Ok(None)` when no storage entry exists for the address.
    async fn fetch(&self, uri: &str) -> Result<Option<Vec<u8>>>;
}

/// Decoder from raw item bytes to the record type classifiers consume.
pub trait RecordDecoder: Send + Sync {
    /// Decode a payload into a record; failures are reported as
    /// [`medclass_core::Error::Decode`].
    fn decode(&self, bytes: &[u8]) -> Result<Record>;
}
