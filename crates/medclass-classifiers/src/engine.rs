//! Classification engine: registry plus storage collaborators
//!
//! The engine is the outer surface handed to the surrounding platform. It
//! accepts items either as already-decoded records or as storage addresses,
//! and follows a best-effort contract: items that cannot be fetched or
//! decoded produce no predictions instead of failing the call.

use crate::classifier::{Params, Predictions};
use crate::condition::Condition;
use crate::registry::ClassifierRegistry;
use crate::storage::{RecordDecoder, Storage};
use medclass_core::{to_results, PredictionResult, Record, Result};
use std::sync::Arc;
use tracing::warn;

/// An item to classify: a storage address or an already-decoded record.
#[derive(Debug, Clone)]
pub enum QueryItem {
    Uri(String),
    Record(Record),
}

impl From<Record> for QueryItem {
    fn from(record: Record) -> Self {
        QueryItem::Record(record)
    }
}

impl From<&str> for QueryItem {
    fn from(uri: &str) -> Self {
        QueryItem::Uri(uri.to_owned())
    }
}

/// Classification engine composing a registry with storage collaborators.
pub struct ClassificationEngine {
    name: String,
    registry: ClassifierRegistry<Record>,
    storage: Arc<dyn Storage>,
    decoder: Arc<dyn RecordDecoder>,
    gate: Option<Box<dyn Condition>>,
}

impl ClassificationEngine {
    /// Create an engine named `name` over the given registry and
    /// collaborators. The name namespaces the identifier URIs of `query`
    /// results.
    pub fn new(
        name: impl Into<String>,
        registry: ClassifierRegistry<Record>,
        storage: Arc<dyn Storage>,
        decoder: Arc<dyn RecordDecoder>,
    ) -> Self {
        Self {
            name: name.into(),
            registry,
            storage,
            decoder,
            gate: None,
        }
    }

    /// Gate classification of fetched items on a condition; records failing
    /// the condition silently produce no predictions.
    pub fn with_gate(mut self, gate: Box<dyn Condition>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// The engine's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying classifier registry.
    pub fn registry(&self) -> &ClassifierRegistry<Record> {
        &self.registry
    }

    /// Classify the item stored at the given address.
    ///
    /// A missing storage entry or an undecodable payload degrades to an
    /// empty prediction map; dispatch errors (unknown criterion, classifier
    /// failure) still propagate.
    pub async fn predict_uri(
        &self,
        criteria: &str,
        uri: &str,
        params: &Params,
    ) -> Result<Predictions> {
        let bytes = match self.storage.fetch(uri).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                warn!("no storage entry for {}", uri);
                return Ok(Predictions::new());
            }
            Err(e) => {
                warn!("failed to fetch {} for {}: {}", uri, criteria, e);
                return Ok(Predictions::new());
            }
        };
        let record = match self.decoder.decode(&bytes) {
            Ok(record) => record,
            Err(e) => {
                warn!("ignoring undecodable item {}: {}", uri, e);
                return Ok(Predictions::new());
            }
        };
        if let Some(gate) = &self.gate {
            if !gate.test(&record) {
                return Ok(Predictions::new());
            }
        }
        self.registry.predict(criteria, &record, params).await
    }

    /// Perform a classification and return result records addressed by
    /// identifier URIs.
    ///
    /// Any failure, including dispatch failures, is logged and degrades to an
    /// empty collection.
    pub async fn query(
        &self,
        criteria: &str,
        item: QueryItem,
        params: &Params,
    ) -> Vec<PredictionResult> {
        let outcome = match item {
            QueryItem::Uri(uri) => self.predict_uri(criteria, &uri, params).await,
            QueryItem::Record(record) => self.registry.predict(criteria, &record, params).await,
        };
        match outcome {
            Ok(predictions) => to_results(&self.name, &predictions),
            Err(e) => {
                warn!("classification for {} failed: {}", criteria, e);
                Vec::new()
            }
        }
    }
}
