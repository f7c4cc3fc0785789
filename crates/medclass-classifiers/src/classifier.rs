//! Classifier trait and common types

use async_trait::async_trait;
use medclass_core::Result;
use std::collections::HashMap;

/// Opaque positional parameters forwarded to classifiers on each call.
pub type Params = [serde_json::Value];

/// Mapping from predicted class label to score.
pub type Predictions = HashMap<String, f64>;

/// Trait for all classifiers.
///
/// `P` is the datapoint type the classifier consumes; the registry and
/// dispatch layers treat it as opaque.
#[async_trait]
pub trait Classifier<P: Send + Sync>: Send + Sync {
    /// Perform a classification of the given item under one criterion.
    ///
    /// Returns a mapping of predictions, where the key is the class label and
    /// the value is the respective score.
    async fn predict(&self, criterion: &str, item: &P, params: &Params) -> Result<Predictions>;

    /// Adjust the datapoint to this classifier's specifications
    /// (e.g. image dimensions). The default is the identity.
    fn adapt(&self, item: P) -> P {
        item
    }
}
