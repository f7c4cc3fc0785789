//! Prediction result records and conversions
//!
//! Dispatch produces a flat map of namespaced prediction keys to scores;
//! callers outside the dispatch layer consume collections of result records
//! addressed by `class://` identifier URIs. The conversions here go both
//! ways.

use crate::identifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One scored prediction, addressed by its identifier URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Identifier URI addressing this prediction
    pub uri: String,

    /// Prediction score, typically but not necessarily in `[0, 1]`
    pub score: f64,

    /// Additional key-value metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PredictionResult {
    /// Create a result with no metadata.
    pub fn new(uri: impl Into<String>, score: f64) -> Self {
        Self {
            uri: uri.into(),
            score,
            metadata: HashMap::new(),
        }
    }
}

/// Convert a classifier's map of predictions into result records.
///
/// Each `(key, score)` pair becomes one record addressed by
/// `class://<classifier_name>/<key>`. With namespaced keys of the form
/// `criterion#class` the resulting URI is a complete prediction identifier.
pub fn to_results(classifier_name: &str, predictions: &HashMap<String, f64>) -> Vec<PredictionResult> {
    predictions
        .iter()
        .map(|(key, score)| {
            PredictionResult::new(identifier::encode_keyed(classifier_name, key), *score)
        })
        .collect()
}

/// Collect result records back into a map of identifier URI to score.
pub fn to_scores(results: &[PredictionResult]) -> HashMap<String, f64> {
    results
        .iter()
        .map(|r| (r.uri.clone(), r.score))
        .collect()
}
