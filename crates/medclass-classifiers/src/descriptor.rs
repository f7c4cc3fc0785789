//! Classifier descriptors
//!
//! A descriptor carries everything needed to instantiate a classifier later:
//! its unique name, the criterion tokens it answers, whether to instantiate
//! eagerly on registration, and classifier-specific construction parameters.
//! Descriptors are immutable once registered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Registration-time configuration fully parameterizing a classifier's
/// deferred construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierDescriptor {
    /// Unique name for the classifier
    pub name: String,

    /// Criterion tokens this classifier answers, usually the names of its
    /// prediction class families
    pub criteria: BTreeSet<String>,

    /// Whether to instantiate the classifier immediately on registration
    #[serde(default)]
    pub preload: bool,

    /// Classifier-specific construction parameters, interpreted by the
    /// factory
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ClassifierDescriptor {
    /// Create a descriptor with the given name and criteria, no preload and
    /// no parameters.
    pub fn new(
        name: impl Into<String>,
        criteria: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            criteria: criteria.into_iter().map(Into::into).collect(),
            preload: false,
            params: serde_json::Value::Null,
        }
    }

    /// Request eager instantiation on registration.
    pub fn with_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    /// Attach construction parameters.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}
