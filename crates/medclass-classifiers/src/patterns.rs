//! Pattern-based record classifier
//!
//! Matches a configured attribute's values against a set of substring
//! patterns, one class label per pattern. Pattern matches are binary: every
//! class whose pattern occurs in the attribute scores 1.0.

use crate::classifier::{Classifier, Params, Predictions};
use crate::descriptor::ClassifierDescriptor;
use crate::registry::ClassifierFactory;
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use medclass_core::record::{Record, TagDictionary};
use medclass_core::{Error, Result};
use serde::Deserialize;
use std::sync::Arc;

/// Fast pattern-based classifier using the Aho-Corasick algorithm.
pub struct PatternClassifier {
    tag: u32,
    matcher: AhoCorasick,
    labels: Vec<String>,
}

impl PatternClassifier {
    /// Create a classifier matching the given attribute tag against
    /// `(class label, pattern)` pairs.
    pub fn new(tag: u32, patterns: Vec<(String, String)>) -> Result<Self> {
        let (labels, pattern_strs): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&pattern_strs)
            .map_err(|e| Error::classifier(format!("failed to build pattern matcher: {}", e)))?;

        Ok(Self {
            tag,
            matcher,
            labels,
        })
    }
}

#[async_trait]
impl Classifier<Record> for PatternClassifier {
    async fn predict(
        &self,
        _criterion: &str,
        item: &Record,
        _params: &Params,
    ) -> Result<Predictions> {
        let mut predictions = Predictions::new();
        if let Some(element) = item.get(self.tag) {
            for value in element.strings() {
                for mat in self.matcher.find_iter(value) {
                    let label = &self.labels[mat.pattern().as_usize()];
                    predictions.insert(label.clone(), 1.0);
                }
            }
        }
        Ok(predictions)
    }
}

/// Construction parameters of a [`PatternClassifier`], as carried in a
/// descriptor's `params`.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternParams {
    /// Symbolic name of the attribute to match against
    pub attribute: String,

    /// Class label to substring pattern
    pub patterns: Vec<PatternSpec>,
}

/// One class-to-pattern association.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternSpec {
    pub class: String,
    pub pattern: String,
}

/// Factory building [`PatternClassifier`]s from descriptors.
pub struct PatternClassifierFactory {
    dictionary: Arc<dyn TagDictionary>,
}

impl PatternClassifierFactory {
    pub fn new(dictionary: Arc<dyn TagDictionary>) -> Self {
        Self { dictionary }
    }
}

#[async_trait]
impl ClassifierFactory<Record> for PatternClassifierFactory {
    async fn create(&self, descriptor: &ClassifierDescriptor) -> Result<Arc<dyn Classifier<Record>>> {
        let params: PatternParams = serde_json::from_value(descriptor.params.clone())
            .map_err(|e| Error::config(format!("bad pattern params for {}: {}", descriptor.name, e)))?;
        let tag = self.dictionary.tag_number(&params.attribute).ok_or_else(|| {
            Error::config(format!(
                "unknown attribute {} for {}",
                params.attribute, descriptor.name
            ))
        })?;
        let patterns = params
            .patterns
            .into_iter()
            .map(|p| (p.class, p.pattern))
            .collect();
        Ok(Arc::new(PatternClassifier::new(tag, patterns)?))
    }
}
