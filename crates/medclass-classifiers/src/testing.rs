//! Test support: canned classifiers and factories

use crate::classifier::{Classifier, Params, Predictions};
use crate::descriptor::ClassifierDescriptor;
use crate::registry::ClassifierFactory;
use async_trait::async_trait;
use medclass_core::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// A classifier that answers every criterion with a fixed prediction map.
pub struct StaticClassifier {
    predictions: Predictions,
}

impl StaticClassifier {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, f64)>) -> Self {
        Self {
            predictions: entries
                .into_iter()
                .map(|(class, score)| (class.to_string(), score))
                .collect(),
        }
    }
}

#[async_trait]
impl<P: Send + Sync> Classifier<P> for StaticClassifier {
    async fn predict(&self, _criterion: &str, _item: &P, _params: &Params) -> Result<Predictions> {
        Ok(self.predictions.clone())
    }
}

/// A classifier whose `predict` always fails.
pub struct FailingClassifier;

#[async_trait]
impl<P: Send + Sync> Classifier<P> for FailingClassifier {
    async fn predict(&self, criterion: &str, _item: &P, _params: &Params) -> Result<Predictions> {
        Err(Error::classifier(format!("cannot predict {}", criterion)))
    }
}

enum Canned {
    Scores(Vec<(&'static str, f64)>),
    Fails,
}

/// Factory producing canned classifiers by descriptor name.
///
/// Names without an entry get a classifier predicting `{"X": 1.0}`.
#[derive(Default)]
pub struct TestFactory {
    canned: HashMap<String, Canned>,
}

impl TestFactory {
    pub fn with(mut self, name: &str, entries: Vec<(&'static str, f64)>) -> Self {
        self.canned.insert(name.to_string(), Canned::Scores(entries));
        self
    }

    pub fn with_failing(mut self, name: &str) -> Self {
        self.canned.insert(name.to_string(), Canned::Fails);
        self
    }
}

#[async_trait]
impl<P: Send + Sync + 'static> ClassifierFactory<P> for TestFactory {
    async fn create(&self, descriptor: &ClassifierDescriptor) -> Result<Arc<dyn Classifier<P>>> {
        match self.canned.get(&descriptor.name) {
            Some(Canned::Scores(entries)) => {
                Ok(Arc::new(StaticClassifier::new(entries.iter().copied())))
            }
            Some(Canned::Fails) => Ok(Arc::new(FailingClassifier)),
            None => Ok(Arc::new(StaticClassifier::new([("X", 1.0)]))),
        }
    }
}
