//! Multi-criterion prediction dispatch
//!
//! A single `predict` call may name several comma-separated criteria. Each
//! token is resolved to its owning classifier through the criterion index and
//! dispatched independently; the per-classifier outcomes are merged into one
//! map under `"<classifier>#<class>"` keys so that equal class labels from
//! different classifiers never collide.

use crate::classifier::{Params, Predictions};
use crate::registry::ClassifierRegistry;
use medclass_core::{Error, Result};

impl<P: Clone + Send + Sync + 'static> ClassifierRegistry<P> {
    /// Perform a classification of the given item under one or more
    /// comma-separated criteria.
    ///
    /// Any token without an owning classifier fails the whole call with
    /// [`Error::InvalidCriterion`]; no partial result map is returned.
    /// Failures inside a classifier's `adapt`/`predict` propagate verbatim.
    /// An empty criteria string yields an empty map.
    pub async fn predict(&self, criteria: &str, item: &P, params: &Params) -> Result<Predictions> {
        let mut merged = Predictions::new();

        for token in criteria.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let name = self
                .criterion_owner(token)
                .await
                .ok_or_else(|| Error::invalid_criterion(token))?;
            let classifier = self.handle(&name).await?.get().await?;

            let adapted = classifier.adapt(item.clone());
            let prediction = classifier.predict(token, &adapted, params).await?;
            merge_predictions(&mut merged, &name, prediction);
        }
        Ok(merged)
    }
}

/// Merge one classifier's predictions into the aggregate map, namespacing
/// each class label with the classifier's name. A later merge for the same
/// aggregate key overwrites the earlier entry.
fn merge_predictions(merged: &mut Predictions, classifier_name: &str, prediction: Predictions) {
    for (class, score) in prediction {
        merged.insert(format!("{}#{}", classifier_name, class), score);
    }
}
