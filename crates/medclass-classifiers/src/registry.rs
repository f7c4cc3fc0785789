//! Classifier registry with lazy instantiation
//!
//! The registry owns two coupled maps guarded by read/write locks: classifier
//! name to lazy handle, and criterion token to owning classifier name.
//! Instantiation is delegated to an injected [`ClassifierFactory`], so the
//! registry itself stays agnostic of how classifiers are built.

use crate::classifier::Classifier;
use crate::descriptor::ClassifierDescriptor;
use crate::lazy::LazyHandle;
use async_trait::async_trait;
use medclass_core::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Factory for instantiating classifiers from their descriptors.
#[async_trait]
pub trait ClassifierFactory<P: Send + Sync>: Send + Sync {
    /// Instantiate a new classifier according to the given descriptor.
    async fn create(&self, descriptor: &ClassifierDescriptor) -> Result<Arc<dyn Classifier<P>>>;
}

type Handle<P> = Arc<LazyHandle<dyn Classifier<P>>>;

/// Registry managing named classifiers and their criterion index.
///
/// Registering under an already-used name replaces that entry silently;
/// criterion claims of the replaced descriptor are not retracted, so a stale
/// criterion may keep pointing at the name until something re-registers it.
/// Criterion collisions between different names are diagnosed with a warning
/// and the later registrant wins.
pub struct ClassifierRegistry<P: Send + Sync + 'static> {
    factory: Arc<dyn ClassifierFactory<P>>,
    classifiers: RwLock<HashMap<String, Handle<P>>>,
    by_criterion: RwLock<HashMap<String, String>>,
}

impl<P: Send + Sync + 'static> ClassifierRegistry<P> {
    /// Create an empty registry delegating construction to the given factory.
    pub fn new(factory: Arc<dyn ClassifierFactory<P>>) -> Self {
        Self {
            factory,
            classifiers: RwLock::new(HashMap::new()),
            by_criterion: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new classifier by providing a descriptor for it.
    ///
    /// The descriptor is captured by a lazy handle; nothing is constructed
    /// unless `preload` is set, in which case a factory failure propagates
    /// and the classifier is left unregistered.
    pub async fn register(&self, descriptor: ClassifierDescriptor) -> Result<()> {
        let name = descriptor.name.clone();
        debug!("registering classifier {} ...", name);

        let descriptor = Arc::new(descriptor);
        let handle: Handle<P> = Arc::new(LazyHandle::new({
            let factory = Arc::clone(&self.factory);
            let descriptor = Arc::clone(&descriptor);
            move || {
                let factory = Arc::clone(&factory);
                let descriptor = Arc::clone(&descriptor);
                async move { factory.create(&descriptor).await }
            }
        }));

        if descriptor.preload {
            debug!("preloading classifier {} ...", name);
            handle.force_load().await?;
        }

        self.classifiers.write().await.insert(name.clone(), handle);

        let mut by_criterion = self.by_criterion.write().await;
        for criterion in &descriptor.criteria {
            if let Some(previous) = by_criterion.get(criterion) {
                if previous != &name {
                    warn!(
                        "classifier criterion collision! will use {} instead of {} for '{}'",
                        name, previous, criterion
                    );
                }
            }
            by_criterion.insert(criterion.clone(), name.clone());
        }
        Ok(())
    }

    /// Destroy a particular classifier instance, keeping its registration.
    pub async fn reset(&self, name: &str) -> Result<()> {
        self.handle(name).await?.reset().await;
        Ok(())
    }

    /// Destroy all classifier instances.
    pub async fn reset_all(&self) {
        let handles: Vec<Handle<P>> = self.classifiers.read().await.values().cloned().collect();
        for handle in handles {
            handle.reset().await;
        }
    }

    /// Force the initialization of the named classifier. A no-op if it is
    /// already loaded.
    pub async fn force_load(&self, name: &str) -> Result<()> {
        self.handle(name).await?.force_load().await
    }

    /// Retrieve a particular classifier by name.
    ///
    /// Returns the instance if loaded, or `None` if the classifier is
    /// registered but unloaded; never forces loading.
    pub async fn classifier_by_name(&self, name: &str) -> Result<Option<Arc<dyn Classifier<P>>>> {
        Ok(self.handle(name).await?.loaded().await)
    }

    /// Retrieve the classifier owning the given criterion, forcing its
    /// initialization.
    ///
    /// Returns `None` when no classifier claims the criterion; this is not an
    /// error condition.
    pub async fn classifier_by_criterion(
        &self,
        criterion: &str,
    ) -> Result<Option<Arc<dyn Classifier<P>>>> {
        let name = match self.criterion_owner(criterion).await {
            Some(name) => name,
            None => return Ok(None),
        };
        Ok(Some(self.handle(&name).await?.get().await?))
    }

    /// A snapshot of all classifiers already instantiated. Classifiers loaded
    /// after the call are not retroactively included.
    pub async fn loaded_classifiers(&self) -> Vec<Arc<dyn Classifier<P>>> {
        let handles: Vec<Handle<P>> = self.classifiers.read().await.values().cloned().collect();
        let mut loaded = Vec::new();
        for handle in handles {
            if let Some(classifier) = handle.loaded().await {
                loaded.push(classifier);
            }
        }
        loaded
    }

    /// The names of all registered classifiers, loaded or not.
    pub async fn classifier_names(&self) -> Vec<String> {
        self.classifiers.read().await.keys().cloned().collect()
    }

    /// Whether the named classifier is currently instantiated.
    pub async fn is_loaded(&self, name: &str) -> Result<bool> {
        Ok(self.handle(name).await?.is_loaded().await)
    }

    /// The name owning the given criterion, if any.
    pub(crate) async fn criterion_owner(&self, criterion: &str) -> Option<String> {
        self.by_criterion.read().await.get(criterion).cloned()
    }

    pub(crate) async fn handle(&self, name: &str) -> Result<Handle<P>> {
        self.classifiers
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Params, Predictions};
    use crate::testing::{StaticClassifier, TestFactory};

    fn registry() -> ClassifierRegistry<String> {
        ClassifierRegistry::new(Arc::new(TestFactory::default()))
    }

    #[tokio::test]
    async fn test_preload_loads_immediately() {
        let registry = registry();
        registry
            .register(ClassifierDescriptor::new("eager", ["modality"]).with_preload(true))
            .await
            .unwrap();
        assert!(registry.is_loaded("eager").await.unwrap());
    }

    #[tokio::test]
    async fn test_lazy_until_first_use() {
        let registry = registry();
        registry
            .register(ClassifierDescriptor::new("lazy", ["modality"]))
            .await
            .unwrap();
        assert!(!registry.is_loaded("lazy").await.unwrap());
        assert!(registry
            .classifier_by_name("lazy")
            .await
            .unwrap()
            .is_none());
        // probing by name never forces loading
        assert!(!registry.is_loaded("lazy").await.unwrap());

        registry.force_load("lazy").await.unwrap();
        assert!(registry.is_loaded("lazy").await.unwrap());
        assert!(registry
            .classifier_by_name("lazy")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_reset_returns_to_unloaded() {
        let registry = registry();
        registry
            .register(ClassifierDescriptor::new("c", ["modality"]).with_preload(true))
            .await
            .unwrap();
        registry.reset("c").await.unwrap();
        assert!(!registry.is_loaded("c").await.unwrap());

        registry.force_load("c").await.unwrap();
        assert!(registry.is_loaded("c").await.unwrap());
    }

    #[tokio::test]
    async fn test_unregistered_name_is_not_found() {
        let registry = registry();
        assert!(matches!(
            registry.reset("ghost").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            registry.force_load("ghost").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            registry.classifier_by_name("ghost").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_criterion_lookup_forces_load() {
        let registry = registry();
        registry
            .register(ClassifierDescriptor::new("c", ["modality"]))
            .await
            .unwrap();
        assert!(!registry.is_loaded("c").await.unwrap());

        let found = registry.classifier_by_criterion("modality").await.unwrap();
        assert!(found.is_some());
        assert!(registry.is_loaded("c").await.unwrap());

        // an unclaimed criterion is absence, not an error
        assert!(registry
            .classifier_by_criterion("nothing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_collision_later_registration_wins() {
        let registry = registry();
        registry
            .register(ClassifierDescriptor::new("first", ["modality"]))
            .await
            .unwrap();
        registry
            .register(ClassifierDescriptor::new("second", ["modality"]))
            .await
            .unwrap();

        assert_eq!(
            registry.criterion_owner("modality").await.as_deref(),
            Some("second")
        );
        let mut names = registry.classifier_names().await;
        names.sort();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_loaded_classifiers_snapshot() {
        let registry = registry();
        registry
            .register(ClassifierDescriptor::new("a", ["one"]).with_preload(true))
            .await
            .unwrap();
        registry
            .register(ClassifierDescriptor::new("b", ["two"]))
            .await
            .unwrap();
        assert_eq!(registry.loaded_classifiers().await.len(), 1);

        registry.force_load("b").await.unwrap();
        assert_eq!(registry.loaded_classifiers().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_preload_propagates() {
        struct FailingFactory;

        #[async_trait]
        impl ClassifierFactory<String> for FailingFactory {
            async fn create(
                &self,
                _descriptor: &ClassifierDescriptor,
            ) -> Result<Arc<dyn Classifier<String>>> {
                Err(Error::classifier("construction failed"))
            }
        }

        let registry: ClassifierRegistry<String> =
            ClassifierRegistry::new(Arc::new(FailingFactory));
        let outcome = registry
            .register(ClassifierDescriptor::new("broken", ["x"]).with_preload(true))
            .await;
        assert!(matches!(outcome, Err(Error::Classifier(_))));
        // the failed registration never made it into the name map
        assert!(registry.classifier_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_static_classifier_answers() {
        let classifier = StaticClassifier::new([("CT", 0.9)]);
        let prediction: Predictions = classifier
            .predict("modality", &"item".to_string(), &[] as &Params)
            .await
            .unwrap();
        assert_eq!(prediction.get("CT"), Some(&0.9));
    }
}
