//! Registration configuration for classifiers
//!
//! A YAML file describes the classifiers to register: their criteria,
//! preload flags, and construction parameters. Specs are keyed by classifier
//! name and registered in name order, so criterion contention between
//! configured classifiers resolves deterministically.

use crate::descriptor::ClassifierDescriptor;
use crate::registry::ClassifierRegistry;
use medclass_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Configuration for all classifiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiersConfig {
    /// Classifier specifications by name
    #[serde(default)]
    pub classifiers: BTreeMap<String, ClassifierSpec>,
}

/// One classifier's registration specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSpec {
    /// Criterion tokens the classifier answers
    pub criteria: Vec<String>,

    /// Whether to instantiate eagerly on registration
    #[serde(default)]
    pub preload: bool,

    /// Construction parameters passed through to the factory
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ClassifiersConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        serde_yaml::from_str(&text)
            .map_err(|e| Error::config(format!("failed to parse classifiers config: {}", e)))
    }

    /// Convert the specs into registration descriptors, in name order.
    pub fn to_descriptors(&self) -> Vec<ClassifierDescriptor> {
        self.classifiers
            .iter()
            .map(|(name, spec)| {
                ClassifierDescriptor::new(name, spec.criteria.iter().cloned())
                    .with_preload(spec.preload)
                    .with_params(spec.params.clone())
            })
            .collect()
    }

    /// Register every configured classifier, continuing past individual
    /// failures. Returns the number of successful registrations.
    pub async fn register_all<P: Send + Sync + 'static>(
        &self,
        registry: &ClassifierRegistry<P>,
    ) -> usize {
        let mut registered = 0;
        for descriptor in self.to_descriptors() {
            let name = descriptor.name.clone();
            match registry.register(descriptor).await {
                Ok(()) => {
                    registered += 1;
                }
                Err(e) => {
                    warn!("failed to register classifier {}: {}", name, e);
                }
            }
        }
        info!(
            "registered {}/{} configured classifiers",
            registered,
            self.classifiers.len()
        );
        registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestFactory;
    use std::io::Write;
    use std::sync::Arc;

    const CONFIG: &str = r#"
classifiers:
  modality-patterns:
    criteria: [modality]
    preload: true
    params:
      attribute: Modality
  region-patterns:
    criteria: [region, "body/part"]
"#;

    #[test]
    fn test_parse() {
        let config: ClassifiersConfig = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(config.classifiers.len(), 2);

        let modality = &config.classifiers["modality-patterns"];
        assert!(modality.preload);
        assert_eq!(modality.params["attribute"], "Modality");

        let region = &config.classifiers["region-patterns"];
        assert!(!region.preload);
        assert_eq!(region.criteria, ["region", "body/part"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = ClassifiersConfig::from_file(file.path()).unwrap();
        assert_eq!(config.classifiers.len(), 2);

        assert!(ClassifiersConfig::from_file("/no/such/config.yaml").is_err());
    }

    #[tokio::test]
    async fn test_register_all() {
        let config: ClassifiersConfig = serde_yaml::from_str(CONFIG).unwrap();
        let registry = ClassifierRegistry::<String>::new(Arc::new(TestFactory::default()));

        assert_eq!(config.register_all(&registry).await, 2);
        assert!(registry.is_loaded("modality-patterns").await.unwrap());
        assert!(!registry.is_loaded("region-patterns").await.unwrap());
        assert!(registry
            .classifier_by_criterion("body/part")
            .await
            .unwrap()
            .is_some());
    }
}
