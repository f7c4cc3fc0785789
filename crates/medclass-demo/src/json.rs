//! JSON-backed demonstration collaborators
//!
//! Real deployments decode binary imaging formats; the demo reads records
//! from JSON objects keyed by symbolic attribute names, e.g.
//! `{"Modality": "CT", "ImageType": ["ORIGINAL", "PRIMARY", "AXIAL"]}`.

use async_trait::async_trait;
use medclass_classifiers::{RecordDecoder, Storage};
use medclass_core::record::TagDictionary;
use medclass_core::{Element, Error, Record, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Decoder for JSON-encoded records.
pub struct JsonRecordDecoder {
    dictionary: Arc<dyn TagDictionary>,
}

impl JsonRecordDecoder {
    pub fn new(dictionary: Arc<dyn TagDictionary>) -> Self {
        Self { dictionary }
    }

    fn element(value: &Value) -> Option<Element> {
        match value {
            Value::String(s) => Some(Element::text(s)),
            Value::Number(n) => Some(Element::new(vec![n.to_string()])),
            Value::Array(items) => Some(Element::new(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl RecordDecoder for JsonRecordDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Record> {
        let object: serde_json::Map<String, Value> = serde_json::from_slice(bytes)
            .map_err(|e| Error::decode(format!("not a JSON record: {}", e)))?;

        let mut record = Record::new();
        for (name, value) in &object {
            let Some(tag) = self.dictionary.tag_number(name) else {
                warn!("skipping unknown attribute {}", name);
                continue;
            };
            match Self::element(value) {
                Some(element) => {
                    record.insert(tag, element);
                }
                None => warn!("skipping unsupported value for {}", name),
            }
        }
        Ok(record)
    }
}

/// Storage over the local filesystem; addresses are plain paths or
/// `file://` URIs.
pub struct FileStorage;

#[async_trait]
impl Storage for FileStorage {
    async fn fetch(&self, uri: &str) -> Result<Option<Vec<u8>>> {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        if !Path::new(path).exists() {
            return Ok(None);
        }
        Ok(Some(tokio::fs::read(path).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medclass_core::record::{tags, MemoryTagDictionary};

    fn decoder() -> JsonRecordDecoder {
        JsonRecordDecoder::new(Arc::new(MemoryTagDictionary::with_standard_tags()))
    }

    #[test]
    fn test_decode_record() {
        let record = decoder()
            .decode(br#"{"Modality": "CT", "ImageType": ["ORIGINAL", "PRIMARY", "AXIAL"]}"#)
            .unwrap();
        assert_eq!(record.get(tags::MODALITY).unwrap().first(), Some("CT"));
        assert_eq!(
            record.get(tags::IMAGE_TYPE).unwrap().strings(),
            &["ORIGINAL", "PRIMARY", "AXIAL"]
        );
    }

    #[test]
    fn test_unknown_attributes_are_skipped() {
        let record = decoder()
            .decode(br#"{"Modality": "CT", "Mystery": "value"}"#)
            .unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        assert!(matches!(
            decoder().decode(b"not json"),
            Err(Error::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_file_storage() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        let stored = FileStorage
            .fetch(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(stored, Some(b"{}".to_vec()));

        let missing = FileStorage.fetch("/no/such/record.json").await.unwrap();
        assert!(missing.is_none());
    }
}
