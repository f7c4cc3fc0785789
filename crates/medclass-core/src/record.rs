//! Decoded imaging records and attribute tag lookup
//!
//! A [`Record`] is the opaque datapoint handed to classifiers: a flat map of
//! numeric attribute tags to their values, as produced by a record decoder.
//! It deliberately carries no knowledge of the underlying binary format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known attribute tags, in the DICOM `(group,element)` packing.
pub mod tags {
    pub const IMAGE_TYPE: u32 = 0x0008_0008;
    pub const SOP_CLASS_UID: u32 = 0x0008_0016;
    pub const MODALITY: u32 = 0x0008_0060;
    pub const STUDY_DESCRIPTION: u32 = 0x0008_1030;
    pub const SERIES_DESCRIPTION: u32 = 0x0008_103E;
    pub const BODY_PART_EXAMINED: u32 = 0x0018_0015;
    pub const IMAGE_ORIENTATION_PATIENT: u32 = 0x0020_0037;
}

/// A single record attribute: one or more string values.
///
/// Multi-valued attributes keep their values in order; numeric attributes are
/// parsed on access rather than at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    values: Vec<String>,
}

impl Element {
    /// Create an element from raw values.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Create an element from backslash-separated text, the conventional
    /// multi-value encoding of imaging records.
    pub fn text(value: impl AsRef<str>) -> Self {
        Self {
            values: value.as_ref().split('\\').map(str::to_owned).collect(),
        }
    }

    /// All values of this element, in order.
    pub fn strings(&self) -> &[String] {
        &self.values
    }

    /// The first value, trimmed, if any.
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(|v| v.trim())
    }

    /// The first value parsed as an integer.
    pub fn int(&self) -> Option<i64> {
        self.first()?.parse().ok()
    }

    /// All values parsed as floats; `None` if any value fails to parse.
    pub fn floats(&self) -> Option<Vec<f64>> {
        self.values
            .iter()
            .map(|v| v.trim().parse().ok())
            .collect()
    }

    /// Whether this element holds no non-empty value.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }
}

/// A decoded imaging record: attribute tag to element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    elements: HashMap<u32, Element>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under the given tag, replacing any previous one.
    pub fn insert(&mut self, tag: u32, element: Element) -> &mut Self {
        self.elements.insert(tag, element);
        self
    }

    /// Insert a textual attribute, splitting backslash-separated values.
    pub fn put_text(&mut self, tag: u32, value: impl AsRef<str>) -> &mut Self {
        self.insert(tag, Element::text(value))
    }

    /// Insert a numeric multi-valued attribute.
    pub fn put_floats(&mut self, tag: u32, values: &[f64]) -> &mut Self {
        self.insert(
            tag,
            Element::new(values.iter().map(|v| v.to_string()).collect()),
        )
    }

    /// Look up an element by tag.
    pub fn get(&self, tag: u32) -> Option<&Element> {
        self.elements.get(&tag)
    }

    /// The number of attributes in this record.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the record holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Lookup service resolving symbolic attribute names to numeric tags.
///
/// Condition predicates and decoders take this as an injected dependency;
/// there is no process-wide dictionary instance.
pub trait TagDictionary: Send + Sync {
    /// Resolve a symbolic attribute name, e.g. `"Modality"`, to its tag.
    fn tag_number(&self, name: &str) -> Option<u32>;
}

/// In-memory tag dictionary.
#[derive(Debug, Clone, Default)]
pub struct MemoryTagDictionary {
    entries: HashMap<String, u32>,
}

impl MemoryTagDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dictionary preloaded with the well-known tags of [`tags`].
    pub fn with_standard_tags() -> Self {
        let mut dict = Self::new();
        dict.define("ImageType", tags::IMAGE_TYPE);
        dict.define("SOPClassUID", tags::SOP_CLASS_UID);
        dict.define("Modality", tags::MODALITY);
        dict.define("StudyDescription", tags::STUDY_DESCRIPTION);
        dict.define("SeriesDescription", tags::SERIES_DESCRIPTION);
        dict.define("BodyPartExamined", tags::BODY_PART_EXAMINED);
        dict.define("ImageOrientationPatient", tags::IMAGE_ORIENTATION_PATIENT);
        dict
    }

    /// Define a symbolic name for a tag.
    pub fn define(&mut self, name: impl Into<String>, tag: u32) -> &mut Self {
        self.entries.insert(name.into(), tag);
        self
    }
}

impl TagDictionary for MemoryTagDictionary {
    fn tag_number(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }
}
