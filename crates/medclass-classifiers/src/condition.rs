//! Record condition predicates
//!
//! Conditions are boolean predicates over decoded records, used to gate
//! classifiers on the items they can meaningfully classify. Attribute
//! conditions resolve symbolic tag names through an injected
//! [`TagDictionary`]; an absent tag or element makes the predicate false,
//! never an error.

use crate::orientation::AxialType;
use medclass_core::record::{Element, Record, TagDictionary};
use medclass_core::{Error, Result};
use regex::Regex;
use std::sync::Arc;

/// A boolean predicate over decoded records.
pub trait Condition: Send + Sync {
    fn test(&self, record: &Record) -> bool;
}

impl<F> Condition for F
where
    F: Fn(&Record) -> bool + Send + Sync,
{
    fn test(&self, record: &Record) -> bool {
        self(record)
    }
}

/// Factory for attribute-based conditions, bound to a tag dictionary.
#[derive(Clone)]
pub struct AttributeConditions {
    dictionary: Arc<dyn TagDictionary>,
}

impl AttributeConditions {
    /// Create a condition factory resolving tag names through the given
    /// dictionary.
    pub fn new(dictionary: Arc<dyn TagDictionary>) -> Self {
        Self { dictionary }
    }

    /// True when the attribute's first value matches the regular expression.
    pub fn matches(&self, tag: &str, regex: &str) -> Result<Box<dyn Condition>> {
        let pattern = Regex::new(regex)
            .map_err(|e| Error::config(format!("invalid condition pattern: {}", e)))?;
        Ok(self.on_element(tag, move |element| {
            element
                .first()
                .map(|value| pattern.is_match(value))
                .unwrap_or(false)
        }))
    }

    /// True when the attribute's first value equals the given string, both
    /// sides trimmed.
    pub fn equals_str(&self, tag: &str, value: &str) -> Box<dyn Condition> {
        let expected = value.trim().to_owned();
        self.on_element(tag, move |element| {
            element.first().map(|v| v == expected).unwrap_or(false)
        })
    }

    /// True when the attribute's first value parses to the given integer.
    pub fn equals_int(&self, tag: &str, value: i64) -> Box<dyn Condition> {
        self.on_element(tag, move |element| element.int() == Some(value))
    }

    /// True when the attribute is present and non-empty.
    pub fn exists(&self, tag: &str) -> Box<dyn Condition> {
        self.on_element(tag, |element| !element.is_empty())
    }

    fn on_element<F>(&self, tag: &str, pred: F) -> Box<dyn Condition>
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        let dictionary = Arc::clone(&self.dictionary);
        let tag = tag.to_owned();
        Box::new(move |record: &Record| {
            dictionary
                .tag_number(&tag)
                .and_then(|number| record.get(number))
                .map(|element| pred(element))
                .unwrap_or(false)
        })
    }
}

/// True when the record is a CT axial image of the given kind.
pub fn axial_type_equals(axial_type: AxialType) -> impl Condition {
    move |record: &Record| AxialType::of_ct(record) == Some(axial_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medclass_core::record::{tags, MemoryTagDictionary};

    fn conditions() -> AttributeConditions {
        AttributeConditions::new(Arc::new(MemoryTagDictionary::with_standard_tags()))
    }

    fn ct_record() -> Record {
        let mut record = Record::new();
        record.put_text(tags::MODALITY, "CT");
        record.put_text(tags::SERIES_DESCRIPTION, "HEAD W/O CONTRAST");
        record
    }

    #[test]
    fn test_equals_str() {
        let cond = conditions().equals_str("Modality", "CT");
        assert!(cond.test(&ct_record()));

        let cond = conditions().equals_str("Modality", "MR");
        assert!(!cond.test(&ct_record()));
    }

    #[test]
    fn test_matches() {
        let cond = conditions().matches("SeriesDescription", r"^HEAD\b.*").unwrap();
        assert!(cond.test(&ct_record()));

        let cond = conditions().matches("SeriesDescription", r"^CHEST\b.*").unwrap();
        assert!(!cond.test(&ct_record()));

        assert!(conditions().matches("Modality", "(unclosed").is_err());
    }

    #[test]
    fn test_exists() {
        assert!(conditions().exists("Modality").test(&ct_record()));
        // absent attribute and unknown tag name are both plain false
        assert!(!conditions().exists("BodyPartExamined").test(&ct_record()));
        assert!(!conditions().exists("NoSuchAttribute").test(&ct_record()));
    }

    #[test]
    fn test_equals_int() {
        let mut record = Record::new();
        record.put_text(tags::MODALITY, "3");
        assert!(conditions().equals_int("Modality", 3).test(&record));
        assert!(!conditions().equals_int("Modality", 4).test(&record));
    }

    #[test]
    fn test_axial_type_condition() {
        let mut record = ct_record();
        record.put_text(tags::IMAGE_TYPE, "ORIGINAL\\PRIMARY\\AXIAL");
        record.put_floats(
            tags::IMAGE_ORIENTATION_PATIENT,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        );

        assert!(axial_type_equals(AxialType::Transverse).test(&record));
        assert!(!axial_type_equals(AxialType::Sagittal).test(&record));
        assert!(!axial_type_equals(AxialType::Transverse).test(&ct_record()));
    }
}
