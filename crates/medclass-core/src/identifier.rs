//! Structured identifiers for scored predictions
//!
//! A prediction identifier addresses one scored outcome of a classification:
//! the URI `class://my-classifier/modality#CT` names the prediction of class
//! `CT` by the classifier `my-classifier` under the criterion `modality`.
//! Criteria may be hierarchical paths such as `body/part`.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The URI scheme used by prediction identifiers
pub const SCHEME: &str = "class";

lazy_static! {
    static ref PREDICTION: Regex =
        Regex::new(r"^([^:/?#]+)/([^:/?#]+(?:/[^:/?#]+)*)#([^:/?#]+)$")
            .expect("prediction identifier pattern is valid");
}

/// A (classifier name, criterion, prediction class) triple addressing one
/// scored outcome.
///
/// Equality and hashing are structural over the three fields. Fields are
/// expected to be non-empty and free of `:`, `/`, `?` and `#`, except that
/// the criterion may contain internal `/` separators; a triple violating this
/// still encodes, but the resulting URI will not decode back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PredictionIdentifier {
    classifier_name: String,
    criterion: String,
    prediction_class: String,
}

impl PredictionIdentifier {
    /// Create a new prediction identifier from its three components.
    pub fn new(
        classifier_name: impl Into<String>,
        criterion: impl Into<String>,
        prediction_class: impl Into<String>,
    ) -> Self {
        Self {
            classifier_name: classifier_name.into(),
            criterion: criterion.into(),
            prediction_class: prediction_class.into(),
        }
    }

    /// The unique name of the classifier that produced the prediction.
    pub fn classifier_name(&self) -> &str {
        &self.classifier_name
    }

    /// The classification criterion, possibly a `/`-joined path.
    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    /// The predicted class label.
    pub fn prediction_class(&self) -> &str {
        &self.prediction_class
    }

    /// Parse an identifier URI of the form `class://name/criterion#class`.
    ///
    /// The scheme is compared case-insensitively; the remaining components
    /// are never case-normalized. Returns [`Error::InvalidFormat`] when the
    /// scheme is wrong or the remainder does not match the identifier
    /// grammar.
    pub fn decompose(uri: &str) -> Result<Self> {
        let rest = strip_scheme(uri)
            .ok_or_else(|| Error::invalid_format(format!("bad scheme in \"{}\"", uri)))?;
        let captures = PREDICTION.captures(rest).ok_or_else(|| {
            Error::invalid_format(format!("URI \"{}\" is not in a valid format", uri))
        })?;
        Ok(Self {
            classifier_name: captures[1].to_owned(),
            criterion: captures[2].to_owned(),
            prediction_class: captures[3].to_owned(),
        })
    }

    /// Encode this identifier as its URI string.
    pub fn uri(&self) -> String {
        encode(&self.classifier_name, &self.criterion, &self.prediction_class)
    }
}

/// Encode a (name, criterion, class) triple as an identifier URI.
pub fn encode(classifier_name: &str, criterion: &str, prediction_class: &str) -> String {
    format!(
        "{}://{}/{}#{}",
        SCHEME, classifier_name, criterion, prediction_class
    )
}

/// Encode a classifier name and an opaque remainder as an identifier URI.
///
/// The remainder is usually a namespaced prediction key such as
/// `modality#CT`, which makes the full URI decomposable.
pub fn encode_keyed(classifier_name: &str, rest: &str) -> String {
    format!("{}://{}/{}", SCHEME, classifier_name, rest)
}

/// Strip a case-insensitive `class://` prefix, returning the remainder.
fn strip_scheme(uri: &str) -> Option<&str> {
    let (scheme, rest) = uri.split_once("://")?;
    if scheme.eq_ignore_ascii_case(SCHEME) {
        Some(rest)
    } else {
        None
    }
}

impl fmt::Display for PredictionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}#{}",
            SCHEME, self.classifier_name, self.criterion, self.prediction_class
        )
    }
}

impl FromStr for PredictionIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decompose(s)
    }
}

impl From<PredictionIdentifier> for String {
    fn from(id: PredictionIdentifier) -> String {
        id.uri()
    }
}

impl TryFrom<String> for PredictionIdentifier {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::decompose(&s)
    }
}
