//! medclass Core
//!
//! Core types shared across medclass components:
//! - Prediction identifiers and their `class://` URI codec
//! - Decoded imaging records and attribute tag lookup
//! - Prediction result records and conversions
//! - Error types and result handling

pub mod error;
pub mod identifier;
pub mod record;
pub mod result;

pub use error::{Error, Result};
pub use identifier::PredictionIdentifier;
pub use record::{Element, MemoryTagDictionary, Record, TagDictionary};
pub use result::{to_results, to_scores, PredictionResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::identifier::PredictionIdentifier;
    pub use crate::record::{Element, Record, TagDictionary};
    pub use crate::result::PredictionResult;
}
