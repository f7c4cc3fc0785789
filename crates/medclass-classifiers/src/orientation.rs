//! Axial orientation of CT image records

use medclass_core::record::{tags, Record};
use medclass_core::{Error, Result};
use std::str::FromStr;

/// The kind of axial image of a CT record, derived from its
/// ImageOrientationPatient direction cosines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxialType {
    Transverse,
    Coronal,
    Sagittal,
    Oblique,
}

const TRANSVERSE_VECTOR: [f64; 6] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
const SAGITTAL_VECTOR: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
const CORONAL_VECTOR: [f64; 6] = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0];

const TOLERANCE: f64 = 1e-8;

impl AxialType {
    /// Obtain the kind of axial image of a CT record.
    ///
    /// Returns `None` unless the record declares an `AXIAL` image type and
    /// carries patient orientation cosines. Orientations matching none of the
    /// canonical planes are reported as [`AxialType::Oblique`].
    pub fn of_ct(record: &Record) -> Option<AxialType> {
        let image_type = record.get(tags::IMAGE_TYPE)?;
        if !image_type.strings().iter().any(|v| v.trim() == "AXIAL") {
            return None;
        }

        let orientation = record.get(tags::IMAGE_ORIENTATION_PATIENT)?.floats()?;
        if abs_equals(&orientation, &TRANSVERSE_VECTOR, TOLERANCE) {
            return Some(AxialType::Transverse);
        }
        if abs_equals(&orientation, &CORONAL_VECTOR, TOLERANCE) {
            return Some(AxialType::Coronal);
        }
        if abs_equals(&orientation, &SAGITTAL_VECTOR, TOLERANCE) {
            return Some(AxialType::Sagittal);
        }
        Some(AxialType::Oblique)
    }
}

/// Component-wise comparison of absolute values within a tolerance.
/// Orientation cosines keep their plane under sign flips.
fn abs_equals(a: &[f64], b: &[f64], delta: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.abs() - y.abs()).abs() <= delta)
}

impl FromStr for AxialType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "transverse" => Ok(AxialType::Transverse),
            "coronal" => Ok(AxialType::Coronal),
            "sagittal" => Ok(AxialType::Sagittal),
            "oblique" => Ok(AxialType::Oblique),
            other => Err(Error::config(format!("unknown axial type: {}", other))),
        }
    }
}
