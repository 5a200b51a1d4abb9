use super::residue::Residue;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "parallel residue arrays differ in length: {sequence} sequence letters, {coordinates} coordinates, {confidences} confidence scores"
)]
pub struct LengthMismatchError {
    pub sequence: usize,
    pub coordinates: usize,
    pub confidences: usize,
}

/// One protein chain reduced to its alpha-carbon trace.
///
/// Every residue carries its coordinate, one-letter code and confidence
/// score together, so the three per-residue arrays can never disagree in
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub id: String,
    pub residues: Vec<Residue>,
}

impl Structure {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: Vec::new(),
        }
    }

    /// Builds a structure from parallel arrays, rejecting any length mismatch.
    pub fn from_parts(
        id: impl Into<String>,
        coordinates: Vec<[f64; 3]>,
        sequence: &str,
        confidences: Vec<f64>,
    ) -> Result<Self, LengthMismatchError> {
        let codes: Vec<char> = sequence.chars().collect();
        if codes.len() != coordinates.len() || coordinates.len() != confidences.len() {
            return Err(LengthMismatchError {
                sequence: codes.len(),
                coordinates: coordinates.len(),
                confidences: confidences.len(),
            });
        }

        let residues = codes
            .into_iter()
            .zip(coordinates)
            .zip(confidences)
            .map(|((code, position), confidence)| Residue::new(code, position, confidence))
            .collect();

        Ok(Self {
            id: id.into(),
            residues,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn coordinates(&self) -> Vec<[f64; 3]> {
        self.residues.iter().map(|r| r.position).collect()
    }

    pub fn sequence(&self) -> String {
        self.residues.iter().map(|r| r.code).collect()
    }

    pub fn confidences(&self) -> Vec<f64> {
        self.residues.iter().map(|r| r.confidence).collect()
    }
}
