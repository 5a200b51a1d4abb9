use crate::model::structure::Structure;

/// Per-structure confidence statistics for dataset overviews.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSummary {
    pub id: String,
    pub median_confidence: f64,
    pub length: usize,
    /// Residues with confidence strictly above the threshold.
    pub confident_length: usize,
}

/// Statistics are taken over the alpha-carbon trace, one confidence per
/// residue. Medians over every atom of a model would weight residues by their
/// atom count instead.
pub fn summarize(structure: &Structure, threshold: f64) -> StructureSummary {
    let confidences = structure.confidences();
    StructureSummary {
        id: structure.id.clone(),
        median_confidence: median(&confidences),
        length: confidences.len(),
        confident_length: confidences.iter().filter(|c| **c > threshold).count(),
    }
}

/// Median with the two middle values averaged for even counts; zero when empty.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
