use super::config::ShapemerConfig;
use super::error::Error;
use super::invariants::extract;
use super::segment::segment_by_confidence;
use super::tokenize::tokenize;
use crate::model::shapemer::Shapemer;
use crate::model::structure::Structure;
use crate::model::types::SplitFamily;
use log::debug;

/// Shapemers of every confident segment of a predicted structure.
///
/// Segments are visited in chain order; within a segment all KMER tokens
/// precede the RADIUS tokens. Returns `None` when no segment qualified, in
/// which case the structure does not belong in the corpus.
pub fn segment_shapemers(structure: &Structure, config: &ShapemerConfig) -> Result<Option<Vec<Shapemer>>, Error> {
    let segments = segment_by_confidence(&structure.confidences(), &config.segmentation);
    if segments.is_empty() {
        debug!("{}: no segment above the confidence threshold", structure.id);
        return Ok(None);
    }

    let coords = structure.coordinates();
    let mut tokens = Vec::new();
    for segment in &segments {
        tokens.extend(coords_shapemers(&coords[segment.range()], config)?);
    }

    debug!(
        "{}: {} segment(s), {} shapemers",
        structure.id,
        segments.len(),
        tokens.len()
    );
    Ok(Some(tokens))
}

/// Shapemers of a whole chain without confidence segmentation.
pub fn chain_shapemers(structure: &Structure, config: &ShapemerConfig) -> Result<Vec<Shapemer>, Error> {
    if structure.is_empty() {
        return Ok(Vec::new());
    }
    coords_shapemers(&structure.coordinates(), config)
}

fn coords_shapemers(coords: &[[f64; 3]], config: &ShapemerConfig) -> Result<Vec<Shapemer>, Error> {
    let mut tokens = match extract(coords, SplitFamily::Kmer, config.kmer.split_size as f64) {
        Ok(set) => tokenize(&set, config.kmer.resolution),
        Err(Error::SegmentTooShort { len, window }) => {
            debug!("{len} residues cannot hold a {window}-residue window; no KMER shapemers");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let radius = extract(coords, SplitFamily::Radius, config.radius.split_size)?;
    tokens.extend(tokenize(&radius, config.radius.resolution));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CorpusWriter;

    fn helix(n: usize, confidence: f64) -> Structure {
        let coords = (0..n)
            .map(|i| {
                let t = i as f64 * 100f64.to_radians();
                [2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64]
            })
            .collect();
        let sequence = "A".repeat(n);
        Structure::from_parts("AF-P12345-F1-model_v1.pdb", coords, &sequence, vec![confidence; n]).unwrap()
    }

    #[test]
    fn end_to_end_single_segment_corpus() {
        let config = ShapemerConfig::default();
        let structure = helix(100, 90.0);

        let tokens = segment_shapemers(&structure, &config).unwrap().unwrap();
        let kmer = tokens.iter().filter(|t| t.family == SplitFamily::Kmer).count();
        let radius = tokens.iter().filter(|t| t.family == SplitFamily::Radius).count();
        assert_eq!(kmer, 100 - 16 + 1);
        assert_eq!(radius, 100);
        assert!(tokens[..kmer].iter().all(|t| t.family == SplitFamily::Kmer));

        let mut corpus = CorpusWriter::new(Vec::new());
        assert!(corpus.write_document(&structure.id, &tokens).unwrap());
        let text = String::from_utf8(corpus.finish().unwrap()).unwrap();

        assert_eq!(text.lines().count(), 1);
        let (id, body) = text.trim_end().split_once('\t').unwrap();
        assert_eq!(id, "AF-P12345-F1-model_v1.pdb");
        assert_eq!(body.split(' ').filter(|t| t.starts_with('k')).count(), 85);
        assert!(body.split(' ').any(|t| t.starts_with('r')));
    }

    #[test]
    fn low_confidence_structure_is_omitted() {
        let config = ShapemerConfig::default();
        assert_eq!(segment_shapemers(&helix(100, 50.0), &config).unwrap(), None);
    }

    #[test]
    fn confident_chain_at_or_below_length_threshold_is_omitted() {
        let config = ShapemerConfig::default();
        assert_eq!(config.segmentation.length_threshold, 50);
        assert_eq!(segment_shapemers(&helix(30, 95.0), &config).unwrap(), None);
    }

    #[test]
    fn short_segments_still_yield_radius_tokens() {
        let mut config = ShapemerConfig::default();
        config.segmentation.length_threshold = 5;
        let tokens = segment_shapemers(&helix(12, 95.0), &config).unwrap().unwrap();
        assert_eq!(tokens.len(), 12);
        assert!(tokens.iter().all(|t| t.family == SplitFamily::Radius));
    }

    #[test]
    fn chain_shapemers_ignore_confidence() {
        let config = ShapemerConfig::default();
        let tokens = chain_shapemers(&helix(20, 0.0), &config).unwrap();
        assert_eq!(tokens.len(), 5 + 20);
        assert!(chain_shapemers(&Structure::new("empty"), &config).unwrap().is_empty());
    }

    #[test]
    fn identical_geometry_gives_identical_tokens() {
        let config = ShapemerConfig::default();
        let a = chain_shapemers(&helix(40, 90.0), &config).unwrap();
        let b = chain_shapemers(&helix(40, 90.0), &config).unwrap();
        assert_eq!(a, b);
    }
}
