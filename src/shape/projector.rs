use super::config::{KmerSpread, ShapemerConfig};
use super::error::Error;
use super::invariants::{InvariantSet, extract};
use super::spatial::squared_distance;
use super::tokenize::tokenize;
use crate::model::types::SplitFamily;
use std::collections::HashMap;

/// Back-projects topic weights from shapemers onto residues.
///
/// Every KMER and RADIUS anchor of the whole chain is tokenised and looked
/// up in `weights` (absent tokens weigh zero). The weight is then spread
/// over the anchor's residues `j` as `weight * exp(-gamma * |c_anchor - c_j|^2)`.
/// KMER spreading follows [`KmerSpread`]; RADIUS weights always go to each
/// neighbourhood member. Chains too short for a KMER window only receive
/// RADIUS contributions.
///
/// The result is not normalised.
pub fn project_topic_weights(
    coords: &[[f64; 3]],
    weights: &HashMap<String, f64>,
    config: &ShapemerConfig,
) -> Result<Vec<f64>, Error> {
    let mut scores = vec![0.0; coords.len()];
    if coords.is_empty() {
        return Ok(scores);
    }

    let gamma = config.projection.gamma;

    match extract(coords, SplitFamily::Kmer, config.kmer.split_size as f64) {
        Ok(set) => accumulate(
            &mut scores,
            coords,
            &set,
            weights,
            config.kmer.resolution,
            gamma,
            config.projection.kmer_spread,
        ),
        Err(Error::SegmentTooShort { .. }) => {}
        Err(e) => return Err(e),
    }

    let set = extract(coords, SplitFamily::Radius, config.radius.split_size)?;
    accumulate(
        &mut scores,
        coords,
        &set,
        weights,
        config.radius.resolution,
        gamma,
        KmerSpread::Window,
    );

    Ok(scores)
}

fn accumulate(
    scores: &mut [f64],
    coords: &[[f64; 3]],
    set: &InvariantSet,
    weights: &HashMap<String, f64>,
    resolution: u32,
    gamma: f64,
    spread: KmerSpread,
) {
    let tokens = tokenize(set, resolution);
    for (anchor, (token, members)) in tokens.iter().zip(&set.split_indices).enumerate() {
        let weight = weights.get(&token.to_string()).copied().unwrap_or(0.0);
        if weight == 0.0 {
            continue;
        }
        for &j in members {
            let similarity = (-gamma * squared_distance(coords[anchor], coords[j])).exp();
            let target = match spread {
                KmerSpread::Window => j,
                KmerSpread::Anchor => anchor,
            };
            scores[target] += weight * similarity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shapemer::Shapemer;

    fn line(n: usize) -> Vec<[f64; 3]> {
        (0..n).map(|i| [i as f64 * 3.8, 0.0, 0.0]).collect()
    }

    fn all_tokens(coords: &[[f64; 3]], config: &ShapemerConfig) -> Vec<Shapemer> {
        let mut tokens = Vec::new();
        if let Ok(set) = extract(coords, SplitFamily::Kmer, config.kmer.split_size as f64) {
            tokens.extend(tokenize(&set, config.kmer.resolution));
        }
        let set = extract(coords, SplitFamily::Radius, config.radius.split_size).unwrap();
        tokens.extend(tokenize(&set, config.radius.resolution));
        tokens
    }

    fn weigh(tokens: &[Shapemer], family: SplitFamily, value: f64) -> HashMap<String, f64> {
        tokens
            .iter()
            .filter(|t| t.family == family)
            .map(|t| (t.to_string(), value))
            .collect()
    }

    #[test]
    fn single_residue_gets_self_similarity() {
        let config = ShapemerConfig::default();
        let weights = HashMap::from([("r0i0i0i0".to_string(), 2.5)]);
        let scores = project_topic_weights(&[[1.0, 2.0, 3.0]], &weights, &config).unwrap();
        assert_eq!(scores, vec![2.5]);
    }

    #[test]
    fn empty_chain_and_empty_weights() {
        let config = ShapemerConfig::default();
        assert!(project_topic_weights(&[], &HashMap::new(), &config).unwrap().is_empty());

        let scores = project_topic_weights(&line(30), &HashMap::new(), &config).unwrap();
        assert_eq!(scores, vec![0.0; 30]);
    }

    #[test]
    fn radius_weights_reach_every_neighbour() {
        let config = ShapemerConfig::default();
        let coords = line(3);
        let weights = weigh(&all_tokens(&coords, &config), SplitFamily::Radius, 1.0);
        let scores = project_topic_weights(&coords, &weights, &config).unwrap();

        let s1 = (-0.03f64 * 3.8 * 3.8).exp();
        let s2 = (-0.03f64 * 7.6 * 7.6).exp();
        assert!((scores[0] - (1.0 + s1 + s2)).abs() < 1e-12);
        assert!((scores[1] - (1.0 + 2.0 * s1)).abs() < 1e-12);
        assert!((scores[2] - scores[0]).abs() < 1e-12);
    }

    #[test]
    fn kmer_spread_modes_conserve_total_weight() {
        let mut config = ShapemerConfig::default();
        let coords = line(20);
        let weights = weigh(&all_tokens(&coords, &config), SplitFamily::Kmer, 1.0);

        let window = project_topic_weights(&coords, &weights, &config).unwrap();
        config.projection.kmer_spread = KmerSpread::Anchor;
        let anchor = project_topic_weights(&coords, &weights, &config).unwrap();

        assert_eq!(window.len(), 20);
        assert_eq!(anchor.len(), 20);
        let total_window: f64 = window.iter().sum();
        let total_anchor: f64 = anchor.iter().sum();
        assert!((total_window - total_anchor).abs() < 1e-9);

        // Only the five anchors carry weight in the legacy mode.
        assert!(anchor[..5].iter().all(|v| *v > 0.0));
        assert!(anchor[5..].iter().all(|v| *v == 0.0));
        // The last residue only belongs to the final window.
        assert!(window[19] > 0.0);
    }

    #[test]
    fn short_chain_skips_kmer_family() {
        let config = ShapemerConfig::default();
        let coords = line(10);
        let weights = weigh(&all_tokens(&coords, &config), SplitFamily::Kmer, 1.0);
        assert!(weights.is_empty());
        let scores = project_topic_weights(&coords, &weights, &config).unwrap();
        assert_eq!(scores, vec![0.0; 10]);
    }
}
