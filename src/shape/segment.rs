use super::config::SegmentationConfig;
use crate::model::segment::Segment;

/// Splits a chain into confidently predicted stretches.
///
/// Scores are Gaussian-smoothed, thresholded at
/// `confidence_threshold` (inclusive) and every maximal run of confident
/// residues longer than `length_threshold` becomes a [`Segment`].
pub fn segment_by_confidence(scores: &[f64], config: &SegmentationConfig) -> Vec<Segment> {
    let smoothed = gaussian_filter1d(scores, config.sigma, config.truncate);

    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, value) in smoothed.iter().enumerate() {
        let confident = *value >= config.confidence_threshold;
        match (confident, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                push_if_long(&mut segments, start, i, config.length_threshold);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        push_if_long(&mut segments, start, smoothed.len(), config.length_threshold);
    }

    segments
}

fn push_if_long(segments: &mut Vec<Segment>, start: usize, stop: usize, threshold: usize) {
    if stop - start > threshold {
        segments.push(Segment::new(start, stop));
    }
}

/// One-dimensional Gaussian filter with mirrored (`d c b a | a b c d | d c b a`) edges.
///
/// The kernel spans `round(truncate * sigma)` samples either side and is
/// normalised to sum to one. A non-positive `sigma` returns the input unchanged.
pub fn gaussian_filter1d(values: &[f64], sigma: f64, truncate: f64) -> Vec<f64> {
    if values.is_empty() || sigma <= 0.0 {
        return values.to_vec();
    }

    let kernel = gaussian_kernel(sigma, truncate);
    let radius = (kernel.len() / 2) as isize;
    let n = values.len();

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let offset = k as isize - radius;
                    w * values[reflect(i as isize + offset, n)]
                })
                .sum()
        })
        .collect()
}

fn gaussian_kernel(sigma: f64, truncate: f64) -> Vec<f64> {
    let radius = (truncate * sigma + 0.5) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let total: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= total;
    }
    kernel
}

fn reflect(index: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = index.rem_euclid(period) as usize;
    if m < n { m } else { 2 * n - 1 - m }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SegmentationConfig {
        SegmentationConfig::default()
    }

    #[test]
    fn uniform_high_confidence_is_one_segment() {
        let segments = segment_by_confidence(&[90.0; 120], &config());
        assert_eq!(segments, vec![Segment::new(0, 120)]);
    }

    #[test]
    fn uniform_low_confidence_has_no_segments() {
        assert!(segment_by_confidence(&[40.0; 120], &config()).is_empty());
    }

    #[test]
    fn empty_scores_have_no_segments() {
        assert!(segment_by_confidence(&[], &config()).is_empty());
    }

    #[test]
    fn length_threshold_is_strict() {
        let exact = segment_by_confidence(&[90.0; 50], &config());
        assert!(exact.is_empty());
        let longer = segment_by_confidence(&[90.0; 51], &config());
        assert_eq!(longer, vec![Segment::new(0, 51)]);
    }

    #[test]
    fn low_confidence_gap_splits_chain() {
        let mut scores = vec![95.0; 200];
        for s in &mut scores[90..110] {
            *s = 20.0;
        }
        let segments = segment_by_confidence(&scores, &config());

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[1].stop, 200);
        assert!(segments[0].stop < 90 + 5 && segments[0].stop > 80);
        assert!(segments[1].start > 105 && segments[1].start < 120);
        assert!(segments[0].stop <= segments[1].start);
    }

    #[test]
    fn segmentation_is_idempotent() {
        let scores: Vec<f64> = (0..300).map(|i| 60.0 + 30.0 * ((i as f64) / 25.0).sin()).collect();
        let first = segment_by_confidence(&scores, &config());
        let second = segment_by_confidence(&scores, &config());
        assert_eq!(first, second);
    }

    #[test]
    fn smoothing_preserves_constants_and_mass() {
        let flat = gaussian_filter1d(&[3.0; 7], 5.0, 4.0);
        assert!(flat.iter().all(|v| (v - 3.0).abs() < 1e-12));

        let kernel = gaussian_kernel(5.0, 4.0);
        assert_eq!(kernel.len(), 41);
        assert!((kernel.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reflect_mirrors_including_edge() {
        // d c b a | a b c d | d c b a
        let idx: Vec<usize> = (-4..8).map(|i| reflect(i, 4)).collect();
        assert_eq!(idx, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(reflect(-7, 1), 0);
    }

    #[test]
    fn spike_spreads_symmetrically() {
        let mut values = vec![0.0; 41];
        values[20] = 1.0;
        let smoothed = gaussian_filter1d(&values, 2.0, 4.0);
        assert!((smoothed[18] - smoothed[22]).abs() < 1e-15);
        assert!(smoothed[20] > smoothed[19]);
    }

    #[test]
    fn zero_sigma_disables_smoothing() {
        let values = [1.0, 80.0, 2.0];
        assert_eq!(gaussian_filter1d(&values, 0.0, 4.0), values.to_vec());
    }
}
