use super::error::Error;
use super::moments::moment_invariants;
use super::spatial::SpatialGrid;
use crate::model::types::SplitFamily;

/// Moment invariants of every anchor in one chain or segment.
///
/// `moments[a]` is computed over the residues listed in `split_indices[a]`,
/// indices being relative to the coordinate slice passed to [`extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantSet {
    pub family: SplitFamily,
    pub split_size: f64,
    pub moments: Vec<[f64; 4]>,
    pub split_indices: Vec<Vec<usize>>,
}

impl InvariantSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.moments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}

/// Computes one moment vector per anchor.
///
/// * [`SplitFamily::Kmer`]: anchor `i` covers residues `i..i + split_size`,
///   for every window that fits, giving `n - split_size + 1` anchors.
///   `split_size` must be a positive whole number of residues.
/// * [`SplitFamily::Radius`]: anchor `i` covers every residue within
///   `split_size` Ångström of residue `i`, itself included, giving `n` anchors.
///
/// # Errors
///
/// [`Error::EmptySegment`] for an empty slice, [`Error::SegmentTooShort`]
/// when no KMER window fits, and [`Error::InvalidParameter`] for an
/// unusable `split_size`.
pub fn extract(coords: &[[f64; 3]], family: SplitFamily, split_size: f64) -> Result<InvariantSet, Error> {
    if !(split_size > 0.0 && split_size.is_finite()) {
        return Err(Error::invalid_parameter("split_size", format!("{split_size} is not positive")));
    }
    if coords.is_empty() {
        return Err(Error::EmptySegment);
    }

    let split_indices = match family {
        SplitFamily::Kmer => kmer_windows(coords.len(), split_size)?,
        SplitFamily::Radius => radius_neighbourhoods(coords, split_size),
    };

    let moments = split_indices
        .iter()
        .map(|indices| {
            let points: Vec<[f64; 3]> = indices.iter().map(|&i| coords[i]).collect();
            moment_invariants(&points)
        })
        .collect();

    Ok(InvariantSet {
        family,
        split_size,
        moments,
        split_indices,
    })
}

fn kmer_windows(n: usize, split_size: f64) -> Result<Vec<Vec<usize>>, Error> {
    if split_size.fract() != 0.0 {
        return Err(Error::invalid_parameter(
            "split_size",
            format!("KMER windows need a whole number of residues, got {split_size}"),
        ));
    }
    let window = split_size as usize;
    if n < window {
        return Err(Error::SegmentTooShort { len: n, window });
    }
    Ok((0..=n - window).map(|i| (i..i + window).collect()).collect())
}

fn radius_neighbourhoods(coords: &[[f64; 3]], radius: f64) -> Vec<Vec<usize>> {
    let grid = SpatialGrid::from_positions(coords, radius);
    coords
        .iter()
        .map(|c| grid.query_radius(*c, coords, radius))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, spacing: f64) -> Vec<[f64; 3]> {
        (0..n).map(|i| [i as f64 * spacing, 0.0, 0.0]).collect()
    }

    #[test]
    fn kmer_gives_one_anchor_per_fitting_window() {
        let set = extract(&line(100, 3.8), SplitFamily::Kmer, 16.0).unwrap();
        assert_eq!(set.len(), 85);
        assert_eq!(set.split_indices[0], (0..16).collect::<Vec<_>>());
        assert_eq!(set.split_indices[84], (84..100).collect::<Vec<_>>());
    }

    #[test]
    fn kmer_window_of_exact_length() {
        let set = extract(&line(16, 3.8), SplitFamily::Kmer, 16.0).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn kmer_too_short_and_empty() {
        let err = extract(&line(15, 3.8), SplitFamily::Kmer, 16.0).unwrap_err();
        assert!(matches!(err, Error::SegmentTooShort { len: 15, window: 16 }));

        let err = extract(&[], SplitFamily::Radius, 10.0).unwrap_err();
        assert!(matches!(err, Error::EmptySegment));
    }

    #[test]
    fn rejects_bad_split_sizes() {
        assert!(matches!(
            extract(&line(20, 1.0), SplitFamily::Radius, 0.0),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            extract(&line(20, 1.0), SplitFamily::Kmer, 4.5),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn radius_neighbourhoods_include_self() {
        let set = extract(&line(10, 3.8), SplitFamily::Radius, 10.0).unwrap();
        assert_eq!(set.len(), 10);
        assert_eq!(set.split_indices[0], vec![0, 1, 2]);
        assert_eq!(set.split_indices[5], vec![3, 4, 5, 6, 7]);
        for (i, indices) in set.split_indices.iter().enumerate() {
            assert!(indices.contains(&i));
        }
    }

    #[test]
    fn isolated_residue_has_zero_moments() {
        let coords = vec![[0.0, 0.0, 0.0], [50.0, 0.0, 0.0]];
        let set = extract(&coords, SplitFamily::Radius, 10.0).unwrap();
        assert_eq!(set.split_indices, vec![vec![0], vec![1]]);
        assert_eq!(set.moments, vec![[0.0; 4]; 2]);
    }
}
