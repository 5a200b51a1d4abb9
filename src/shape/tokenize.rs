use super::invariants::InvariantSet;
use crate::model::shapemer::Shapemer;

/// Quantises every anchor of `set` into a [`Shapemer`], preserving anchor order.
pub fn tokenize(set: &InvariantSet, resolution: u32) -> Vec<Shapemer> {
    set.moments
        .iter()
        .map(|m| Shapemer::from_moments(m, set.family, resolution))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::SplitFamily;

    #[test]
    fn tokens_follow_anchor_order() {
        let set = InvariantSet {
            family: SplitFamily::Radius,
            split_size: 10.0,
            moments: vec![[0.0, 1.0, 6.389, 19.08], [0.0; 4]],
            split_indices: vec![vec![0, 1], vec![1]],
        };
        let tokens: Vec<String> = tokenize(&set, 4).iter().map(|s| s.to_string()).collect();
        assert_eq!(tokens, vec!["r0i2i7i11", "r0i0i0i0"]);
    }
}
