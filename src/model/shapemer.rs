use super::types::SplitFamily;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid shapemer token: '{0}'")]
pub struct ParseShapemerError(String);

/// A discretised moment-invariant vector.
///
/// Rendered as the family tag followed by the four bins joined with `i`,
/// e.g. `k3i10i2i7`. Two shapemers are equal exactly when their rendered
/// tokens are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shapemer {
    pub family: SplitFamily,
    pub bins: [i64; 4],
}

impl Shapemer {
    pub fn new(family: SplitFamily, bins: [i64; 4]) -> Self {
        Self { family, bins }
    }

    /// Quantises moments as `floor(ln(1 + m) * resolution)` per component.
    ///
    /// Moments are expected to be non-negative; negative input yields
    /// unspecified bins.
    pub fn from_moments(moments: &[f64; 4], family: SplitFamily, resolution: u32) -> Self {
        let scale = f64::from(resolution);
        let bins = moments.map(|m| (m.ln_1p() * scale).floor() as i64);
        Self { family, bins }
    }

    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Shapemer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.bins;
        write!(f, "{}{}i{}i{}i{}", self.family.tag(), a, b, c, d)
    }
}

impl FromStr for Shapemer {
    type Err = ParseShapemerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseShapemerError(s.to_string());

        let mut chars = s.chars();
        let family = chars
            .next()
            .and_then(SplitFamily::from_tag)
            .ok_or_else(err)?;

        let parts: Vec<&str> = chars.as_str().split('i').collect();
        if parts.len() != 4 {
            return Err(err());
        }

        let mut bins = [0i64; 4];
        for (slot, part) in bins.iter_mut().zip(parts) {
            *slot = part.parse::<i64>().map_err(|_| err())?;
        }

        Ok(Self { family, bins })
    }
}
