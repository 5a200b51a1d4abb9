//! Configuration for shapemer extraction and topic projection.
//!
//! The built-in defaults live in `resources/default.config.toml` and are
//! parsed once on first use. A user file only needs the keys it changes;
//! every missing section or key falls back to its default.

use super::error::Error;
use serde::Deserialize;
use std::sync::OnceLock;

const DEFAULT_CONFIG_TOML: &str = include_str!("../../resources/default.config.toml");

static DEFAULT_CONFIG: OnceLock<ShapemerConfig> = OnceLock::new();

/// Complete set of extraction parameters.
///
/// # Examples
///
/// ```
/// use shapemer::{KmerSpread, ShapemerConfig};
///
/// let config = ShapemerConfig::from_toml_str("[segmentation]\nlength_threshold = 30\n")?;
/// assert_eq!(config.segmentation.length_threshold, 30);
/// assert_eq!(config.kmer.split_size, 16);
/// assert_eq!(config.projection.kmer_spread, KmerSpread::Window);
/// # Ok::<(), shapemer::ShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapemerConfig {
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub kmer: KmerConfig,
    #[serde(default)]
    pub radius: RadiusConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

impl ShapemerConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        let config: ShapemerConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameter values the extractors cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.segmentation.sigma.is_finite() || self.segmentation.sigma < 0.0 {
            return Err(Error::invalid_parameter("segmentation.sigma", "must be finite and non-negative"));
        }
        if !self.segmentation.truncate.is_finite() || self.segmentation.truncate < 0.0 {
            return Err(Error::invalid_parameter("segmentation.truncate", "must be finite and non-negative"));
        }
        if self.kmer.split_size == 0 {
            return Err(Error::invalid_parameter("kmer.split_size", "must be at least 1"));
        }
        if !(self.radius.split_size > 0.0 && self.radius.split_size.is_finite()) {
            return Err(Error::invalid_parameter("radius.split_size", "must be a positive distance"));
        }
        if self.kmer.resolution == 0 || self.radius.resolution == 0 {
            return Err(Error::invalid_parameter("resolution", "must be at least 1"));
        }
        if !self.projection.gamma.is_finite() || self.projection.gamma < 0.0 {
            return Err(Error::invalid_parameter("projection.gamma", "must be finite and non-negative"));
        }
        Ok(())
    }
}

impl Default for ShapemerConfig {
    fn default() -> Self {
        default_config().clone()
    }
}

pub fn default_config() -> &'static ShapemerConfig {
    DEFAULT_CONFIG.get_or_init(|| {
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("Failed to parse embedded default configuration. This is a library bug.")
    })
}

/// Confidence smoothing and segment selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentationConfig {
    /// Standard deviation of the Gaussian smoothing kernel, in residues.
    pub sigma: f64,
    /// Kernel half-width in multiples of `sigma`.
    pub truncate: f64,
    /// Smoothed confidence at or above which a residue counts as confident.
    pub confidence_threshold: f64,
    /// Runs must be strictly longer than this to become segments.
    pub length_threshold: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sigma: 5.0,
            truncate: 4.0,
            confidence_threshold: 70.0,
            length_threshold: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KmerConfig {
    pub split_size: usize,
    pub resolution: u32,
}

impl Default for KmerConfig {
    fn default() -> Self {
        Self {
            split_size: 16,
            resolution: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RadiusConfig {
    /// Neighbourhood radius in Ångström.
    pub split_size: f64,
    pub resolution: u32,
}

impl Default for RadiusConfig {
    fn default() -> Self {
        Self {
            split_size: 10.0,
            resolution: 6,
        }
    }
}

/// How a KMER anchor's weight is spread over residues during projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KmerSpread {
    /// Each residue of the anchor's window receives `weight * similarity`.
    #[default]
    Window,
    /// All window contributions pile up on the anchor residue itself.
    ///
    /// Matches the scores produced by earlier releases of the pipeline.
    Anchor,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Decay of the `exp(-gamma * d^2)` similarity kernel.
    pub gamma: f64,
    pub kmer_spread: KmerSpread,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            gamma: 0.03,
            kmer_spread: KmerSpread::Window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_section_defaults() {
        let config = default_config();
        assert_eq!(config.segmentation, SegmentationConfig::default());
        assert_eq!(config.kmer, KmerConfig::default());
        assert_eq!(config.radius, RadiusConfig::default());
        assert_eq!(config.projection, ProjectionConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_user_config_keeps_other_defaults() {
        let config = ShapemerConfig::from_toml_str(
            r#"
            [radius]
            split_size = 8.5

            [projection]
            kmer_spread = "anchor"
            "#,
        )
        .unwrap();
        assert_eq!(config.radius.split_size, 8.5);
        assert_eq!(config.radius.resolution, 6);
        assert_eq!(config.projection.kmer_spread, KmerSpread::Anchor);
        assert_eq!(config.projection.gamma, 0.03);
        assert_eq!(config.segmentation.length_threshold, 50);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ShapemerConfig::from_toml_str("").unwrap(), ShapemerConfig::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ShapemerConfig::from_toml_str("[kmer]\nwindow = 3\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_unusable_values() {
        let err = ShapemerConfig::from_toml_str("[kmer]\nsplit_size = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "kmer.split_size", .. }));

        let err = ShapemerConfig::from_toml_str("[radius]\nsplit_size = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "radius.split_size", .. }));
    }
}
