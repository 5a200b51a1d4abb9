use std::fs;

use anyhow::{Context, Result};
use log::debug;

use shapemer::ShapemerConfig;

use crate::cli::{ExtractionOptions, SegmentationOptions};

/// Loads the configuration file (or the built-in defaults) and applies flag overrides.
pub fn build_shapemer_config(opts: &ExtractionOptions) -> Result<ShapemerConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
            debug!("loaded configuration from {}", path.display());
            ShapemerConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid configuration file: {}", path.display()))?
        }
        None => ShapemerConfig::default(),
    };

    if let Some(resolution) = opts.resolution_kmer {
        config.kmer.resolution = resolution;
    }
    if let Some(resolution) = opts.resolution_radius {
        config.radius.resolution = resolution;
    }
    if let Some(size) = opts.kmer_size {
        config.kmer.split_size = size;
    }
    if let Some(radius) = opts.radius {
        config.radius.split_size = radius;
    }

    config.validate().context("Invalid extraction parameters")?;
    Ok(config)
}

pub fn apply_segmentation(config: &mut ShapemerConfig, opts: &SegmentationOptions) -> Result<()> {
    if let Some(threshold) = opts.confidence_threshold {
        config.segmentation.confidence_threshold = threshold;
    }
    if let Some(length) = opts.length_threshold {
        config.segmentation.length_threshold = length;
    }
    if let Some(sigma) = opts.sigma {
        config.segmentation.sigma = sigma;
    }

    config.validate().context("Invalid segmentation parameters")?;
    Ok(())
}
