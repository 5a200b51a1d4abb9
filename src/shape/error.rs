//! Error types for shapemer extraction.

use thiserror::Error;

/// Errors raised while segmenting, extracting or projecting.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a configuration TOML.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Invariants need at least one residue.
    #[error("cannot extract invariants from an empty segment")]
    EmptySegment,

    /// A KMER window does not fit into the segment.
    ///
    /// Batch callers treat this as "no KMER tokens" rather than a failure.
    #[error("segment of {len} residues is shorter than the {window}-residue window")]
    SegmentTooShort { len: usize, window: usize },

    /// A numeric parameter is outside its usable range.
    #[error("invalid parameter '{name}': {detail}")]
    InvalidParameter { name: &'static str, detail: String },
}

impl Error {
    pub fn invalid_parameter(name: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            detail: detail.into(),
        }
    }
}
