use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{coords} points, {weights} weights and {opacities} opacities must have equal lengths")]
    LengthMismatch {
        coords: usize,
        weights: usize,
        opacities: usize,
    },

    #[error("at least two residues are needed to draw a trace (got {0})")]
    TooFewResidues(usize),

    #[error("colour scale maximum must be positive and finite (got {0})")]
    InvalidMaxValue(f64),

    #[error("upsample rate must be at least 1")]
    InvalidUpsampleRate,

    #[error("failed to draw SVG: {0}")]
    Draw(String),
}
