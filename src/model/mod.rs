//! Core data structures flowing through `shapemer`.
//!
//! - [`residue`] – One alpha-carbon with its one-letter code and confidence score.
//! - [`structure`] – An identified chain of residues.
//! - [`segment`] – Half-open residue ranges selected by the confidence segmenter.
//! - [`shapemer`] – Quantised moment-invariant tokens.
//! - [`types`] – Amino acid names and extraction families.
//!
//! Geometry ([`Structure`]) is kept apart from the derived token stream
//! ([`Shapemer`]) so the extraction pipeline can turn one into
//! the other without touching the input.
//!
//! [`Structure`]: structure::Structure
//! [`Shapemer`]: shapemer::Shapemer

pub mod residue;
pub mod segment;
pub mod shapemer;
pub mod structure;
pub mod types;
