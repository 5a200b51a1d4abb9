//! Rotation-invariant "shapemer" descriptors of protein backbones, written as
//! text corpora for topic modelling and projected back onto residues for
//! visualisation.
//!
//! # Features
//!
//! - **Confidence segmentation** — Gaussian-smoothed per-residue confidence
//!   (AlphaFold pLDDT) split into long, confidently predicted stretches
//! - **Moment invariants** — four rotation/translation invariant moments over
//!   sliding KMER windows and spatial RADIUS neighbourhoods
//! - **Shapemer tokens** — log-scaled quantisation into tokens like `k3i10i2i7`
//! - **Topic projection** — per-residue scores from a topic-by-shapemer matrix,
//!   rendered as SVG or written into PDB B-factors
//! - **Flexible I/O** — PDB and mmCIF (optionally gzip-compressed), ProteinNet
//!   text records, UniProt accession mapping
//!
//! # Quick Start
//!
//! ```
//! use shapemer::{Shapemer, ShapemerConfig, SplitFamily, Structure, segment_shapemers};
//!
//! // A 100-residue ideal helix predicted with uniform high confidence
//! let coords: Vec<[f64; 3]> = (0..100)
//!     .map(|i| {
//!         let t = i as f64 * 100f64.to_radians();
//!         [2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64]
//!     })
//!     .collect();
//! let structure = Structure::from_parts("helix", coords, &"A".repeat(100), vec![90.0; 100])?;
//!
//! let tokens = segment_shapemers(&structure, &ShapemerConfig::default())?
//!     .expect("one confident segment");
//!
//! // One KMER token per 16-residue window, one RADIUS token per residue
//! let kmer = tokens.iter().filter(|t| t.family == SplitFamily::Kmer).count();
//! assert_eq!(kmer, 85);
//! assert_eq!(tokens.len(), 85 + 100);
//!
//! // Tokens render and parse symmetrically
//! let first: Shapemer = tokens[0].to_string().parse()?;
//! assert_eq!(first, tokens[0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Structure readers, ProteinNet records, corpus and topic matrix files
//! - [`render`] — SVG plots of projected scores
//! - [`uniprot`] — Accession mapping with typed retry outcomes
//!
//! # Data Types
//!
//! - [`Structure`] / [`Residue`] — Alpha-carbon trace with codes and confidences
//! - [`Segment`] — Confident residue range
//! - [`InvariantSet`] — Moments and contributing residues per anchor
//! - [`Shapemer`] / [`SplitFamily`] — Quantised token and its extraction family
//! - [`ShapemerConfig`] — Segmentation, extraction and projection parameters

mod model;
mod shape;

pub mod io;
pub mod render;
pub mod uniprot;

pub use model::residue::Residue;
pub use model::segment::Segment;
pub use model::shapemer::{ParseShapemerError, Shapemer};
pub use model::structure::{LengthMismatchError, Structure};
pub use model::types::{
    AminoAcid, ParseAminoAcidError, ParseSplitFamilyError, SplitFamily, one_letter_code,
};

pub use shape::{
    InvariantSet, KmerConfig, KmerSpread, ProjectionConfig, RadiusConfig, SegmentationConfig,
    ShapemerConfig, StructureSummary, chain_shapemers, default_config, extract,
    gaussian_filter1d, moment_invariants, project_topic_weights, segment_by_confidence,
    segment_shapemers, summarize, tokenize,
};

pub use shape::Error as ShapeError;
