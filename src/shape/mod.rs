mod config;
mod corpus;
mod error;
mod invariants;
mod moments;
mod projector;
mod segment;
mod spatial;
mod summary;
mod tokenize;

pub use config::{
    KmerConfig, KmerSpread, ProjectionConfig, RadiusConfig, SegmentationConfig, ShapemerConfig,
    default_config,
};
pub use corpus::{chain_shapemers, segment_shapemers};
pub use error::Error;
pub use invariants::{InvariantSet, extract};
pub use moments::moment_invariants;
pub use projector::project_topic_weights;
pub use segment::{gaussian_filter1d, segment_by_confidence};
pub use summary::{StructureSummary, summarize};
pub use tokenize::tokenize;
