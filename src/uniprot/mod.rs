//! Batch mapping of UniProt accessions to annotation tables.
//!
//! Requests go through a [`Transport`] so the retry policy can be exercised
//! without a network. Each chunk resolves to a typed [`MappingOutcome`];
//! exhausted retries and rejected requests surface as errors instead of
//! being written to disk.

mod client;
mod columns;
mod error;

pub use client::{HttpTransport, IdMapper, MAPPING_URL, MappingOutcome, Response, Transport};
pub use columns::{
    ColumnCatalog, ColumnGroup, DBXREF_URL, catalog, default_columns, fetch_database_abbreviations,
    parse_database_abbreviations,
};
pub use error::Error;
