//! Reading protein structures and writing shapemer corpora.
//!
//! Structures are reduced to their alpha-carbon trace on load: one
//! [`Residue`](crate::Residue) per `CA` atom of the first model, carrying its
//! coordinate, one-letter code and B-factor (the per-residue confidence in
//! AlphaFold models).
//!
//! | Format | Read | Notes |
//! |---|---|---|
//! | PDB | [`StructureReader`] | fixed-column `ATOM` records, optionally gzip-compressed |
//! | mmCIF | [`StructureReader`] | `_atom_site` loop |
//! | ProteinNet | [`ProteinNetReader`] | multi-record text, cleaned with [`ProteinNetRecord::clean`] |
//!
//! Corpora are written with [`CorpusWriter`]; topic-model output is read with
//! [`TopicMatrix`].

use crate::model::structure::Structure;
use std::fmt;
use std::io::BufRead;

pub mod error;
pub mod util;

mod corpus;
mod mmcif;
mod pdb;
mod proteinnet;
mod weights;

pub use corpus::{CorpusWriter, alphafold_corpus_name, proteinnet_corpus_name};
pub use error::Error;
pub use pdb::writer::write_scores as write_pdb_scores;
pub use proteinnet::{AtomSelector, ProteinNetReader, ProteinNetRecord};
pub use weights::TopicMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Mmcif,
    ProteinNet,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Mmcif => write!(f, "mmCIF"),
            Format::ProteinNet => write!(f, "ProteinNet"),
        }
    }
}

/// Builder for loading a single [`Structure`] from a PDB or mmCIF stream.
///
/// ```
/// use shapemer::io::{Format, StructureReader};
/// use std::io::Cursor;
///
/// let pdb = "\
/// ATOM      1  N   MET A   1      10.000  10.000  10.000  1.00 40.00           N
/// ATOM      2  CA  MET A   1      11.000  10.000  10.000  1.00 91.50           C
/// ATOM      3  CA  LYS A   2      14.800  10.000  10.000  1.00 88.25           C
/// ";
/// let structure = StructureReader::new(Cursor::new(pdb), Format::Pdb)
///     .id("example")
///     .read()?;
///
/// assert_eq!(structure.id, "example");
/// assert_eq!(structure.sequence(), "MK");
/// assert_eq!(structure.confidences(), vec![91.5, 88.25]);
/// # Ok::<(), shapemer::io::Error>(())
/// ```
pub struct StructureReader<R: BufRead> {
    pub(crate) reader: R,
    pub(crate) format: Format,
    pub(crate) id: Option<String>,
}

impl<R: BufRead> StructureReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self {
            reader,
            format,
            id: None,
        }
    }

    /// Overrides the identifier otherwise taken from the file header.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn read(self) -> Result<Structure, Error> {
        match self.format {
            Format::Pdb => pdb::reader::read(self),
            Format::Mmcif => mmcif::reader::read(self),
            Format::ProteinNet => Err(Error::UnsupportedReadFormat(self.format)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn proteinnet_is_not_a_single_structure_format() {
        let err = StructureReader::new(Cursor::new(""), Format::ProteinNet)
            .read()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedReadFormat(Format::ProteinNet)
        ));
    }

    #[test]
    fn format_display_names() {
        assert_eq!(Format::Pdb.to_string(), "PDB");
        assert_eq!(Format::Mmcif.to_string(), "mmCIF");
        assert_eq!(Format::ProteinNet.to_string(), "ProteinNet");
    }
}
