use super::Format;
use crate::model::structure::LengthMismatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("the '{0}' format is not supported for this read operation")]
    UnsupportedReadFormat(Format),

    #[error("cannot infer a structure format from '{0}'")]
    UnknownExtension(String),

    #[error("no alpha-carbon records found in {0} input")]
    NoResidues(Format),

    #[error("record '{id}' is missing its [{section}] section")]
    MissingSection { id: String, section: &'static str },

    #[error("atom must be one of n, ca, cb (got '{0}')")]
    InvalidAtom(String),

    #[error("record '{id}' is inconsistent: {source}")]
    LengthMismatch {
        id: String,
        #[source]
        source: LengthMismatchError,
    },

    #[error("topic matrix is malformed: {0}")]
    TopicMatrix(String),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn length_mismatch(
        id: impl Into<String>,
        sequence: usize,
        coordinates: usize,
        confidences: usize,
    ) -> Self {
        Self::LengthMismatch {
            id: id.into(),
            source: LengthMismatchError {
                sequence,
                coordinates,
                confidences,
            },
        }
    }
}
