use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("chunk {chunk} still failing after {attempts} attempts: {reason}")]
    RetriesExhausted {
        chunk: usize,
        attempts: u32,
        reason: String,
    },

    #[error("chunk {chunk} was rejected by UniProt: {reason}")]
    Rejected { chunk: usize, reason: String },

    #[error("unknown UniProt column '{0}'")]
    UnknownColumn(String),
}
