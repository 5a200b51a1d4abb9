use super::error::Error;
use crate::model::shapemer::Shapemer;
use std::io::Write;

/// File name of an AlphaFold corpus, encoding the extraction parameters.
pub fn alphafold_corpus_name(resolution_kmer: u32, resolution_radius: u32, length_threshold: usize) -> String {
    format!(
        "AF_ids_corpus_resolution_{resolution_kmer}_{resolution_radius}_threshold_{length_threshold}.txt"
    )
}

/// File name of a ProteinNet corpus derived from the input file's stem.
pub fn proteinnet_corpus_name(stem: &str, resolution_kmer: u32, resolution_radius: u32) -> String {
    format!("PDB_{stem}_ids_corpus_resolution_{resolution_kmer}_{resolution_radius}.txt")
}

/// Writes one `id<TAB>token token ...` line per document.
///
/// ```
/// use shapemer::io::CorpusWriter;
/// use shapemer::{Shapemer, SplitFamily};
///
/// let mut corpus = CorpusWriter::new(Vec::new());
/// let tokens = [
///     Shapemer::new(SplitFamily::Kmer, [0, 2, 7, 11]),
///     Shapemer::new(SplitFamily::Radius, [1, 1, 3, 4]),
/// ];
/// assert!(corpus.write_document("AF-P1-F1-model_v1.pdb", &tokens)?);
/// assert!(!corpus.write_document("empty", &[])?);
///
/// let bytes = corpus.finish()?;
/// assert_eq!(String::from_utf8(bytes).unwrap(), "AF-P1-F1-model_v1.pdb\tk0i2i7i11 r1i1i3i4\n");
/// # Ok::<(), shapemer::io::Error>(())
/// ```
pub struct CorpusWriter<W: Write> {
    writer: W,
    documents: usize,
    tokens: usize,
}

impl<W: Write> CorpusWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
            tokens: 0,
        }
    }

    /// Appends a document, returning `false` without writing when `tokens` is empty.
    pub fn write_document(&mut self, id: &str, tokens: &[Shapemer]) -> Result<bool, Error> {
        if tokens.is_empty() {
            return Ok(false);
        }

        write!(self.writer, "{id}\t")?;
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b" ")?;
            }
            write!(self.writer, "{token}")?;
        }
        self.writer.write_all(b"\n")?;

        self.documents += 1;
        self.tokens += tokens.len();
        Ok(true)
    }

    #[inline]
    pub fn documents(&self) -> usize {
        self.documents
    }

    #[inline]
    pub fn tokens(&self) -> usize {
        self.tokens
    }

    pub fn finish(mut self) -> Result<W, Error> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
