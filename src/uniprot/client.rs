use super::columns::default_columns;
use super::error::Error;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

pub const MAPPING_URL: &str = "https://www.uniprot.org/uploadlists/";
/// Error pages served with a success status start like this.
const HTML_ERROR_MARKER: &str = "<html><head>";

/// Status code and body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP operations the UniProt client needs.
pub trait Transport {
    /// POST with `params` encoded in the query string.
    fn post_query(&self, url: &str, params: &[(&str, &str)]) -> Result<Response, Error>;
    fn get(&self, url: &str) -> Result<Response, Error>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_query(&self, url: &str, params: &[(&str, &str)]) -> Result<Response, Error> {
        let response = self.client.post(url).query(params).send()?;
        let status = response.status().as_u16();
        Ok(Response {
            status,
            body: response.text()?,
        })
    }

    fn get(&self, url: &str) -> Result<Response, Error> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        Ok(Response {
            status,
            body: response.text()?,
        })
    }
}

/// Result of mapping one chunk of identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingOutcome {
    /// Tab-separated table, header line included.
    Success(String),
    /// Every attempt hit a network error, a server error or an HTML error page.
    TransientFailure { attempts: u32, reason: String },
    /// The service refused the request; retrying will not help.
    PermanentFailure(String),
}

/// Batch accession-to-record mapping against the UniProt upload-lists service.
pub struct IdMapper<T: Transport> {
    transport: T,
    url: String,
    from: String,
    to: String,
    columns: String,
    chunk_size: usize,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<T: Transport> IdMapper<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            url: MAPPING_URL.to_string(),
            from: "ACC+ID".to_string(),
            to: "ACC".to_string(),
            columns: default_columns(),
            chunk_size: 100,
            max_attempts: 5,
            retry_delay: Duration::from_secs(1),
        }
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Comma-separated column selection, see [`ColumnCatalog::selection`](super::ColumnCatalog::selection).
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Pause before the second attempt; doubled after every further failure.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn map_chunk(&self, ids: &[String]) -> MappingOutcome {
        let query = ids.join(" ");
        let params = [
            ("from", self.from.as_str()),
            ("to", self.to.as_str()),
            ("format", "tab"),
            ("columns", self.columns.as_str()),
            ("query", query.as_str()),
        ];

        let mut delay = self.retry_delay;
        let mut reason = String::new();

        for attempt in 1..=self.max_attempts {
            match self.transport.post_query(&self.url, &params) {
                Ok(response) if response.is_success() => {
                    if !response.body.contains(HTML_ERROR_MARKER) {
                        return MappingOutcome::Success(response.body);
                    }
                    reason = "service returned an HTML error page".to_string();
                }
                Ok(response) if response.status >= 500 || response.status == 429 => {
                    reason = format!("HTTP {}", response.status);
                }
                Ok(response) => {
                    return MappingOutcome::PermanentFailure(format!("HTTP {}", response.status));
                }
                Err(e) => reason = e.to_string(),
            }

            warn!(
                "UniProt mapping attempt {attempt}/{} failed: {reason}",
                self.max_attempts
            );
            if attempt < self.max_attempts && !delay.is_zero() {
                thread::sleep(delay);
                delay *= 2;
            }
        }

        MappingOutcome::TransientFailure {
            attempts: self.max_attempts,
            reason,
        }
    }

    /// Maps `ids` chunk by chunk into one table; only the first chunk's header is kept.
    ///
    /// Returns the number of chunks written.
    pub fn map_to_writer<W: Write>(&self, ids: &[String], mut writer: W) -> Result<usize, Error> {
        let mut written = 0;
        for (chunk, batch) in ids.chunks(self.chunk_size).enumerate() {
            debug!("mapping chunk {chunk} ({} ids)", batch.len());
            let text = match self.map_chunk(batch) {
                MappingOutcome::Success(text) => text,
                MappingOutcome::TransientFailure { attempts, reason } => {
                    return Err(Error::RetriesExhausted {
                        chunk,
                        attempts,
                        reason,
                    });
                }
                MappingOutcome::PermanentFailure(reason) => {
                    return Err(Error::Rejected { chunk, reason });
                }
            };

            let body = if chunk == 0 {
                text.as_str()
            } else {
                text.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
            };
            writer.write_all(body.as_bytes())?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }

    /// Like [`map_to_writer`](Self::map_to_writer), removing the partial file on failure.
    pub fn map_to_file(&self, ids: &[String], path: &Path) -> Result<usize, Error> {
        let result = File::create(path)
            .map_err(Error::from)
            .and_then(|file| self.map_to_writer(ids, BufWriter::new(file)));
        if result.is_err() {
            let _ = fs::remove_file(path);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct MockTransport {
        replies: RefCell<VecDeque<Result<Response, Error>>>,
        queries: RefCell<Vec<String>>,
    }

    impl MockTransport {
        fn with(replies: Vec<Result<Response, Error>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                queries: RefCell::default(),
            }
        }
    }

    impl Transport for MockTransport {
        fn post_query(&self, _url: &str, params: &[(&str, &str)]) -> Result<Response, Error> {
            let query = params
                .iter()
                .find(|(k, _)| *k == "query")
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            self.queries.borrow_mut().push(query);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(ok("Entry\n")))
        }

        fn get(&self, _url: &str) -> Result<Response, Error> {
            self.replies.borrow_mut().pop_front().unwrap_or_else(|| Ok(ok("")))
        }
    }

    fn ok(body: &str) -> Response {
        Response {
            status: 200,
            body: body.to_string(),
        }
    }

    fn status(code: u16) -> Response {
        Response {
            status: code,
            body: String::new(),
        }
    }

    fn mapper(replies: Vec<Result<Response, Error>>) -> IdMapper<MockTransport> {
        IdMapper::new(MockTransport::with(replies)).retry_delay(Duration::ZERO)
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{i:05}")).collect()
    }

    #[test]
    fn html_error_page_is_retried() {
        let mapper = mapper(vec![
            Ok(ok("<html><head><title>503</title></head></html>")),
            Ok(status(502)),
            Ok(ok("Entry\tName\nP00000\tX\n")),
        ]);
        let outcome = mapper.map_chunk(&ids(1));
        assert_eq!(outcome, MappingOutcome::Success("Entry\tName\nP00000\tX\n".into()));
        assert_eq!(mapper.transport.queries.borrow().len(), 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let replies = (0..5).map(|_| Ok(ok("<html><head></head></html>"))).collect();
        let mapper = mapper(replies);
        match mapper.map_chunk(&ids(2)) {
            MappingOutcome::TransientFailure { attempts, .. } => assert_eq!(attempts, 5),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(mapper.transport.queries.borrow().len(), 5);
    }

    #[test]
    fn client_errors_are_permanent() {
        let mapper = mapper(vec![Ok(status(400))]);
        assert_eq!(
            mapper.map_chunk(&ids(1)),
            MappingOutcome::PermanentFailure("HTTP 400".into())
        );
        assert_eq!(mapper.transport.queries.borrow().len(), 1);
    }

    #[test]
    fn chunks_share_one_header() {
        let mapper = mapper(vec![
            Ok(ok("Entry\tName\nA\t1\n")),
            Ok(ok("Entry\tName\nB\t2\n")),
            Ok(ok("Entry\tName\nC\t3\n")),
        ])
        .chunk_size(100);

        let mut out = Vec::new();
        let chunks = mapper.map_to_writer(&ids(250), &mut out).unwrap();
        assert_eq!(chunks, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "Entry\tName\nA\t1\nB\t2\nC\t3\n");

        let queries = mapper.transport.queries.borrow();
        assert_eq!(queries[0].split(' ').count(), 100);
        assert_eq!(queries[2].split(' ').count(), 50);
        assert!(queries[1].starts_with("P00100 "));
    }

    #[test]
    fn exhausted_retries_fail_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UP000001_uniprot.txt");
        let replies = (0..3).map(|_| Ok(status(503))).collect();
        let mapper = mapper(replies).max_attempts(3);

        let err = mapper.map_to_file(&ids(3), &path).unwrap_err();
        assert!(matches!(err, Error::RetriesExhausted { chunk: 0, attempts: 3, .. }));
        assert!(!path.exists());
    }

    #[test]
    fn no_ids_writes_nothing() {
        let mapper = mapper(Vec::new());
        let mut out = Vec::new();
        assert_eq!(mapper.map_to_writer(&[], &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn database_abbreviations_come_from_one_fetch() {
        let transport = MockTransport::with(vec![Ok(ok("Abbrev: PDB\n"))]);
        let abbrevs = super::super::fetch_database_abbreviations(&transport).unwrap();
        assert_eq!(abbrevs, vec!["database(EMBL)", "database(PDB)"]);

        let failing = MockTransport::with(vec![Ok(status(404))]);
        assert!(matches!(
            super::super::fetch_database_abbreviations(&failing),
            Err(Error::Status { status: 404, .. })
        ));
    }
}
