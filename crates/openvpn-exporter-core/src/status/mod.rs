//! OpenVPN status document scanning.
//!
//! A status document is read fully, its flavour detected from the first
//! bytes, and then handed to the matching parser:
//!
//! ```text
//! bytes ──► Dialect::detect ──► ServerParser (v2 ',' / v3 '\t')
//!                           ├─► ServerV4Parser
//!                           └─► ClientParser
//!                                   │
//!                    ColumnValues / DedupTracker / time parsers
//!                                   │
//!                                 Scan ──► MetricSink (on success only)
//! ```

mod client;
mod columns;
mod dedup;
mod detect;
mod error;
mod scan;
mod server;
mod server_v4;

use std::io::{BufRead, Read};

use tracing::debug;

use crate::metrics::MetricSink;
use crate::schema::StatusSchema;

pub use client::ClientParser;
pub use columns::ColumnValues;
pub use dedup::DedupTracker;
pub use detect::{Dialect, PEEK_LEN};
pub use error::ScanError;
pub use scan::Scan;
pub use server::ServerParser;
pub use server_v4::ServerV4Parser;

/// A status dialect parser.
pub trait StatusParser {
    /// Parses the whole document from `reader`, recording into `scan`.
    fn parse<R: BufRead>(&self, reader: R, scan: &mut Scan<'_>) -> Result<(), ScanError>;
}

/// Reads `source` to the end and scans it.
pub fn scan_status<R: Read>(
    schema: &StatusSchema,
    status_path: &str,
    mut source: R,
    sink: &mut dyn MetricSink,
) -> Result<Dialect, ScanError> {
    let mut document = Vec::new();
    source.read_to_end(&mut document)?;
    scan_document(schema, status_path, &document, sink)
}

/// Scans an in-memory status document.
///
/// On success every measurement is handed to `sink` and the detected
/// dialect returned. On failure `sink` is left untouched. Bytes that are
/// not valid UTF-8 become U+FFFD.
pub fn scan_document(
    schema: &StatusSchema,
    status_path: &str,
    document: &[u8],
    sink: &mut dyn MetricSink,
) -> Result<Dialect, ScanError> {
    let dialect = Dialect::detect(document)?;
    let text = String::from_utf8_lossy(document);
    let lines = text.as_bytes();
    let mut scan = Scan::new(schema, status_path);

    match dialect {
        Dialect::ServerV2 => ServerParser::new(',').parse(lines, &mut scan),
        Dialect::ServerV3 => ServerParser::new('\t').parse(lines, &mut scan),
        Dialect::ServerV4 => ServerV4Parser.parse(lines, &mut scan),
        Dialect::Client => ClientParser.parse(lines, &mut scan),
    }?;

    let measurements = scan.into_measurements();
    debug!(
        status_path,
        ?dialect,
        measurements = measurements.len(),
        "status scanned"
    );
    for measurement in measurements {
        sink.emit(measurement);
    }

    Ok(dialect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::scenarios::{
        CLIENT_STATUS, SERVER_V2_STATUS, SERVER_V3_STATUS, SERVER_V4_STATUS,
    };
    use std::io;

    #[test]
    fn test_routes_each_fixture() {
        let schema = StatusSchema::default();
        for (document, dialect) in [
            (SERVER_V2_STATUS, Dialect::ServerV2),
            (SERVER_V3_STATUS, Dialect::ServerV3),
            (SERVER_V4_STATUS, Dialect::ServerV4),
            (CLIENT_STATUS, Dialect::Client),
        ] {
            let mut sink = Vec::new();
            let detected = scan_status(&schema, "s", document.as_bytes(), &mut sink).unwrap();
            assert_eq!(detected, dialect);
            assert!(!sink.is_empty());
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let schema = StatusSchema::default();
        let document = SERVER_V2_STATUS.replace('\n', "\r\n");
        let mut sink = Vec::new();
        scan_document(&schema, "s", document.as_bytes(), &mut sink).unwrap();
        assert_eq!(sink.len(), 8);
    }

    #[test]
    fn test_unrecognized_format() {
        let schema = StatusSchema::default();
        let mut sink = Vec::new();
        let err = scan_document(&schema, "s", b"<html>not a status</html>", &mut sink).unwrap_err();
        assert!(matches!(err, ScanError::UnrecognizedFormat { .. }));
        assert!(sink.is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "socket closed"))
        }
    }

    #[test]
    fn test_read_error() {
        let schema = StatusSchema::default();
        let mut sink = Vec::new();
        let err = scan_status(&schema, "s", FailingReader, &mut sink).unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let schema = StatusSchema::new(crate::schema::LabelDetail::CommonNameOnly);
        let document = b"TITLE,OpenVPN\n\
HEADER,CLIENT_LIST,Common Name,Bytes Received\n\
CLIENT_LIST,j\xf6rg,100\n\
END\n";
        let mut sink = Vec::new();
        scan_document(&schema, "s", document, &mut sink).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].labels, vec!["s".to_string(), "j\u{FFFD}rg".to_string()]);
        assert_eq!(sink[0].value, 100.0);
    }
}
