//! Status file flavour detection.

use super::ScanError;

/// Number of leading bytes inspected.
pub const PEEK_LEN: usize = 18;

/// Textual layout of a status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `--status-version 2`: comma-separated, explicit `HEADER` records.
    ServerV2,
    /// `--status-version 3`: as version 2, tab-separated.
    ServerV3,
    /// `--status-version 1`: titled sections, header rows without a tag.
    ServerV4,
    /// Client statistics (`--status` on a client).
    Client,
}

/// Checked in order; first match wins.
const PREFIXES: [(&[u8], Dialect); 4] = [
    (b"TITLE,", Dialect::ServerV2),
    (b"TITLE\t", Dialect::ServerV3),
    (b"OpenVPN STATISTICS", Dialect::Client),
    (b"OpenVPN CLIENT LIS", Dialect::ServerV4),
];

impl Dialect {
    /// Picks the dialect from the start of `document` without consuming it.
    pub fn detect(document: &[u8]) -> Result<Self, ScanError> {
        let prefix = &document[..document.len().min(PEEK_LEN)];
        PREFIXES
            .iter()
            .find(|(magic, _)| prefix.starts_with(magic))
            .map(|&(_, dialect)| dialect)
            .ok_or_else(|| ScanError::UnrecognizedFormat {
                prefix: String::from_utf8_lossy(prefix).into_owned(),
            })
    }
}
