//! Client statistics files.
//!
//! ```text
//! OpenVPN STATISTICS
//! Updated,Sun Oct 20 09:23:08 2024
//! TUN/TAP read bytes,153789941
//! ...
//! END
//! ```

use std::io::BufRead;

use super::columns::parse_value;
use super::scan::Scan;
use super::{ScanError, StatusParser};
use crate::util::parse_local_ctime;

/// Parser for client statistics files.
///
/// Keys are expected once per document. A repeated key is emitted again;
/// nothing here guards against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientParser;

impl StatusParser for ClientParser {
    fn parse<R: BufRead>(&self, reader: R, scan: &mut Scan<'_>) -> Result<(), ScanError> {
        let schema = scan.schema();

        for line in reader.lines() {
            let line = line?;
            let fields: Vec<&str> = line.split(',').collect();

            match fields.as_slice() {
                ["END"] | ["OpenVPN STATISTICS"] => {}
                ["Updated", updated] => {
                    let updated = parse_local_ctime(updated)?;
                    scan.status_update_time(updated as f64);
                }
                [key, value] => {
                    let Some(desc) = schema.client_counter(key) else {
                        return Err(ScanError::UnsupportedRecordType(key.to_string()));
                    };
                    let value = parse_value(key, value)?;
                    scan.emit(*desc, value);
                }
                _ => return Err(ScanError::UnsupportedRecordType(fields[0].to_string())),
            }
        }

        Ok(())
    }
}
