//! Server status-version 2 and 3.
//!
//! Every line starts with a record tag. Data records (`CLIENT_LIST`,
//! `ROUTING_TABLE`) are described by a preceding `HEADER` record:
//!
//! ```text
//! TITLE,OpenVPN 2.5.9 x86_64-pc-linux-gnu
//! TIME,Sun Oct 20 09:23:08 2024,1729416188
//! HEADER,CLIENT_LIST,Common Name,Real Address,...
//! CLIENT_LIST,alice,198.51.100.7:51234,...
//! GLOBAL_STATS,Max bcast/mcast queue length,0
//! END
//! ```
//!
//! Version 3 is identical with tabs instead of commas.

use std::collections::HashMap;
use std::io::BufRead;

use super::columns::ColumnValues;
use super::scan::Scan;
use super::{ScanError, StatusParser};
use crate::schema::CLIENT_LIST;
use crate::util::parse_epoch_seconds;

/// Parser for tagged server status files.
#[derive(Debug, Clone, Copy)]
pub struct ServerParser {
    separator: char,
}

impl ServerParser {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl StatusParser for ServerParser {
    fn parse<R: BufRead>(&self, reader: R, scan: &mut Scan<'_>) -> Result<(), ScanError> {
        let schema = scan.schema();
        let mut headers: HashMap<String, Vec<String>> = HashMap::new();

        for line in reader.lines() {
            let line = line?;
            let fields: Vec<&str> = line.split(self.separator).collect();

            match (fields[0], fields.len()) {
                ("END", 1) => {}
                ("GLOBAL_STATS", _) => {}
                ("HEADER", n) if n > 2 => {
                    let columns = fields[2..].iter().map(|c| c.to_string()).collect();
                    headers.insert(fields[1].to_string(), columns);
                }
                ("TIME", 3) => {
                    let epoch = parse_epoch_seconds(fields[2])?;
                    scan.status_update_time(epoch);
                }
                ("TITLE", 2) => {}
                (tag, _) => {
                    let Some(section) = schema.section(tag) else {
                        return Err(ScanError::UnsupportedRecordType(tag.to_string()));
                    };
                    let header = headers
                        .get(tag)
                        .ok_or_else(|| ScanError::MissingHeader(tag.to_string()))?;
                    if fields.len() != header.len() + 1 {
                        return Err(ScanError::HeaderArityMismatch(tag.to_string()));
                    }

                    if tag == CLIENT_LIST {
                        scan.count_client();
                    }
                    let columns = ColumnValues::project(header, &fields[1..])
                        .with_label_defaults(section.label_columns);
                    scan.emit_row(section, &columns)?;
                }
            }
        }

        scan.emit_connected_clients();
        Ok(())
    }
}
