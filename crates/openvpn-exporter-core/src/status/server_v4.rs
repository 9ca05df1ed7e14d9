//! Server status-version 1 (titled sections).
//!
//! ```text
//! OpenVPN CLIENT LIST
//! Updated,2024-10-21 09:23:08
//! Common Name,Real Address,Bytes Received,Bytes Sent,Connected Since
//! alice,198.51.100.7:51234,1048576,2097152,2024-10-21 08:00:00
//! ROUTING TABLE
//! Virtual Address,Common Name,Real Address,Last Ref
//! 10.8.0.6,alice,198.51.100.7:51234,2024-10-21 09:23:01
//! GLOBAL STATS
//! Max bcast/mcast queue length,0
//! END
//! ```
//!
//! Rows carry no tag, the section title above them decides what they are.
//! Unlike the tagged formats, a row seen before its header row is skipped
//! instead of failing the scan.

use std::collections::HashMap;
use std::io::BufRead;

use tracing::debug;

use super::columns::ColumnValues;
use super::scan::Scan;
use super::{ScanError, StatusParser};
use crate::schema::{CLIENT_LIST, ROUTING_TABLE};
use crate::util::parse_status_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    ClientList,
    RoutingTable,
    GlobalStats,
}

/// Parser for titled server status files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerV4Parser;

impl StatusParser for ServerV4Parser {
    fn parse<R: BufRead>(&self, reader: R, scan: &mut Scan<'_>) -> Result<(), ScanError> {
        let mut section = Section::None;
        let mut headers: HashMap<&'static str, Vec<String>> = HashMap::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            if !line.contains(',') {
                match line.as_str() {
                    "OpenVPN CLIENT LIST" => {
                        section = Section::ClientList;
                        continue;
                    }
                    "ROUTING TABLE" => {
                        section = Section::RoutingTable;
                        continue;
                    }
                    "GLOBAL STATS" => {
                        section = Section::GlobalStats;
                        continue;
                    }
                    "END" => break,
                    _ => {}
                }
            }

            let fields: Vec<&str> = line.split(',').collect();

            match section {
                Section::ClientList => {
                    if line.starts_with("Updated,") {
                        let updated = parse_status_time(fields[1])?;
                        scan.status_update_time(updated as f64);
                    } else if line.starts_with("Common Name,") {
                        headers.insert(CLIENT_LIST, to_owned(&fields));
                    } else {
                        scan.count_client();
                        emit_row(scan, CLIENT_LIST, headers.get(CLIENT_LIST), &fields)?;
                    }
                }
                Section::RoutingTable => {
                    if line.starts_with("Virtual Address,") {
                        headers.insert(ROUTING_TABLE, to_owned(&fields));
                    } else {
                        emit_row(scan, ROUTING_TABLE, headers.get(ROUTING_TABLE), &fields)?;
                    }
                }
                Section::GlobalStats | Section::None => {}
            }
        }

        scan.emit_connected_clients();
        Ok(())
    }
}

fn to_owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

fn emit_row(
    scan: &mut Scan<'_>,
    tag: &str,
    header: Option<&Vec<String>>,
    fields: &[&str],
) -> Result<(), ScanError> {
    let Some(section) = scan.schema().section(tag) else {
        return Ok(());
    };
    let Some(header) = header else {
        debug!(
            status_path = scan.status_path(),
            section = tag,
            "row before header row, skipping"
        );
        return Ok(());
    };

    let columns = ColumnValues::project(header, fields);
    scan.emit_row(section, &columns)
}
