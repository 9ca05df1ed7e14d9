//! Utility modules for openvpn-exporter.

mod time_parser;

pub use time_parser::{TimeParseError, parse_epoch_seconds, parse_local_ctime, parse_status_time};
