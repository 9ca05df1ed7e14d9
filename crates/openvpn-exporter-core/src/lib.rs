//! openvpn-exporter-core: OpenVPN status scanning and metric exposition.
//!
//! Provides:
//! - `status`: dialect detection and the per-dialect status parsers
//! - `schema`: metric descriptors and section definitions
//! - `metrics`: measurements and sinks
//! - `collector`: scraping configured status files (real or mock filesystem)
//! - `exposition`: Prometheus text rendering
//! - `util`: time parsing helpers

pub mod collector;
pub mod exposition;
pub mod metrics;
pub mod schema;
pub mod status;
pub mod util;

/// Crate version, shared by the binary's `--version` and startup log.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
