//! Status collection across configured OpenVPN status files.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     StatusCollector                      │
//! │   one worker per status path ──► channel ──► Vec<_>      │
//! │             │                                            │
//! │      ┌──────▼──────┐   ┌──────────────────────────────┐  │
//! │      │  FileSystem │   │  status::scan_status         │  │
//! │      │   (trait)   │──►│  + up{status_path} gauge     │  │
//! │      └──────┬──────┘   └──────────────────────────────┘  │
//! └─────────────┼────────────────────────────────────────────┘
//!               │
//!        ┌──────┴──────┐
//!        │             │
//!  ┌─────▼─────┐ ┌─────▼─────┐
//!  │  RealFs   │ │  MockFs   │
//!  └───────────┘ └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use openvpn_exporter_core::collector::{MockFs, StatusCollector};
//! use openvpn_exporter_core::schema::StatusSchema;
//!
//! let collector = StatusCollector::new(
//!     MockFs::openvpn_host(),
//!     vec!["/run/openvpn/client.status".to_string()],
//!     StatusSchema::default(),
//! );
//! let measurements = collector.collect();
//! assert!(measurements.iter().any(|m| m.name() == "up" && m.value == 1.0));
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod traits;

pub use collector::StatusCollector;
pub use mock::MockFs;
pub use traits::{FileSystem, RealFs};
